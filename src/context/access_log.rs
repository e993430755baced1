use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    io::Read,
    path::PathBuf,
};

use serde::Deserialize;
use tracing::debug;

use super::{LoggingContext, MalformedConfiguration};



#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
enum AppenderKind {
    Console,
    File,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct UnresolvedAppenderDefinition {
    name: String,

    kind: AppenderKind,

    path: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct UnresolvedAccessLogDocument {
    pattern: String,

    #[serde(default, rename = "appender")]
    appenders: Vec<UnresolvedAppenderDefinition>,
}


/// Where an appender sends its access-log lines.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AppenderTarget {
    Console,
    File(PathBuf),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AppenderDefinition {
    pub name: String,
    pub target: AppenderTarget,
}

/// A validated access-log configuration document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AccessLogDocument {
    /// Line layout pattern, e.g. `common`, `combined` or a custom pattern.
    pub pattern: String,

    pub appenders: Vec<AppenderDefinition>,
}


impl UnresolvedAppenderDefinition {
    fn resolve(self) -> Result<AppenderDefinition, MalformedConfiguration> {
        if self.name.trim().is_empty() {
            return Err(MalformedConfiguration::Invalid(
                "appender name must not be empty".to_string(),
            ));
        }

        let target = match (self.kind, self.path) {
            (AppenderKind::Console, None) => AppenderTarget::Console,
            (AppenderKind::Console, Some(_)) => {
                return Err(MalformedConfiguration::Invalid(format!(
                    "console appender \"{}\" does not accept a path",
                    self.name
                )));
            }
            (AppenderKind::File, Some(path)) if !path.trim().is_empty() => {
                AppenderTarget::File(PathBuf::from(path))
            }
            (AppenderKind::File, _) => {
                return Err(MalformedConfiguration::Invalid(format!(
                    "file appender \"{}\" requires a non-empty path",
                    self.name
                )));
            }
        };


        Ok(AppenderDefinition {
            name: self.name,
            target,
        })
    }
}

impl UnresolvedAccessLogDocument {
    fn resolve(self) -> Result<AccessLogDocument, MalformedConfiguration> {
        if self.pattern.trim().is_empty() {
            return Err(MalformedConfiguration::Invalid(
                "pattern must not be empty".to_string(),
            ));
        }

        let mut seen_names = HashSet::with_capacity(self.appenders.len());
        let mut appenders = Vec::with_capacity(self.appenders.len());

        for unresolved_appender in self.appenders {
            let appender = unresolved_appender.resolve()?;

            if !seen_names.insert(appender.name.clone()) {
                return Err(MalformedConfiguration::Invalid(format!(
                    "appender \"{}\" is defined more than once",
                    appender.name
                )));
            }

            appenders.push(appender);
        }


        Ok(AccessLogDocument {
            pattern: self.pattern,
            appenders,
        })
    }
}

impl AccessLogDocument {
    /// Parse and validate a document from a byte stream.
    pub fn from_reader(stream: &mut dyn Read) -> Result<Self, MalformedConfiguration> {
        let mut raw_contents = Vec::new();
        stream
            .read_to_end(&mut raw_contents)
            .map_err(MalformedConfiguration::Unreadable)?;

        let contents =
            String::from_utf8(raw_contents).map_err(MalformedConfiguration::InvalidEncoding)?;

        toml::from_str::<UnresolvedAccessLogDocument>(&contents)
            .map_err(MalformedConfiguration::Syntax)?
            .resolve()
    }
}



/// The access-log context: holds the most recently applied document.
#[derive(Debug)]
pub struct AccessLogContext {
    name: String,
    enable_request_attributes: bool,
    document: Option<AccessLogDocument>,
}

impl AccessLogContext {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            enable_request_attributes: false,
            document: None,
        }
    }

    /// Whether request attributes should be exposed to the access log.
    /// Unrelated to which configuration document is chosen.
    pub fn with_request_attributes(mut self, enable_request_attributes: bool) -> Self {
        self.enable_request_attributes = enable_request_attributes;
        self
    }

    pub fn request_attributes_enabled(&self) -> bool {
        self.enable_request_attributes
    }

    pub fn document(&self) -> Option<&AccessLogDocument> {
        self.document.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.document.is_some()
    }
}

impl Display for AccessLogContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl LoggingContext for AccessLogContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_configuration(&mut self, stream: &mut dyn Read) -> Result<(), MalformedConfiguration> {
        let document = AccessLogDocument::from_reader(stream)?;

        debug!(
            context = %self.name,
            pattern = %document.pattern,
            appenders = document.appenders.len(),
            "Applying access-log document."
        );

        self.document = Some(document);
        Ok(())
    }
}



#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn apply(context: &mut AccessLogContext, contents: &str) -> Result<(), MalformedConfiguration> {
        context.apply_configuration(&mut Cursor::new(contents.as_bytes()))
    }

    #[test]
    fn applies_a_valid_document() {
        let mut context = AccessLogContext::new("test");
        apply(
            &mut context,
            r#"
            pattern = "combined"

            [[appender]]
            name = "console"
            kind = "console"

            [[appender]]
            name = "file"
            kind = "file"
            path = "logs/access.log"
            "#,
        )
        .unwrap();

        let document = context.document().unwrap();
        assert_eq!(document.pattern, "combined");
        assert_eq!(
            document.appenders,
            vec![
                AppenderDefinition {
                    name: "console".to_string(),
                    target: AppenderTarget::Console,
                },
                AppenderDefinition {
                    name: "file".to_string(),
                    target: AppenderTarget::File(PathBuf::from("logs/access.log")),
                },
            ]
        );
    }

    #[test]
    fn rejects_syntax_errors() {
        let mut context = AccessLogContext::new("test");
        let error = apply(&mut context, "pattern = ").unwrap_err();

        assert!(matches!(error, MalformedConfiguration::Syntax(_)));
        assert!(!context.is_configured());
    }

    #[test]
    fn rejects_invalid_utf8() {
        let mut context = AccessLogContext::new("test");
        let error = context
            .apply_configuration(&mut Cursor::new(vec![0xff, 0xfe, 0x00]))
            .unwrap_err();

        assert!(matches!(error, MalformedConfiguration::InvalidEncoding(_)));
    }

    #[test]
    fn rejects_semantic_errors() {
        let cases = [
            "pattern = \"  \"",
            "pattern = \"common\"\nunknown = 1",
            "pattern = \"common\"\n[[appender]]\nname = \"a\"\nkind = \"socket\"",
            "pattern = \"common\"\n[[appender]]\nname = \"\"\nkind = \"console\"",
            "pattern = \"common\"\n[[appender]]\nname = \"a\"\nkind = \"file\"",
            "pattern = \"common\"\n[[appender]]\nname = \"a\"\nkind = \"console\"\npath = \"x\"",
            "pattern = \"common\"\n[[appender]]\nname = \"a\"\nkind = \"console\"\n[[appender]]\nname = \"a\"\nkind = \"console\"",
        ];

        for case in cases {
            let mut context = AccessLogContext::new("test");
            assert!(apply(&mut context, case).is_err(), "accepted: {case}");
            assert!(!context.is_configured());
        }
    }

    #[test]
    fn failed_application_keeps_the_previous_document() {
        let mut context = AccessLogContext::new("test").with_request_attributes(true);
        apply(&mut context, "pattern = \"common\"").unwrap();
        apply(&mut context, "pattern = \"\"").unwrap_err();

        assert_eq!(context.document().unwrap().pattern, "common");
        assert!(context.request_attributes_enabled());
    }
}
