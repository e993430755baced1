//! Mapping of configuration location strings onto readable byte streams.
//!
//! A location is either `classpath:<path>` (looked up among resources bundled
//! into the binary, then under each classpath root directory), `file:<path>`,
//! or a bare filesystem path.

use std::{
    fmt::{self, Display, Formatter},
    io::{self, Read},
    path::PathBuf,
};

use miette::Diagnostic;
use thiserror::Error;

pub use self::classpath::{
    ClasspathLocator,
    EmbeddedResource,
    BUNDLED_RESOURCES,
    FALLBACK_RESOURCE_PATH,
};

mod classpath;


const CLASSPATH_SCHEME: &str = "classpath:";
const FILE_SCHEME: &str = "file:";



/// A parsed configuration location.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConfigLocation {
    /// A resource path relative to the classpath (no leading slash).
    Classpath(String),

    /// A filesystem path.
    File(PathBuf),
}

impl ConfigLocation {
    pub fn parse(location: &str) -> Self {
        if let Some(resource_path) = location.strip_prefix(CLASSPATH_SCHEME) {
            return Self::Classpath(resource_path.trim_start_matches('/').to_string());
        }

        if let Some(file_path) = location.strip_prefix(FILE_SCHEME) {
            // `file://<path>` carries an (empty) authority before the path.
            let file_path = file_path.strip_prefix("//").unwrap_or(file_path);
            return Self::File(PathBuf::from(file_path));
        }

        Self::File(PathBuf::from(location))
    }
}

impl Display for ConfigLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classpath(resource_path) => write!(f, "{CLASSPATH_SCHEME}{resource_path}"),
            Self::File(file_path) => write!(f, "{FILE_SCHEME}{}", file_path.display()),
        }
    }
}


/// Returned when a location does not resolve to a readable resource.
#[derive(Error, Diagnostic, Debug)]
#[error("Resource not found: {location}")]
#[diagnostic(code(accesslog::resource_not_found))]
pub struct ResourceNotFound {
    pub location: String,

    #[source]
    pub source: Option<io::Error>,
}

impl ResourceNotFound {
    pub fn new(location: &ConfigLocation) -> Self {
        Self {
            location: location.to_string(),
            source: None,
        }
    }

    pub fn with_source(location: &ConfigLocation, source: io::Error) -> Self {
        Self {
            location: location.to_string(),
            source: Some(source),
        }
    }
}


/// Something that can turn a [`ConfigLocation`] into a byte stream.
///
/// The returned stream is owned by the caller and released when dropped.
pub trait ResourceLocator {
    fn open(&self, location: &ConfigLocation) -> Result<Box<dyn Read>, ResourceNotFound>;
}

impl<L> ResourceLocator for &L
where
    L: ResourceLocator + ?Sized,
{
    fn open(&self, location: &ConfigLocation) -> Result<Box<dyn Read>, ResourceNotFound> {
        (**self).open(location)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classpath_locations() {
        assert_eq!(
            ConfigLocation::parse("classpath:accesslog.toml"),
            ConfigLocation::Classpath("accesslog.toml".to_string())
        );
        assert_eq!(
            ConfigLocation::parse("classpath:/nested/accesslog.toml"),
            ConfigLocation::Classpath("nested/accesslog.toml".to_string())
        );
    }

    #[test]
    fn parses_file_locations() {
        assert_eq!(
            ConfigLocation::parse("file:/etc/accesslog.toml"),
            ConfigLocation::File(PathBuf::from("/etc/accesslog.toml"))
        );
        assert_eq!(
            ConfigLocation::parse("file:///etc/accesslog.toml"),
            ConfigLocation::File(PathBuf::from("/etc/accesslog.toml"))
        );
        assert_eq!(
            ConfigLocation::parse("conf/accesslog.toml"),
            ConfigLocation::File(PathBuf::from("conf/accesslog.toml"))
        );
    }

    #[test]
    fn displays_with_scheme() {
        assert_eq!(
            ConfigLocation::parse("classpath:/a/b.toml").to_string(),
            "classpath:a/b.toml"
        );
        assert_eq!(
            ConfigLocation::parse("a/b.toml").to_string(),
            "file:a/b.toml"
        );
    }
}
