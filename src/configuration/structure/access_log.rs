use std::path::PathBuf;

use miette::Result;
use serde::Deserialize;

use super::base_paths::BasePathsConfiguration;
use crate::{
    configuration::{traits::ResolvableConfiguration, utilities::replace_placeholders_in_path},
    context::AccessLogContext,
    resolver::ConfigSet,
    resources::ClasspathLocator,
};


#[derive(Deserialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct UnresolvedAccessLogConfiguration {
    #[serde(default)]
    config: Option<String>,

    #[serde(default)]
    enable_request_attributes: bool,

    #[serde(default)]
    classpath_roots: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AccessLogConfiguration {
    /// Explicit location of the access-log document. `None` when blank.
    pub config: Option<String>,

    pub enable_request_attributes: bool,

    /// Directories searched for `classpath:` locations, in order.
    pub classpath_roots: Vec<PathBuf>,
}

impl ResolvableConfiguration<BasePathsConfiguration> for UnresolvedAccessLogConfiguration {
    type Resolved = AccessLogConfiguration;

    fn resolve(self, context: &BasePathsConfiguration) -> Result<Self::Resolved> {
        let placeholders = context.placeholders_map();

        let classpath_roots = self
            .classpath_roots
            .into_iter()
            .map(|root| {
                context
                    .configuration_directory_path
                    .join(replace_placeholders_in_path(root, &placeholders))
            })
            .collect();


        Ok(Self::Resolved {
            config: self.config.filter(|config| !config.trim().is_empty()),
            enable_request_attributes: self.enable_request_attributes,
            classpath_roots,
        })
    }
}

impl AccessLogConfiguration {
    /// Replace the explicit location; a blank override clears it.
    pub fn override_config(&mut self, config: String) {
        self.config = Some(config).filter(|config| !config.trim().is_empty());
    }

    pub fn config_set(&self) -> ConfigSet {
        ConfigSet::with_explicit(self.config.as_deref())
    }

    pub fn locator(&self) -> ClasspathLocator {
        ClasspathLocator::new(self.classpath_roots.clone())
    }

    pub fn create_context<S: Into<String>>(&self, name: S) -> AccessLogContext {
        AccessLogContext::new(name).with_request_attributes(self.enable_request_attributes)
    }
}
