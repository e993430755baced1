use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

pub use self::access_log::AccessLogConfiguration;
use self::access_log::UnresolvedAccessLogConfiguration;
pub use self::base_paths::BasePathsConfiguration;
use self::base_paths::UnresolvedBasePathsConfiguration;
pub use self::logging::LoggingConfiguration;
use self::logging::UnresolvedLoggingConfiguration;
use super::traits::ResolvableConfiguration;
use super::utilities::get_default_configuration_file_path;

mod access_log;
mod base_paths;
mod logging;



#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct UnresolvedConfiguration {
    /// Base paths.
    #[serde(default)]
    base_paths: UnresolvedBasePathsConfiguration,

    /// Logging-related configuration.
    #[serde(default)]
    logging: UnresolvedLoggingConfiguration,

    /// Access-log configuration resolution.
    #[serde(default)]
    access_log: UnresolvedAccessLogConfiguration,
}


/// The entire settings file.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this `Configuration` instance was loaded from.
    pub file_path: PathBuf,

    /// Base paths
    pub base_paths: BasePathsConfiguration,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Where to look for the access-log configuration.
    pub access_log: AccessLogConfiguration,
}


/// The context is the canonical path of the settings file.
impl ResolvableConfiguration<PathBuf> for UnresolvedConfiguration {
    type Resolved = Configuration;

    fn resolve(self, context: &PathBuf) -> Result<Self::Resolved> {
        let configuration_directory_path = context
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| miette!("Settings file has no parent directory."))?;

        let base_paths = self
            .base_paths
            .resolve(&configuration_directory_path)
            .wrap_err("Failed to resolve base_paths table.")?;

        let logging = self
            .logging
            .resolve(&base_paths)
            .wrap_err("Failed to resolve logging table.")?;

        let access_log = self
            .access_log
            .resolve(&base_paths)
            .wrap_err("Failed to resolve access_log table.")?;


        Ok(Configuration {
            file_path: context.clone(),
            base_paths,
            logging,
            access_log,
        })
    }
}


impl Configuration {
    /// Load the settings from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(configuration_file_path: S) -> Result<Self> {
        let configuration_file_path = configuration_file_path.as_ref();

        // Read the settings file into memory.
        let configuration_string = fs::read_to_string(configuration_file_path)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Could not read settings file: {}",
                    configuration_file_path.display()
                )
            })?;


        // Parse the string into the `UnresolvedConfiguration` structure and then resolve it.
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(&configuration_string)
                .into_diagnostic()
                .wrap_err("Could not parse settings file!")?;


        let configuration_file_path = dunce::canonicalize(configuration_file_path)
            .into_diagnostic()
            .wrap_err("Could not canonicalize settings file path!")?;

        let resolved_configuration = unresolved_configuration
            .resolve(&configuration_file_path)
            .wrap_err("Failed to resolve settings.")?;

        Ok(resolved_configuration)
    }

    /// Load the settings from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Configuration> {
        Configuration::load_from_path(
            get_default_configuration_file_path()
                .wrap_err_with(|| "Could not load settings file at default path.")?,
        )
    }
}
