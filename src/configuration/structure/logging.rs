use std::path::PathBuf;

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::base_paths::BasePathsConfiguration;
use crate::configuration::{
    traits::ResolvableConfiguration,
    utilities::replace_placeholders_in_path,
};


fn default_console_output_level_filter() -> String {
    "info".to_string()
}

fn default_log_file_output_level_filter() -> String {
    "debug".to_string()
}


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedLoggingConfiguration {
    #[serde(default = "default_console_output_level_filter")]
    console_output_level_filter: String,

    #[serde(default = "default_log_file_output_level_filter")]
    log_file_output_level_filter: String,

    /// No log file is written when unset.
    #[serde(default)]
    log_file_output_directory: Option<String>,
}

impl Default for UnresolvedLoggingConfiguration {
    fn default() -> Self {
        Self {
            console_output_level_filter: default_console_output_level_filter(),
            log_file_output_level_filter: default_log_file_output_level_filter(),
            log_file_output_directory: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: Option<PathBuf>,
}

impl ResolvableConfiguration<BasePathsConfiguration> for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;

    fn resolve(self, context: &BasePathsConfiguration) -> Result<Self::Resolved> {
        // Validate the file and console level filters.
        EnvFilter::try_new(&self.console_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse field console_output_level_filter"))?;

        EnvFilter::try_new(&self.log_file_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse field log_file_output_level_filter"))?;


        let placeholders = context.placeholders_map();
        let log_file_output_directory = self
            .log_file_output_directory
            .filter(|directory| !directory.trim().is_empty())
            .map(|directory| {
                context
                    .configuration_directory_path
                    .join(replace_placeholders_in_path(directory, &placeholders))
            });


        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}

impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.console_output_level_filter)
            .into_diagnostic()
            .wrap_err("Invalid console output level filter.")
    }

    pub fn log_file_output_level_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_file_output_level_filter)
            .into_diagnostic()
            .wrap_err("Invalid log file output level filter.")
    }
}
