use std::{collections::HashMap, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

use crate::configuration::traits::ResolvableConfiguration;


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedBasePathsConfiguration {
    base_data_directory_path: String,
}

impl Default for UnresolvedBasePathsConfiguration {
    fn default() -> Self {
        Self {
            base_data_directory_path: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasePathsConfiguration {
    /// Directory containing the settings file itself.
    pub configuration_directory_path: PathBuf,

    pub base_data_directory_path: PathBuf,
}

/// The context is the (canonical) directory of the settings file;
/// a relative base data directory is resolved against it.
impl ResolvableConfiguration<PathBuf> for UnresolvedBasePathsConfiguration {
    type Resolved = BasePathsConfiguration;

    fn resolve(self, context: &PathBuf) -> Result<Self::Resolved> {
        let base_data_directory_path = context.join(self.base_data_directory_path);

        if base_data_directory_path.exists() && !base_data_directory_path.is_dir() {
            return Err(miette!(
                "Base data directory path exists, but is not a directory: {}",
                base_data_directory_path.display()
            ));
        }

        if !base_data_directory_path.is_dir() {
            std::fs::create_dir_all(&base_data_directory_path)
                .into_diagnostic()
                .wrap_err("Failed to create missing base data directory.")?;
        }


        let base_data_directory_path = dunce::canonicalize(base_data_directory_path)
            .into_diagnostic()
            .wrap_err("Failed to canonicalize base data directory path.")?;


        Ok(BasePathsConfiguration {
            configuration_directory_path: context.clone(),
            base_data_directory_path,
        })
    }
}


impl BasePathsConfiguration {
    pub fn placeholders_map(&self) -> HashMap<&'static str, String> {
        HashMap::from([
            (
                "{BASE_DATA_DIRECTORY}",
                self.base_data_directory_path.to_string_lossy().to_string(),
            ),
            (
                "{CONFIGURATION_DIRECTORY}",
                self.configuration_directory_path
                    .to_string_lossy()
                    .to_string(),
            ),
        ])
    }
}
