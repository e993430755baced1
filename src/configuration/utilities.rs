use std::{collections::HashMap, env::current_dir, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};


/// Returns the default settings file path, which is at
/// `{current directory}/data/configuration.toml`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let mut configuration_filepath = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    configuration_filepath.push("data/configuration.toml");

    if !configuration_filepath.is_file() {
        return Err(miette!(
            "Could not find configuration.toml in data directory: {}",
            configuration_filepath.display()
        ));
    }

    Ok(configuration_filepath)
}

/// Substitute every `{PLACEHOLDER}` key in `original_path`.
#[must_use = "function returns the modified path"]
pub fn replace_placeholders_in_path<S>(
    original_path: S,
    placeholders: &HashMap<&'static str, String>,
) -> PathBuf
where
    S: AsRef<str>,
{
    let mut path_string = original_path.as_ref().to_string();

    for (key, value) in placeholders {
        path_string = path_string.replace(key, value);
    }

    PathBuf::from(path_string)
}
