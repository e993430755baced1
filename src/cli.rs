//! Command-line interface definitions for the configurator binary.

use std::path::PathBuf;

use clap::Parser;


/// Command-line arguments.
///
/// Everything except the settings file path overrides the settings file.
#[derive(Parser)]
#[command(
    name = "accesslog-configurator",
    author,
    about = "Resolves and validates the access-log configuration.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the settings file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the settings file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "config",
        help = "Explicit access-log configuration location, e.g. classpath:accesslog-prod.toml \
                or file:/etc/accesslog.toml. An empty value clears the one from the settings file."
    )]
    pub config: Option<String>,

    #[arg(
        long = "classpath-root",
        help = "Additional directory to search for classpath: locations. \
                Searched before the roots from the settings file. May be repeated."
    )]
    pub classpath_roots: Vec<PathBuf>,

    #[arg(
        long = "enable-request-attributes",
        help = "Expose request attributes to the access log."
    )]
    pub enable_request_attributes: bool,

    #[arg(
        long = "context-name",
        default_value = "default",
        help = "Name of the access-log context, used in log messages and errors."
    )]
    pub context_name: String,
}
