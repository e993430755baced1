use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};


/// Set up console (stderr) logging and, if a directory is given,
/// a daily-rolling log file.
///
/// Keep the returned guard alive until the program exits,
/// otherwise buffered log file lines are lost.
pub fn initialize_tracing<P>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: Option<P>,
    log_file_name_prefix: &str,
) -> Result<Option<WorkerGuard>>
where
    P: AsRef<Path>,
{
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_level_filter);


    let (log_file_layer, guard) = match log_file_output_directory {
        Some(directory) => {
            let directory = directory.as_ref();

            std::fs::create_dir_all(directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create log file output directory at {}.",
                        directory.display()
                    )
                })?;

            let file_appender = tracing_appender::rolling::daily(directory, log_file_name_prefix);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_writer)
                .with_filter(log_file_level_filter);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install tracing subscriber.")?;

    Ok(guard)
}
