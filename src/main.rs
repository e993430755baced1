use accesslog_configurator::{
    configuration::Configuration,
    context::{AccessLogDocument, AppenderTarget},
    ConfigResolver,
};
use clap::Parser;
use miette::{Context, Result};
use tracing::info;

use crate::{cli::CLIArgs, logging::initialize_tracing};

mod cli;
mod logging;


fn print_document_summary(document: &AccessLogDocument) {
    println!("  pattern: {}", document.pattern);

    if document.appenders.is_empty() {
        println!("  appenders: none");
    }

    for appender in &document.appenders {
        match &appender.target {
            AppenderTarget::Console => println!("  appender {}: console", appender.name),
            AppenderTarget::File(path) => {
                println!("  appender {}: file {}", appender.name, path.display())
            }
        }
    }
}


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load settings.
    let mut configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading settings: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading settings at default path.");
            Configuration::load_from_default_path()
        }
    }
    .wrap_err("Failed to load settings file.")?;

    println!("Settings loaded: {}.", configuration.file_path.display());


    if let Some(config) = cli_args.config {
        configuration.access_log.override_config(config);
    }

    if !cli_args.classpath_roots.is_empty() {
        let mut classpath_roots = cli_args.classpath_roots;
        classpath_roots.append(&mut configuration.access_log.classpath_roots);
        configuration.access_log.classpath_roots = classpath_roots;
    }

    if cli_args.enable_request_attributes {
        configuration.access_log.enable_request_attributes = true;
    }


    let logging_raii_guard = initialize_tracing(
        configuration.logging.console_output_level_filter()?,
        configuration.logging.log_file_output_level_filter()?,
        configuration.logging.log_file_output_directory.as_ref(),
        "accesslog-configurator.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let locator = configuration.access_log.locator();
    let config_set = configuration.access_log.config_set();
    let mut context = configuration.access_log.create_context(cli_args.context_name);

    let resolved = ConfigResolver::new(&locator).resolve(&mut context, &config_set)?;

    println!(
        "Configured access log \"{}\" from {} ({} candidate).",
        context,
        resolved.location(),
        resolved.role()
    );
    if let Some(document) = context.document() {
        print_document_summary(document);
    }
    println!(
        "  request attributes: {}",
        if context.request_attributes_enabled() { "enabled" } else { "disabled" }
    );


    drop(logging_raii_guard);
    Ok(())
}
