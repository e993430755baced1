//! Logging contexts that accept an access-log configuration document.

use std::{io, io::Read, string::FromUtf8Error};

use miette::Diagnostic;
use thiserror::Error;

pub use self::access_log::{
    AccessLogContext,
    AccessLogDocument,
    AppenderDefinition,
    AppenderTarget,
};

mod access_log;


/// Raised by [`LoggingContext::apply_configuration`] when a resource was
/// found but could not be applied.
#[derive(Error, Diagnostic, Debug)]
pub enum MalformedConfiguration {
    #[error("Failed to read the configuration stream.")]
    Unreadable(#[source] io::Error),

    #[error("Configuration is not valid UTF-8.")]
    InvalidEncoding(#[source] FromUtf8Error),

    #[error("Configuration is not a valid TOML document.")]
    Syntax(#[source] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}


/// A mutable logging context that can be (re)configured from a byte stream.
pub trait LoggingContext {
    /// Human-readable identity, used in log messages and errors.
    fn name(&self) -> &str;

    fn apply_configuration(&mut self, stream: &mut dyn Read) -> Result<(), MalformedConfiguration>;
}
