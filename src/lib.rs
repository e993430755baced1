//! Startup-time resolution of access-log configuration.
//!
//! Given an optional explicit location, [`resolver::ConfigResolver`] tries the
//! compiled-in default locations and finally a bundled fallback document,
//! applying the first one it can load to a [`context::LoggingContext`].

pub mod configuration;
pub mod context;
pub mod resolver;
pub mod resources;

pub use context::{AccessLogContext, LoggingContext};
pub use resolver::{resolve, ConfigResolver, ConfigSet, ConfigurationError, ResolutionResult};
pub use resources::{ClasspathLocator, ConfigLocation, ResourceLocator};
