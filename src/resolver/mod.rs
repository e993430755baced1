//! Picks the access-log configuration to apply to a [`LoggingContext`].
//!
//! Candidates are tried in priority order (see [`ConfigSet`]):
//!
//! 1. The explicit location, if one was given. Any failure is fatal and no
//!    other candidate is tried.
//! 2. Each default location, in order. A missing resource is skipped,
//!    a malformed one is fatal.
//! 3. The bundled fallback. Any failure is fatal.
//!
//! "Missing" and "malformed" come from the error kind of the load step
//! ([`LoadError`]), never from looking at the content.

use tracing::{debug, info};

pub use self::candidates::{
    CandidateRole,
    ConfigCandidate,
    ConfigSet,
    DEFAULT_CONFIG_LOCATIONS,
    FALLBACK_CONFIG_LOCATION,
};
pub use self::error::{ConfigurationError, LoadError};
use crate::{context::LoggingContext, resources::ResourceLocator};

mod candidates;
mod error;


/// `Ok` holds the candidate whose configuration was applied.
pub type ResolutionResult = Result<ConfigCandidate, ConfigurationError>;


/// Applies the first usable candidate of a [`ConfigSet`], opening each one through `L`.
pub struct ConfigResolver<'l, L: ?Sized> {
    locator: &'l L,
}

impl<'l, L> ConfigResolver<'l, L>
where
    L: ResourceLocator + ?Sized,
{
    pub fn new(locator: &'l L) -> Self {
        Self { locator }
    }

    /// Apply the first usable candidate of `config_set` to `context`.
    pub fn resolve<C>(&self, context: &mut C, config_set: &ConfigSet) -> ResolutionResult
    where
        C: LoggingContext + ?Sized,
    {
        if let Some(explicit) = config_set.explicit() {
            return self.attempt_or_fail(context, explicit);
        }


        for default in config_set.defaults() {
            match self.attempt(context, default) {
                Ok(()) => return Ok(default.clone()),
                Err(LoadError::NotFound(not_found)) => {
                    debug!(
                        config = %default.location(),
                        error = %not_found,
                        "Skipped a default configuration file."
                    );
                }
                Err(cause) => {
                    return Err(ConfigurationError::new(context.name(), default, cause));
                }
            }
        }


        self.attempt_or_fail(context, config_set.fallback())
    }

    fn attempt_or_fail<C>(&self, context: &mut C, candidate: &ConfigCandidate) -> ResolutionResult
    where
        C: LoggingContext + ?Sized,
    {
        match self.attempt(context, candidate) {
            Ok(()) => Ok(candidate.clone()),
            Err(cause) => Err(ConfigurationError::new(context.name(), candidate, cause)),
        }
    }

    /// The stream lives only for the duration of this call.
    fn attempt<C>(&self, context: &mut C, candidate: &ConfigCandidate) -> Result<(), LoadError>
    where
        C: LoggingContext + ?Sized,
    {
        let mut stream = self
            .locator
            .open(&candidate.parsed_location())
            .map_err(LoadError::NotFound)?;

        context
            .apply_configuration(&mut *stream)
            .map_err(LoadError::Malformed)?;

        info!(
            context = %context.name(),
            config = %candidate.location(),
            "Configured the access log."
        );

        Ok(())
    }
}


/// One-shot resolution over an explicit location, defaults and a fallback.
pub fn resolve<C, L>(
    context: &mut C,
    locator: &L,
    explicit: Option<&str>,
    defaults: &[&str],
    fallback: &str,
) -> ResolutionResult
where
    C: LoggingContext + ?Sized,
    L: ResourceLocator + ?Sized,
{
    let config_set = ConfigSet::new(explicit, defaults.iter().copied(), fallback);
    ConfigResolver::new(locator).resolve(context, &config_set)
}
