use miette::Diagnostic;
use thiserror::Error;

use super::{CandidateRole, ConfigCandidate};
use crate::{context::MalformedConfiguration, resources::ResourceNotFound};


/// Outcome of a single failed candidate attempt.
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("Configuration resource could not be found.")]
    NotFound(#[source] ResourceNotFound),

    #[error("Configuration resource was found, but is malformed.")]
    Malformed(#[source] MalformedConfiguration),
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, LoadError::Malformed(_))
    }
}


/// Fatal resolution failure, naming the context and the offending location.
#[derive(Error, Diagnostic, Debug)]
#[error("Could not configure the access log: context=[{context}] from config=[{location}]")]
#[diagnostic(code(accesslog::configuration_failed))]
pub struct ConfigurationError {
    pub context: String,

    pub location: String,

    pub role: CandidateRole,

    #[source]
    pub cause: LoadError,
}

impl ConfigurationError {
    pub(super) fn new(context_name: &str, candidate: &ConfigCandidate, cause: LoadError) -> Self {
        Self {
            context: context_name.to_string(),
            location: candidate.location().to_string(),
            role: candidate.role(),
            cause,
        }
    }
}
