use std::fmt::{self, Display, Formatter};

use crate::resources::ConfigLocation;


/// Optional locations tried in order when no explicit location is given.
pub const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = [
    "classpath:accesslog-test.toml",
    "classpath:accesslog.toml",
];

/// Last-resort location, bundled into the binary.
pub const FALLBACK_CONFIG_LOCATION: &str =
    concat!("classpath:", env!("CARGO_CRATE_NAME"), "/accesslog.toml");



#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CandidateRole {
    /// User-supplied override. Must load.
    Explicit,

    /// Compiled-in, optional.
    Default,

    /// Compiled-in, mandatory.
    Fallback,
}

impl Display for CandidateRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CandidateRole::Explicit => write!(f, "explicit"),
            CandidateRole::Default => write!(f, "default"),
            CandidateRole::Fallback => write!(f, "fallback"),
        }
    }
}


/// A single configuration source to attempt.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConfigCandidate {
    location: String,
    role: CandidateRole,
}

impl ConfigCandidate {
    pub fn new<S: Into<String>>(location: S, role: CandidateRole) -> Self {
        Self {
            location: location.into(),
            role,
        }
    }

    /// The location exactly as it was specified.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn role(&self) -> CandidateRole {
        self.role
    }

    pub fn parsed_location(&self) -> ConfigLocation {
        ConfigLocation::parse(&self.location)
    }
}

impl Display for ConfigCandidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}



/// Every candidate of one resolution, in priority order.
///
/// A blank explicit location counts as "not specified".
#[derive(Clone, Debug)]
pub struct ConfigSet {
    explicit: Option<ConfigCandidate>,
    defaults: Vec<ConfigCandidate>,
    fallback: ConfigCandidate,
}

impl ConfigSet {
    pub fn new<E, I, D, F>(explicit: Option<E>, defaults: I, fallback: F) -> Self
    where
        E: AsRef<str>,
        I: IntoIterator<Item = D>,
        D: Into<String>,
        F: Into<String>,
    {
        let explicit = explicit
            .filter(|location| !location.as_ref().trim().is_empty())
            .map(|location| ConfigCandidate::new(location.as_ref(), CandidateRole::Explicit));

        let defaults = defaults
            .into_iter()
            .map(|location| ConfigCandidate::new(location, CandidateRole::Default))
            .collect();


        Self {
            explicit,
            defaults,
            fallback: ConfigCandidate::new(fallback, CandidateRole::Fallback),
        }
    }

    /// Compiled-in defaults and fallback, plus an optional explicit location.
    pub fn with_explicit<E: AsRef<str>>(explicit: Option<E>) -> Self {
        Self::new(explicit, DEFAULT_CONFIG_LOCATIONS, FALLBACK_CONFIG_LOCATION)
    }

    pub fn explicit(&self) -> Option<&ConfigCandidate> {
        self.explicit.as_ref()
    }

    pub fn defaults(&self) -> &[ConfigCandidate] {
        &self.defaults
    }

    pub fn fallback(&self) -> &ConfigCandidate {
        &self.fallback
    }

    /// All candidates, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigCandidate> {
        self.explicit
            .iter()
            .chain(self.defaults.iter())
            .chain(std::iter::once(&self.fallback))
    }
}

impl Default for ConfigSet {
    fn default() -> Self {
        Self::with_explicit(None::<&str>)
    }
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::FALLBACK_RESOURCE_PATH;

    #[test]
    fn blank_explicit_location_is_not_specified() {
        assert!(ConfigSet::with_explicit(Some("")).explicit().is_none());
        assert!(ConfigSet::with_explicit(Some("   ")).explicit().is_none());
        assert!(ConfigSet::with_explicit(None::<String>).explicit().is_none());
    }

    #[test]
    fn preserves_priority_order() {
        let config_set = ConfigSet::new(Some("X"), ["A", "B"], "F");

        let order = config_set
            .iter()
            .map(|candidate| (candidate.location(), candidate.role()))
            .collect::<Vec<_>>();

        assert_eq!(
            order,
            vec![
                ("X", CandidateRole::Explicit),
                ("A", CandidateRole::Default),
                ("B", CandidateRole::Default),
                ("F", CandidateRole::Fallback),
            ]
        );
    }

    #[test]
    fn fallback_location_points_at_the_bundled_resource() {
        assert_eq!(
            ConfigCandidate::new(FALLBACK_CONFIG_LOCATION, CandidateRole::Fallback)
                .parsed_location(),
            ConfigLocation::Classpath(FALLBACK_RESOURCE_PATH.to_string())
        );
    }
}
