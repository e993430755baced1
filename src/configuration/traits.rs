use miette::Result;

/// A deserialized settings table that still needs validating ("resolving")
/// before it can be used.
///
/// `C` is whatever the table needs to know about its surroundings,
/// e.g. the directory the settings file lives in.
pub trait ResolvableConfiguration<C> {
    type Resolved;

    /// Validate and convert into the `Resolved` type.
    /// Return `Err` if the table is invalid.
    fn resolve(self, context: &C) -> Result<Self::Resolved>;
}
