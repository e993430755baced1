//! Settings of the configurator itself (not the access-log document it picks).
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The settings file is first deserialized into unvalidated ("unresolved")
//! structures, which are then turned into their validated ("resolved")
//! counterparts through [`ResolvableConfiguration`][traits::ResolvableConfiguration].
//! Path placeholders such as `{BASE_DATA_DIRECTORY}` are substituted during
//! that step, and relative paths are anchored at the settings file's directory.

#![allow(rustdoc::private_intra_doc_links)]

mod structure;
mod traits;
mod utilities;

pub use structure::*;
