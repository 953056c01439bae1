//! Storage backends.
//!
//! A backend fixes the marker attributes it reacts to, how locators are
//! named in diagnostics and in generated queries, and the runtime module its
//! code is written against. The generators themselves are shared.

#[cfg(feature = "content-resolver")]
pub mod content_resolver;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::elements::MarkerSet;
use crate::generate::{
    DeleteGenerator, GetGenerator, Generator, MappingGenerator, PutGenerator, UnitNaming,
};
use crate::meta::Operation;

#[cfg(feature = "content-resolver")]
pub use content_resolver::ContentResolverBackend;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;

pub trait Backend: Default + Copy + 'static {
    /// Short name used in logs and on the command line
    const NAME: &'static str;

    const MARKERS: MarkerSet;

    const NAMING: UnitNaming;

    /// How a locator reads in diagnostics: `Table name`, `Uri`
    const LOCATOR_NOUN: &'static str;

    /// Operations that may carry their own locator, in the order they are
    /// checked
    const OPERATIONS: &'static [Operation];

    /// Query builder method taking the locator: `table`, `uri`
    const LOCATOR_METHOD: &'static str;

    /// Runtime type the mapping unit converts into
    const MAPPING_TYPE: &'static str;

    /// Runtime module used when the configuration names none
    const DEFAULT_RUNTIME: &'static str;

    /// Put, Get, Delete and Mapping, in that order
    fn generators() -> Vec<Box<dyn Generator>> {
        vec![
            Box::new(PutGenerator::<Self>::default()),
            Box::new(GetGenerator::<Self>::default()),
            Box::new(DeleteGenerator::<Self>::default()),
            Box::new(MappingGenerator::<Self>::default()),
        ]
    }
}
