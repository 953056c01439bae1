//! Generator strategies and the units they produce.
//!
//! A [`Generator`] is a pure function from a validated [`TypeMeta`] to one
//! [`GeneratedUnit`]. The four strategies (Put, Get, Delete, Mapping) are
//! generic over the backend, which supplies names and the locator builder
//! method. The processor runs them in the order it was given.

mod delete;
pub mod emit;
mod get;
mod mapping;
pub mod naming;
mod put;

use std::fmt;

use proc_macro2::TokenStream;
use strum::{Display, EnumIter};

use crate::meta::TypeMeta;

pub use delete::DeleteGenerator;
pub use get::GetGenerator;
pub use mapping::MappingGenerator;
pub use naming::UnitNaming;
pub use put::PutGenerator;

/// The four families of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum GeneratorKind {
    Put,
    Get,
    Delete,
    Mapping,
}

/// Settings shared by every generator of one run.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Runtime module generated code is written against
    pub runtime: syn::Path,
    /// Emit `#[doc]` attributes on generated items
    pub docs: bool,
}

/// One generation strategy.
pub trait Generator {
    fn kind(&self) -> GeneratorKind;

    fn generate(&self, meta: &TypeMeta, context: &GenerationContext) -> GeneratedUnit;
}

impl fmt::Debug for dyn Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator({})", self.kind())
    }
}

/// Generated code for one (type, kind) pair.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub kind: GeneratorKind,
    /// Qualified name of the host type the unit maps
    pub type_name: String,
    /// Name of the item the unit declares, e.g. `BookStorIOSQLitePutResolver`
    pub unit_name: String,
    pub(crate) file_stem: String,
    pub tokens: TokenStream,
}

impl GeneratedUnit {
    pub fn render(&self) -> String {
        self.tokens.to_string()
    }

    /// Snake case file name, e.g. `book_storio_sqlite_put_resolver.rs`
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.file_stem)
    }
}

impl fmt::Display for GeneratedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} for {}", self.kind, self.unit_name, self.type_name)
    }
}
