//! The element snapshot a processing run works on.
//!
//! A [`Round`] is the already-enumerated set of marked declarations and
//! marked elements for one backend. It is produced either by scanning Rust
//! source (`source`) or by reading a TOML snapshot (`schema`), and is never
//! mutated by the processor.
//!
//! ```text
//! syn::File / DeriveInput ──► SourceVisitor ──┐
//!                                            ├──► Round ──► Processor
//! snapshot TOML ─────────► SnapshotSchema ───┘
//! ```

pub mod markers;
pub mod schema;
pub mod source;

use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::Display;
use syn::{Ident, Type};

use crate::error::Location;

pub use markers::{ColumnMarker, LocatorKeys, MarkerSet, TypeMarker};
pub use schema::SnapshotSchema;
pub use source::SourceVisitor;

/// Index of a declaration inside its [`Round`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From)]
pub struct DeclarationId(pub usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    #[default]
    Struct,
    Enum,
    Union,
    Trait,
    Impl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Field,
    Method,
    Constant,
}

/// Host-side modifiers that decide whether generated code may touch a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Not visible outside its declaration (no `pub`)
    pub private: bool,
    /// Cannot be assigned after construction
    pub immutable: bool,
}

/// A declaration that carries the backend's type marker or encloses a
/// column marker.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub simple_name: String,
    /// Module path segments, e.g. `["crate", "models"]`. Empty for derive input.
    pub module_path: Vec<String>,
    pub kind: DeclarationKind,
    pub marker: Option<TypeMarker>,
    pub location: Location,
}

impl Declaration {
    /// `crate::models::Book`, or just `Book` without a module path
    pub fn qualified_name(&self) -> String {
        qualify(&self.module_path, &self.simple_name)
    }

    pub fn is_marked(&self) -> bool {
        self.marker.is_some()
    }
}

/// An element carrying the backend's column marker.
#[derive(Debug, Clone)]
pub struct AnnotatedElement {
    pub kind: ElementKind,
    pub ident: Ident,
    /// Declared type. `None` for elements without one (methods).
    pub ty: Option<Type>,
    pub modifiers: Modifiers,
    pub marker: ColumnMarker,
    pub enclosing: DeclarationId,
    pub location: Location,
}

impl AnnotatedElement {
    /// Field name as written, without a raw identifier prefix
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_owned(),
            None => name,
        }
    }
}

/// Everything one processing invocation sees, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Round {
    pub declarations: Vec<Declaration>,
    pub columns: Vec<AnnotatedElement>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_declaration(&mut self, declaration: Declaration) -> DeclarationId {
        self.declarations.push(declaration);
        DeclarationId(self.declarations.len() - 1)
    }

    pub fn push_column(&mut self, element: AnnotatedElement) {
        self.columns.push(element);
    }

    pub fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.0)
    }

    /// Declarations carrying the type marker, in discovery order
    pub fn marked_declarations(&self) -> impl Iterator<Item = (DeclarationId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .filter(|(_, declaration)| declaration.is_marked())
            .map(|(index, declaration)| (DeclarationId(index), declaration))
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.columns.is_empty()
    }

    /// Append another round after this one, as if both had been discovered
    /// in a single scan.
    pub fn extend(&mut self, other: Round) {
        let offset = self.declarations.len();
        self.declarations.extend(other.declarations);
        self.columns
            .extend(other.columns.into_iter().map(|mut element| {
                element.enclosing = DeclarationId(element.enclosing.0 + offset);
                element
            }));
    }
}

pub(crate) fn qualify(module_path: &[String], name: &str) -> String {
    if module_path.is_empty() {
        name.to_owned()
    } else {
        format!("{}::{}", module_path.join("::"), name)
    }
}
