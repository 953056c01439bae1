//! Validated metadata records.
//!
//! A [`TypeMeta`] starts as a shell with no columns, receives its columns in
//! discovery order while the processor attaches them, and is read-only once
//! cross-validation has passed. Generators only ever see validated records.

use proc_macro2::Span;
use strum::{Display, EnumIter};
use syn::Ident;

use crate::elements::{DeclarationId, qualify};
use crate::error::Location;
use crate::introspection::FieldType;

/// A storage operation that needs a locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

/// Where a type is stored: one common locator, per-operation overrides, or
/// both. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageLocator {
    pub common: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl StorageLocator {
    /// Locator to use for `operation`. Operation-specific locators win over
    /// the common one.
    pub fn resolve(&self, operation: Operation) -> &str {
        let specific = match operation {
            Operation::Insert => &self.insert,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        };
        if specific.is_empty() {
            &self.common
        } else {
            specific
        }
    }

    pub fn operation(&self, operation: Operation) -> &str {
        match operation {
            Operation::Insert => &self.insert,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }
}

/// One persisted field.
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    /// Declaration the column was discovered in
    pub owner: DeclarationId,
    pub field: Ident,
    pub field_name: String,
    pub column_name: String,
    pub field_type: FieldType,
    pub is_key: bool,
    pub ignore_null: bool,
    pub location: Location,
}

impl ColumnMeta {
    /// Whether a put should skip this column when its value is absent
    pub fn skips_absent(&self) -> bool {
        self.ignore_null && self.field_type.nullable
    }
}

/// One persistable type.
#[derive(Debug, Clone)]
pub struct TypeMeta {
    pub simple_name: String,
    pub module_path: Vec<String>,
    pub locators: StorageLocator,
    /// Columns in discovery order
    pub columns: Vec<ColumnMeta>,
    pub location: Location,
}

impl TypeMeta {
    pub fn shell(
        simple_name: impl Into<String>,
        module_path: Vec<String>,
        locators: StorageLocator,
        location: Location,
    ) -> Self {
        Self {
            simple_name: simple_name.into(),
            module_path,
            locators,
            columns: Vec::new(),
            location,
        }
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.module_path, &self.simple_name)
    }

    /// Path of the host type as generated code names it
    pub fn type_path(&self) -> syn::Path {
        let mut segments: Vec<Ident> = self
            .module_path
            .iter()
            .map(|segment| path_ident(segment))
            .collect();
        segments.push(path_ident(&self.simple_name));
        syn::Path {
            leading_colon: None,
            segments: segments.into_iter().map(syn::PathSegment::from).collect(),
        }
    }

    /// The identifier generated unit names start from
    pub fn ident(&self) -> Ident {
        path_ident(&self.simple_name)
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnMeta> {
        self.columns.iter().filter(|column| column.is_key)
    }

    pub fn column(&self, field_name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|column| column.field_name == field_name)
    }

    pub fn column_by_storage_name(&self, column_name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|column| column.column_name == column_name)
    }
}

fn path_ident(segment: &str) -> Ident {
    match segment {
        "crate" | "self" | "super" | "Self" => Ident::new(segment, Span::call_site()),
        _ => syn::parse_str::<Ident>(segment)
            .unwrap_or_else(|_| Ident::new_raw(segment, Span::call_site())),
    }
}
