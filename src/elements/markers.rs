//! Marker attribute parsing.
//!
//! Markers are plain data: the type marker carries locators, the column
//! marker carries the storage name and two flags. Parsing follows the
//! `parse_nested_meta` style of the attribute parsers in the macro crate.

use syn::{Attribute, LitBool, LitStr, meta::ParseNestedMeta};

/// Data carried by a type marker such as
/// `#[storio_content_resolver_type(uri = "content://books")]`.
///
/// Absent locators are empty strings, the same way an unset annotation
/// member reads on the host side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMarker {
    pub locator: String,
    pub insert_locator: String,
    pub update_locator: String,
    pub delete_locator: String,
}

/// Data carried by a column marker such as
/// `#[storio_sqlite_column(name = "id", key)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMarker {
    pub name: String,
    pub key: bool,
    pub ignore_null: bool,
}

/// Attribute names and display names a backend recognises.
#[derive(Debug, Clone, Copy)]
pub struct MarkerSet {
    /// Attribute path of the type marker, e.g. `storio_sqlite_type`
    pub type_attr: &'static str,
    /// Attribute path of the column marker, e.g. `storio_sqlite_column`
    pub column_attr: &'static str,
    /// Name used in diagnostics, e.g. `StorIOSQLiteType`
    pub type_display: &'static str,
    pub column_display: &'static str,
    pub locator_keys: LocatorKeys,
}

/// Attribute keys a backend accepts for its type marker, mapped onto the
/// `TypeMarker` slots.
#[derive(Debug, Clone, Copy)]
pub struct LocatorKeys {
    pub common: &'static str,
    pub insert: Option<&'static str>,
    pub update: Option<&'static str>,
    pub delete: Option<&'static str>,
}

impl LocatorKeys {
    fn describe(&self) -> String {
        [Some(self.common), self.insert, self.update, self.delete]
            .into_iter()
            .flatten()
            .map(|key| format!("`{key}`"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TypeMarker {
    /// Parse a type marker attribute. A bare `#[marker]` yields empty locators.
    pub fn parse(attr: &Attribute, keys: &LocatorKeys) -> syn::Result<Self> {
        let mut marker = TypeMarker::default();
        if matches!(attr.meta, syn::Meta::Path(_)) {
            return Ok(marker);
        }

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident(keys.common) {
                &mut marker.locator
            } else if keys.insert.is_some_and(|k| meta.path.is_ident(k)) {
                &mut marker.insert_locator
            } else if keys.update.is_some_and(|k| meta.path.is_ident(k)) {
                &mut marker.update_locator
            } else if keys.delete.is_some_and(|k| meta.path.is_ident(k)) {
                &mut marker.delete_locator
            } else {
                return Err(meta.error(format!("Unknown key, expected one of: {}", keys.describe())));
            };
            *slot = meta.value()?.parse::<LitStr>()?.value();
            Ok(())
        })?;

        Ok(marker)
    }
}

impl ColumnMarker {
    /// Parse a column marker attribute: `name = "..."`, `key`, `ignore_null`.
    pub fn parse(attr: &Attribute) -> syn::Result<Self> {
        let mut marker = ColumnMarker::default();
        if matches!(attr.meta, syn::Meta::Path(_)) {
            return Ok(marker);
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                marker.name = meta.value()?.parse::<LitStr>()?.value();
            } else if meta.path.is_ident("key") {
                marker.key = parse_flag(&meta)?;
            } else if meta.path.is_ident("ignore_null") {
                marker.ignore_null = parse_flag(&meta)?;
            } else {
                return Err(meta.error("Unknown key, expected one of: `name`, `key`, `ignore_null`"));
            }
            Ok(())
        })?;

        Ok(marker)
    }
}

/// `key` and `key = true` are both accepted
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        Ok(meta.value()?.parse::<LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Find the single attribute with the given name
pub fn find_marker<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}
