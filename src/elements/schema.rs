//! TOML element snapshots.
//!
//! A harness that introspects something other than Rust source can hand the
//! processor a snapshot of declarations and fields instead. Field types are
//! written as Rust type syntax and classified like any scanned field.
//!
//! ```toml
//! [[declaration]]
//! name = "Book"
//! module = "crate::models"
//!
//! [declaration.type_marker]
//! uri = "content://books"
//!
//! [[declaration.field]]
//! name = "id"
//! type = "i64"
//! modifiers = ["immutable"]
//!
//! [declaration.field.column]
//! name = "_id"
//! key = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use syn::ext::IdentExt;
use strum::Display;

use super::{
    AnnotatedElement, Declaration, DeclarationKind, ElementKind, Modifiers, Round,
    markers::{ColumnMarker, MarkerSet, TypeMarker},
    qualify,
};
use crate::error::{CodegenError, CodegenResult, Location, ProcessingError, ProcessingResult};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotSchema {
    #[serde(default, rename = "declaration")]
    pub declarations: Vec<DeclarationConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationConfig {
    pub name: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub kind: DeclarationKind,
    /// Raw marker members keyed by the backend's attribute keys
    pub type_marker: Option<BTreeMap<String, String>>,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub kind: ElementKind,
    #[serde(default)]
    pub modifiers: Vec<ModifierConfig>,
    pub column: Option<ColumnConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModifierConfig {
    Private,
    Immutable,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: bool,
    #[serde(default)]
    pub ignore_null: bool,
}

impl SnapshotSchema {
    pub fn from_toml_str(content: &str) -> CodegenResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CodegenResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CodegenError::Configuration(format!(
                "Failed to read snapshot file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build the round for one backend. Declarations that neither carry a
    /// type marker nor hold a column are left out, as a source scan would.
    pub fn into_round(&self, markers: &MarkerSet) -> ProcessingResult<Round> {
        let mut round = Round::new();

        for config in &self.declarations {
            let segments: Vec<String> = config
                .module
                .split("::")
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect();
            let location = Location::detached(qualify(&segments, &config.name));
            let module_path = segments
                .iter()
                .map(|segment| path_segment(segment, true, &location))
                .collect::<ProcessingResult<Vec<_>>>()?;
            let simple_name = path_segment(&config.name, false, &location)?;
            let qualified = qualify(&module_path, &simple_name);
            let location = Location::detached(qualified.clone());

            let marker = config
                .type_marker
                .as_ref()
                .map(|members| type_marker(members, markers, &location))
                .transpose()?;

            let columns: Vec<_> = config.fields.iter().filter(|f| f.column.is_some()).collect();
            if marker.is_none() && columns.is_empty() {
                continue;
            }

            let enclosing = round.push_declaration(Declaration {
                simple_name,
                module_path,
                kind: config.kind,
                marker,
                location,
            });

            for field in columns {
                let location = Location::detached(format!("{qualified}::{}", field.name));
                let ident = syn::parse_str::<syn::Ident>(&field.name)
                    .map_err(|e| ProcessingError::from((e, &location)))?;
                let ty = field
                    .ty
                    .as_deref()
                    .map(syn::parse_str::<syn::Type>)
                    .transpose()
                    .map_err(|e| ProcessingError::from((e, &location)))?;
                let column = field.column.clone().unwrap_or_default();

                round.push_column(AnnotatedElement {
                    kind: field.kind,
                    ident,
                    ty,
                    modifiers: Modifiers {
                        private: field.modifiers.contains(&ModifierConfig::Private),
                        immutable: field.modifiers.contains(&ModifierConfig::Immutable),
                    },
                    marker: ColumnMarker {
                        name: column.name,
                        key: column.key,
                        ignore_null: column.ignore_null,
                    },
                    enclosing,
                    location,
                });
            }
        }

        Ok(round)
    }
}

fn type_marker(
    members: &BTreeMap<String, String>,
    markers: &MarkerSet,
    location: &Location,
) -> ProcessingResult<TypeMarker> {
    let keys = &markers.locator_keys;
    let mut marker = TypeMarker::default();

    for (key, value) in members {
        let slot = if key == keys.common {
            &mut marker.locator
        } else if keys.insert == Some(key.as_str()) {
            &mut marker.insert_locator
        } else if keys.update == Some(key.as_str()) {
            &mut marker.update_locator
        } else if keys.delete == Some(key.as_str()) {
            &mut marker.delete_locator
        } else {
            return Err(ProcessingError::malformed_marker(
                location,
                format!("Unknown key `{key}` in {}", markers.type_display),
            ));
        };
        *slot = value.clone();
    }

    Ok(marker)
}

/// Check one path segment of a declaration. `crate`, `self` and `super`
/// are only allowed in the module path, raw prefixes are dropped.
fn path_segment(segment: &str, in_module: bool, location: &Location) -> ProcessingResult<String> {
    if in_module && matches!(segment, "crate" | "self" | "super") {
        return Ok(segment.to_owned());
    }
    syn::parse_str::<syn::Ident>(segment)
        .map(|ident| ident.unraw().to_string())
        .map_err(|e| ProcessingError::from((e, location)))
}
