//! Names of generated items and files.

use heck::ToSnakeCase;
use proc_macro2::Span;
use syn::Ident;

use super::GeneratorKind;
use crate::meta::TypeMeta;

/// Backend-specific name parts.
///
/// Resolvers are named `{Type}{resolver_prefix}{Kind}Resolver`, the mapping
/// `{Type}{mapping_prefix}TypeMapping`. The slugs are the snake case forms
/// used in file names, spelled out because the prefixes mix acronyms.
#[derive(Debug, Clone, Copy)]
pub struct UnitNaming {
    pub resolver_prefix: &'static str,
    pub resolver_slug: &'static str,
    pub mapping_prefix: &'static str,
    pub mapping_slug: &'static str,
}

impl UnitNaming {
    pub fn unit_name(&self, meta: &TypeMeta, kind: GeneratorKind) -> String {
        match kind {
            GeneratorKind::Mapping => {
                format!("{}{}TypeMapping", type_name(meta), self.mapping_prefix)
            }
            _ => format!("{}{}{}Resolver", type_name(meta), self.resolver_prefix, kind),
        }
    }

    pub fn unit_ident(&self, meta: &TypeMeta, kind: GeneratorKind) -> Ident {
        Ident::new(&self.unit_name(meta, kind), Span::call_site())
    }

    pub fn file_stem(&self, meta: &TypeMeta, kind: GeneratorKind) -> String {
        let type_part = type_name(meta).to_snake_case();
        match kind {
            GeneratorKind::Mapping => format!("{type_part}_{}_type_mapping", self.mapping_slug),
            _ => format!(
                "{type_part}_{}_{}_resolver",
                self.resolver_slug,
                kind.to_string().to_snake_case()
            ),
        }
    }
}

/// Simple name without a raw identifier prefix
fn type_name(meta: &TypeMeta) -> &str {
    meta.simple_name.strip_prefix("r#").unwrap_or(&meta.simple_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Location;
    use crate::meta::StorageLocator;

    const NAMING: UnitNaming = UnitNaming {
        resolver_prefix: "StorIOSQLite",
        resolver_slug: "storio_sqlite",
        mapping_prefix: "SQLite",
        mapping_slug: "sqlite",
    };

    fn meta(name: &str) -> TypeMeta {
        TypeMeta::shell(name, Vec::new(), StorageLocator::default(), Location::detached(name))
    }

    #[test]
    fn test_unit_names() {
        let book = meta("Book");
        assert_eq!(NAMING.unit_name(&book, GeneratorKind::Put), "BookStorIOSQLitePutResolver");
        assert_eq!(NAMING.unit_name(&book, GeneratorKind::Get), "BookStorIOSQLiteGetResolver");
        assert_eq!(
            NAMING.unit_name(&book, GeneratorKind::Delete),
            "BookStorIOSQLiteDeleteResolver"
        );
        assert_eq!(NAMING.unit_name(&book, GeneratorKind::Mapping), "BookSQLiteTypeMapping");
    }

    #[test]
    fn test_file_stems() {
        let entry = meta("LibraryEntry");
        assert_eq!(
            NAMING.file_stem(&entry, GeneratorKind::Put),
            "library_entry_storio_sqlite_put_resolver"
        );
        assert_eq!(
            NAMING.file_stem(&entry, GeneratorKind::Mapping),
            "library_entry_sqlite_type_mapping"
        );
    }

    #[test]
    fn test_raw_type_name() {
        let book = meta("r#Book");
        assert_eq!(NAMING.unit_ident(&book, GeneratorKind::Put), "BookStorIOSQLitePutResolver");
        assert_eq!(NAMING.file_stem(&book, GeneratorKind::Mapping), "book_sqlite_type_mapping");
    }
}
