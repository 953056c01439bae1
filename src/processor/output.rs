use std::collections::BTreeMap;

use proc_macro2::TokenStream;

use crate::generate::{GeneratedUnit, GeneratorKind};
use crate::meta::TypeMeta;

/// Everything one successful run produced.
#[derive(Debug, Clone, Default)]
pub struct ProcessingOutput {
    /// Validated types in discovery order
    pub types: Vec<TypeMeta>,
    /// Units grouped by type, in generator order within a type
    pub units: Vec<GeneratedUnit>,
}

impl ProcessingOutput {
    /// Look up a unit by type name, qualified or simple, and kind
    pub fn unit(&self, type_name: &str, kind: GeneratorKind) -> Option<&GeneratedUnit> {
        self.units_for(type_name).find(|unit| unit.kind == kind)
    }

    pub fn units_for<'a, 'n>(
        &'a self,
        type_name: &'n str,
    ) -> impl Iterator<Item = &'a GeneratedUnit> + use<'a, 'n> {
        self.units.iter().filter(move |unit| {
            unit.type_name == type_name || unit.type_name.rsplit("::").next() == Some(type_name)
        })
    }

    pub fn type_meta(&self, type_name: &str) -> Option<&TypeMeta> {
        self.types
            .iter()
            .find(|meta| meta.qualified_name() == type_name || meta.simple_name == type_name)
    }

    /// The first two units that would be written to the same file, which
    /// happens when types in different modules share a simple name
    pub fn file_collision(&self) -> Option<(&GeneratedUnit, &GeneratedUnit)> {
        let mut seen = BTreeMap::new();
        self.units
            .iter()
            .find_map(|unit| seen.insert(unit.file_name(), unit).map(|earlier| (earlier, unit)))
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units concatenated, as a derive macro expands them
    pub fn to_token_stream(&self) -> TokenStream {
        self.units.iter().map(|unit| unit.tokens.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn unit(type_name: &str, kind: GeneratorKind, file_stem: &str) -> GeneratedUnit {
        GeneratedUnit {
            kind,
            type_name: type_name.to_owned(),
            unit_name: format!("{type_name}{kind}"),
            file_stem: file_stem.to_owned(),
            tokens: quote! { struct Unit; },
        }
    }

    #[test]
    fn test_unit_outlives_lookup_name() {
        let output = ProcessingOutput {
            types: Vec::new(),
            units: vec![
                unit("crate::Book", GeneratorKind::Put, "book_put"),
                unit("crate::Book", GeneratorKind::Get, "book_get"),
            ],
        };

        let found = {
            let name = String::from("Book");
            output.unit(&name, GeneratorKind::Get)
        };
        assert_eq!(found.map(|unit| unit.file_name()), Some("book_get.rs".to_owned()));
        assert_eq!(output.units_for("crate::Book").count(), 2);
        assert!(output.file_collision().is_none());
    }

    #[test]
    fn test_file_collision() {
        let output = ProcessingOutput {
            types: Vec::new(),
            units: vec![
                unit("crate::a::Book", GeneratorKind::Put, "book_put"),
                unit("crate::a::Book", GeneratorKind::Get, "book_get"),
                unit("crate::b::Book", GeneratorKind::Put, "book_put"),
            ],
        };

        let (earlier, later) = output.file_collision().unwrap();
        assert_eq!(earlier.type_name, "crate::a::Book");
        assert_eq!(later.type_name, "crate::b::Book");
    }
}
