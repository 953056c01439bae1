//! Discovery of marked elements in Rust source.
//!
//! The visitor walks a parsed file in source order. Items carrying the type
//! marker, or enclosing at least one column marker, become declarations;
//! every element carrying the column marker becomes an [`AnnotatedElement`].
//! Nothing is validated here beyond marker syntax, the processor owns every
//! semantic rule.

use log::trace;
use proc_macro2::Span;
use syn::{
    Attribute, Block, Data, DeriveInput, Fields, Ident, ImplItem, ItemEnum, ItemImpl, ItemMod,
    ItemStruct, ItemTrait, ItemUnion, TraitItem, Type, Visibility, ext::IdentExt, spanned::Spanned,
    visit::Visit,
};

use super::{
    AnnotatedElement, Declaration, DeclarationKind, ElementKind, Modifiers, Round,
    markers::{ColumnMarker, MarkerSet, TypeMarker, find_marker},
    qualify,
};
use crate::error::{Location, ProcessingError, ProcessingResult};

/// One member of a declaration that might carry the column marker
struct Member<'a> {
    kind: ElementKind,
    ident: Option<&'a Ident>,
    ty: Option<&'a Type>,
    vis: Option<&'a Visibility>,
    attrs: &'a [Attribute],
    span: Span,
}

/// Visitor collecting a [`Round`] from Rust items.
pub struct SourceVisitor<'m> {
    markers: &'m MarkerSet,
    module_path: Vec<String>,
    file: Option<String>,
    round: Round,
    error: Option<ProcessingError>,
}

impl<'m> SourceVisitor<'m> {
    pub fn new(markers: &'m MarkerSet, module_path: Vec<String>) -> Self {
        Self {
            markers,
            module_path,
            file: None,
            round: Round::new(),
            error: None,
        }
    }

    /// Attach a file name to every location recorded from now on
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Finish the scan. The first malformed marker aborts the whole scan.
    pub fn into_round(self) -> ProcessingResult<Round> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.round),
        }
    }

    fn location(&self, element: String, span: Span) -> Location {
        Location::new(element, span).in_file(self.file.as_deref())
    }

    fn record(
        &mut self,
        ident: &Ident,
        attrs: &[Attribute],
        kind: DeclarationKind,
        members: Vec<Member<'_>>,
    ) {
        if self.error.is_some() {
            return;
        }

        let simple_name = ident.unraw().to_string();
        let qualified = qualify(&self.module_path, &simple_name);
        let location = self.location(qualified.clone(), ident.span());

        let marker = match find_marker(attrs, self.markers.type_attr) {
            Some(attr) => match TypeMarker::parse(attr, &self.markers.locator_keys) {
                Ok(marker) => Some(marker),
                Err(e) => {
                    self.error = Some((e, &location).into());
                    return;
                }
            },
            None => None,
        };

        let column_attr = self.markers.column_attr;
        let marked_members: Vec<_> = members
            .into_iter()
            .filter_map(|member| find_marker(member.attrs, column_attr).map(|attr| (member, attr)))
            .collect();

        if marker.is_none() && marked_members.is_empty() {
            return;
        }

        trace!(
            "SourceVisitor: {} {} with {} marked member(s)",
            kind,
            qualified,
            marked_members.len()
        );

        let enclosing = self.round.push_declaration(Declaration {
            simple_name,
            module_path: self.module_path.clone(),
            kind,
            marker,
            location,
        });

        for (index, (member, attr)) in marked_members.into_iter().enumerate() {
            let member_location = match member.ident {
                Some(member_ident) => {
                    self.location(format!("{qualified}::{member_ident}"), member_ident.span())
                }
                None => self.location(format!("{qualified}::{index}"), member.span),
            };

            let Some(member_ident) = member.ident else {
                self.error = Some(ProcessingError::structural(
                    &member_location,
                    format!(
                        "{} can only be applied to named fields: {}",
                        self.markers.column_display, member_location.element
                    ),
                ));
                return;
            };

            let marker = match ColumnMarker::parse(attr) {
                Ok(marker) => marker,
                Err(e) => {
                    self.error = Some((e, &member_location).into());
                    return;
                }
            };

            self.round.push_column(AnnotatedElement {
                kind: member.kind,
                ident: member_ident.clone(),
                ty: member.ty.cloned(),
                modifiers: Modifiers {
                    private: member
                        .vis
                        .is_some_and(|vis| matches!(vis, Visibility::Inherited)),
                    immutable: false,
                },
                marker,
                enclosing,
                location: member_location,
            });
        }
    }

    /// Scan a derive input as a single top-level item
    pub fn visit_derive(&mut self, input: &DeriveInput) {
        match &input.data {
            Data::Struct(data) => self.record(
                &input.ident,
                &input.attrs,
                DeclarationKind::Struct,
                field_members(&data.fields),
            ),
            Data::Enum(data) => self.record(
                &input.ident,
                &input.attrs,
                DeclarationKind::Enum,
                data.variants.iter().flat_map(|v| field_members(&v.fields)).collect(),
            ),
            Data::Union(data) => self.record(
                &input.ident,
                &input.attrs,
                DeclarationKind::Union,
                data.fields.named.iter().map(field_member).collect(),
            ),
        }
    }
}

fn field_member(field: &syn::Field) -> Member<'_> {
    Member {
        kind: ElementKind::Field,
        ident: field.ident.as_ref(),
        ty: Some(&field.ty),
        vis: Some(&field.vis),
        attrs: &field.attrs,
        span: field.span(),
    }
}

fn field_members(fields: &Fields) -> Vec<Member<'_>> {
    fields.iter().map(field_member).collect()
}

impl<'ast> Visit<'ast> for SourceVisitor<'_> {
    fn visit_item_mod(&mut self, i: &'ast ItemMod) {
        if i.content.is_none() {
            return;
        }
        self.module_path.push(i.ident.unraw().to_string());
        syn::visit::visit_item_mod(self, i);
        self.module_path.pop();
    }

    // Items inside function bodies and other blocks have no module path
    fn visit_block(&mut self, i: &'ast Block) {
        trace!("SourceVisitor: Skipping block with {} statement(s)", i.stmts.len());
    }

    fn visit_item_struct(&mut self, i: &'ast ItemStruct) {
        self.record(&i.ident, &i.attrs, DeclarationKind::Struct, field_members(&i.fields));
    }

    fn visit_item_enum(&mut self, i: &'ast ItemEnum) {
        let members = i.variants.iter().flat_map(|v| field_members(&v.fields)).collect();
        self.record(&i.ident, &i.attrs, DeclarationKind::Enum, members);
    }

    fn visit_item_union(&mut self, i: &'ast ItemUnion) {
        let members = i.fields.named.iter().map(field_member).collect();
        self.record(&i.ident, &i.attrs, DeclarationKind::Union, members);
    }

    fn visit_item_trait(&mut self, i: &'ast ItemTrait) {
        let members = i
            .items
            .iter()
            .filter_map(|item| match item {
                TraitItem::Fn(f) => Some(Member {
                    kind: ElementKind::Method,
                    ident: Some(&f.sig.ident),
                    ty: None,
                    vis: None,
                    attrs: &f.attrs,
                    span: f.span(),
                }),
                TraitItem::Const(c) => Some(Member {
                    kind: ElementKind::Constant,
                    ident: Some(&c.ident),
                    ty: Some(&c.ty),
                    vis: None,
                    attrs: &c.attrs,
                    span: c.span(),
                }),
                _ => None,
            })
            .collect();
        self.record(&i.ident, &i.attrs, DeclarationKind::Trait, members);
    }

    fn visit_item_impl(&mut self, i: &'ast ItemImpl) {
        // Impl blocks of anything but a plain path type cannot host columns
        let Type::Path(self_ty) = i.self_ty.as_ref() else {
            return;
        };
        let Some(segment) = self_ty.path.segments.last() else {
            return;
        };
        let members = i
            .items
            .iter()
            .filter_map(|item| match item {
                ImplItem::Fn(f) => Some(Member {
                    kind: ElementKind::Method,
                    ident: Some(&f.sig.ident),
                    ty: None,
                    vis: Some(&f.vis),
                    attrs: &f.attrs,
                    span: f.span(),
                }),
                ImplItem::Const(c) => Some(Member {
                    kind: ElementKind::Constant,
                    ident: Some(&c.ident),
                    ty: Some(&c.ty),
                    vis: Some(&c.vis),
                    attrs: &c.attrs,
                    span: c.span(),
                }),
                _ => None,
            })
            .collect();
        self.record(&segment.ident, &[], DeclarationKind::Impl, members);
    }
}

impl Round {
    /// Scan a parsed file whose items live under `module_path`.
    pub fn from_file(
        file: &syn::File,
        module_path: Vec<String>,
        markers: &MarkerSet,
    ) -> ProcessingResult<Self> {
        let mut visitor = SourceVisitor::new(markers, module_path);
        visitor.visit_file(file);
        visitor.into_round()
    }

    /// Scan the single item handed to a derive macro.
    pub fn from_derive_input(input: &DeriveInput, markers: &MarkerSet) -> ProcessingResult<Self> {
        let mut visitor = SourceVisitor::new(markers, Vec::new());
        visitor.visit_derive(input);
        visitor.into_round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{DeclarationId, LocatorKeys};
    use crate::error::ErrorKind;
    use syn::parse_quote;

    const MARKERS: MarkerSet = MarkerSet {
        type_attr: "storio_sqlite_type",
        column_attr: "storio_sqlite_column",
        type_display: "StorIOSQLiteType",
        column_display: "StorIOSQLiteColumn",
        locator_keys: LocatorKeys {
            common: "table",
            insert: None,
            update: None,
            delete: None,
        },
    };

    fn scan(file: syn::File) -> ProcessingResult<Round> {
        Round::from_file(&file, vec!["crate".to_owned()], &MARKERS)
    }

    #[test]
    fn test_scan_marked_struct() {
        let round = scan(parse_quote! {
            #[storio_sqlite_type(table = "books")]
            pub struct Book {
                #[storio_sqlite_column(name = "id", key)]
                pub id: i64,
                #[storio_sqlite_column(name = "title")]
                title: String,
                pub unmarked: bool,
            }
        })
        .unwrap();

        assert_eq!(round.declarations.len(), 1);
        let book = &round.declarations[0];
        assert_eq!(book.qualified_name(), "crate::Book");
        assert_eq!(book.marker.as_ref().unwrap().locator, "books");

        assert_eq!(round.columns.len(), 2);
        assert_eq!(round.columns[0].name(), "id");
        assert!(round.columns[0].marker.key);
        assert!(!round.columns[0].modifiers.private);
        assert_eq!(round.columns[1].name(), "title");
        assert!(round.columns[1].modifiers.private);
        assert_eq!(round.columns[1].enclosing, DeclarationId(0));
        assert_eq!(round.columns[1].location.element, "crate::Book::title");
    }

    #[test]
    fn test_scan_nested_modules_and_skip_unmarked() {
        let round = scan(parse_quote! {
            pub struct Plain { pub x: i32 }

            pub mod models {
                #[storio_sqlite_type(table = "authors")]
                pub struct Author {
                    #[storio_sqlite_column(name = "id", key)]
                    pub id: i64,
                }
            }
        })
        .unwrap();

        assert_eq!(round.declarations.len(), 1);
        assert_eq!(round.declarations[0].qualified_name(), "crate::models::Author");
    }

    #[test]
    fn test_scan_unmarked_struct_with_columns() {
        let round = scan(parse_quote! {
            pub struct Orphan {
                #[storio_sqlite_column(name = "id", key)]
                pub id: i64,
            }
        })
        .unwrap();

        assert_eq!(round.declarations.len(), 1);
        assert!(!round.declarations[0].is_marked());
        assert_eq!(round.columns.len(), 1);
    }

    #[test]
    fn test_scan_methods_and_enums() {
        let round = scan(parse_quote! {
            pub enum Shape {
                Circle { #[storio_sqlite_column(name = "r")] r: f64 },
            }

            impl Shape {
                #[storio_sqlite_column(name = "area")]
                pub fn area(&self) -> f64 { 0.0 }
            }
        })
        .unwrap();

        assert_eq!(round.declarations.len(), 2);
        assert_eq!(round.declarations[0].kind, DeclarationKind::Enum);
        assert_eq!(round.declarations[1].kind, DeclarationKind::Impl);
        assert_eq!(round.columns[1].kind, ElementKind::Method);
        assert!(round.columns[1].ty.is_none());
    }

    #[test]
    fn test_scan_malformed_marker() {
        let err = scan(parse_quote! {
            #[storio_sqlite_type(table = "books")]
            pub struct Book {
                #[storio_sqlite_column(name = "id", primary)]
                pub id: i64,
            }
        })
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedMarker);
        assert_eq!(err.location().element, "crate::Book::id");
    }

    #[test]
    fn test_scan_tuple_field() {
        let err = scan(parse_quote! {
            #[storio_sqlite_type(table = "ids")]
            pub struct Id(#[storio_sqlite_column(name = "id", key)] pub i64);
        })
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(err.message().contains("named fields"));
    }

    #[test]
    fn test_scan_derive_input() {
        let input: DeriveInput = parse_quote! {
            #[storio_sqlite_type(table = "books")]
            pub struct Book {
                #[storio_sqlite_column(name = "id", key)]
                pub id: i64,
            }
        };
        let round = Round::from_derive_input(&input, &MARKERS).unwrap();
        assert_eq!(round.declarations[0].qualified_name(), "Book");
        assert_eq!(round.columns.len(), 1);
    }

    #[test]
    fn test_scan_raw_identifiers() {
        let round = scan(parse_quote! {
            pub mod r#type {
                #[storio_sqlite_type(table = "books")]
                pub struct r#Book {
                    #[storio_sqlite_column(name = "id", key)]
                    pub id: i64,
                }
            }
        })
        .unwrap();

        assert_eq!(round.declarations[0].simple_name, "Book");
        assert_eq!(round.declarations[0].qualified_name(), "crate::type::Book");
    }

    #[test]
    fn test_scan_skips_function_bodies() {
        let round = scan(parse_quote! {
            pub fn setup() {
                #[storio_sqlite_type(table = "scratch")]
                struct Scratch {
                    #[storio_sqlite_column(name = "id", key)]
                    pub id: i64,
                }
            }

            const SEED: () = {
                #[storio_sqlite_type(table = "seed")]
                struct Seed {
                    #[storio_sqlite_column(name = "id", key)]
                    pub id: i64,
                }
            };
        })
        .unwrap();

        assert!(round.is_empty());
    }
}
