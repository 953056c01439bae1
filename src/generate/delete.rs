use std::marker::PhantomData;

use quote::{format_ident, quote};

use super::{
    GeneratedUnit, GenerationContext, Generator, GeneratorKind,
    emit::{doc, key_where_args, key_where_clause, lit},
};
use crate::backends::Backend;
use crate::meta::{Operation, TypeMeta};

/// Emits `{Type}{Prefix}DeleteResolver`, a delete query matching the key
/// columns only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteGenerator<B>(PhantomData<B>);

impl<B: Backend> Generator for DeleteGenerator<B> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Delete
    }

    fn generate(&self, meta: &TypeMeta, context: &GenerationContext) -> GeneratedUnit {
        let naming = B::NAMING;
        let runtime = &context.runtime;
        let ty = meta.type_path();
        let resolver = naming.unit_ident(meta, GeneratorKind::Delete);
        let locate = format_ident!("{}", B::LOCATOR_METHOD);

        let locator = lit(meta.locators.resolve(Operation::Delete));
        let where_clause = lit(&key_where_clause(meta));
        let where_args = key_where_args(meta, runtime);

        let docs = doc(
            context,
            format!("Generated delete resolver for `{}`.", meta.qualified_name()),
        );

        let tokens = quote! {
            #docs
            #[derive(Debug, Clone, Copy, Default)]
            pub struct #resolver;

            impl #runtime::DeleteResolver<#ty> for #resolver {
                fn map_to_delete_query(&self, object: &#ty) -> #runtime::DeleteQuery {
                    #runtime::DeleteQuery::builder()
                        .#locate(#locator)
                        .where_clause(#where_clause)
                        .where_args(#where_args)
                        .build()
                }
            }
        };

        GeneratedUnit {
            kind: GeneratorKind::Delete,
            type_name: meta.qualified_name(),
            unit_name: resolver.to_string(),
            file_stem: naming.file_stem(meta, GeneratorKind::Delete),
            tokens,
        }
    }
}
