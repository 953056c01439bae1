use std::marker::PhantomData;

use quote::{format_ident, quote};

use super::{
    GeneratedUnit, GenerationContext, Generator, GeneratorKind,
    emit::{content_value_puts, doc, key_where_args, key_where_clause, lit},
};
use crate::backends::Backend;
use crate::meta::{Operation, TypeMeta};

/// Emits `{Type}{Prefix}PutResolver`: insert and update queries plus the
/// column values of an instance. Inserts go to the insert locator, updates
/// to the update locator, each falling back to the common one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PutGenerator<B>(PhantomData<B>);

impl<B: Backend> Generator for PutGenerator<B> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Put
    }

    fn generate(&self, meta: &TypeMeta, context: &GenerationContext) -> GeneratedUnit {
        let naming = B::NAMING;
        let runtime = &context.runtime;
        let ty = meta.type_path();
        let resolver = naming.unit_ident(meta, GeneratorKind::Put);
        let locate = format_ident!("{}", B::LOCATOR_METHOD);

        let insert_locator = lit(meta.locators.resolve(Operation::Insert));
        let update_locator = lit(meta.locators.resolve(Operation::Update));
        let where_clause = lit(&key_where_clause(meta));
        let where_args = key_where_args(meta, runtime);
        let puts = content_value_puts(meta);
        let capacity = meta.columns.len();

        let docs = doc(
            context,
            format!("Generated put resolver for `{}`.", meta.qualified_name()),
        );

        let tokens = quote! {
            #docs
            #[derive(Debug, Clone, Copy, Default)]
            pub struct #resolver;

            impl #runtime::PutResolver<#ty> for #resolver {
                fn map_to_insert_query(&self, _object: &#ty) -> #runtime::InsertQuery {
                    #runtime::InsertQuery::builder()
                        .#locate(#insert_locator)
                        .build()
                }

                fn map_to_update_query(&self, object: &#ty) -> #runtime::UpdateQuery {
                    #runtime::UpdateQuery::builder()
                        .#locate(#update_locator)
                        .where_clause(#where_clause)
                        .where_args(#where_args)
                        .build()
                }

                fn map_to_content_values(&self, object: &#ty) -> #runtime::ContentValues {
                    let mut content_values = #runtime::ContentValues::with_capacity(#capacity);
                    #(#puts)*
                    content_values
                }
            }
        };

        GeneratedUnit {
            kind: GeneratorKind::Put,
            type_name: meta.qualified_name(),
            unit_name: resolver.to_string(),
            file_stem: naming.file_stem(meta, GeneratorKind::Put),
            tokens,
        }
    }
}
