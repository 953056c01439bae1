use std::marker::PhantomData;

use quote::quote;

use super::{
    GeneratedUnit, GenerationContext, Generator, GeneratorKind,
    emit::{cursor_reads, doc},
};
use crate::backends::Backend;
use crate::meta::TypeMeta;

/// Emits `{Type}{Prefix}GetResolver`, rebuilding an instance from a cursor
/// row. The host type must implement `Default`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetGenerator<B>(PhantomData<B>);

impl<B: Backend> Generator for GetGenerator<B> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Get
    }

    fn generate(&self, meta: &TypeMeta, context: &GenerationContext) -> GeneratedUnit {
        let naming = B::NAMING;
        let runtime = &context.runtime;
        let ty = meta.type_path();
        let resolver = naming.unit_ident(meta, GeneratorKind::Get);
        let reads = cursor_reads(meta);

        let docs = doc(
            context,
            format!("Generated get resolver for `{}`.", meta.qualified_name()),
        );

        let tokens = quote! {
            #docs
            #[derive(Debug, Clone, Copy, Default)]
            pub struct #resolver;

            impl #runtime::GetResolver<#ty> for #resolver {
                fn map_from_cursor(
                    &self,
                    cursor: &#runtime::Cursor,
                ) -> ::core::result::Result<#ty, #runtime::Error> {
                    let mut object = <#ty as ::core::default::Default>::default();
                    #(#reads)*
                    ::core::result::Result::Ok(object)
                }
            }
        };

        GeneratedUnit {
            kind: GeneratorKind::Get,
            type_name: meta.qualified_name(),
            unit_name: resolver.to_string(),
            file_stem: naming.file_stem(meta, GeneratorKind::Get),
            tokens,
        }
    }
}
