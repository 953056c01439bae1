use std::marker::PhantomData;

use quote::{format_ident, quote};

use super::{GeneratedUnit, GenerationContext, Generator, GeneratorKind, emit::doc};
use crate::backends::Backend;
use crate::meta::TypeMeta;

/// Emits `{Type}{Prefix}TypeMapping`, bundling the three resolvers into the
/// runtime's mapping type and registering it on the host type.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingGenerator<B>(PhantomData<B>);

impl<B: Backend> Generator for MappingGenerator<B> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Mapping
    }

    fn generate(&self, meta: &TypeMeta, context: &GenerationContext) -> GeneratedUnit {
        let naming = B::NAMING;
        let runtime = &context.runtime;
        let ty = meta.type_path();
        let mapping_type = format_ident!("{}", B::MAPPING_TYPE);
        let mapping = naming.unit_ident(meta, GeneratorKind::Mapping);
        let put = naming.unit_ident(meta, GeneratorKind::Put);
        let get = naming.unit_ident(meta, GeneratorKind::Get);
        let delete = naming.unit_ident(meta, GeneratorKind::Delete);

        let docs = doc(
            context,
            format!("Generated `{}` for `{}`.", B::MAPPING_TYPE, meta.qualified_name()),
        );

        let tokens = quote! {
            #docs
            #[derive(Debug, Clone, Copy, Default)]
            pub struct #mapping;

            impl ::core::convert::From<#mapping> for #runtime::#mapping_type<#ty> {
                fn from(_: #mapping) -> Self {
                    #runtime::#mapping_type::new(
                        ::std::boxed::Box::new(#put),
                        ::std::boxed::Box::new(#get),
                        ::std::boxed::Box::new(#delete),
                    )
                }
            }

            impl #runtime::TypeMapped for #ty {
                fn type_mapping() -> #runtime::#mapping_type<Self> {
                    ::core::convert::From::from(#mapping)
                }
            }
        };

        GeneratedUnit {
            kind: GeneratorKind::Mapping,
            type_name: meta.qualified_name(),
            unit_name: mapping.to_string(),
            file_stem: naming.file_stem(meta, GeneratorKind::Mapping),
            tokens,
        }
    }
}
