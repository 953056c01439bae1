//! Token fragments shared by the backend generators.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::LitStr;

use super::GenerationContext;
use crate::introspection::ColumnType;
use crate::meta::{ColumnMeta, TypeMeta};

/// `#[doc = "..."]`, or nothing when docs are switched off
pub fn doc(context: &GenerationContext, text: impl AsRef<str>) -> TokenStream {
    if !context.docs {
        return TokenStream::new();
    }
    let text = format!(" {}", text.as_ref());
    quote! { #[doc = #text] }
}

pub fn lit(value: &str) -> LitStr {
    LitStr::new(value, Span::call_site())
}

/// `"id = ? AND name = ?"` over the key columns in column order
pub fn key_where_clause(meta: &TypeMeta) -> String {
    meta.key_columns()
        .map(|column| format!("{} = ?", column.column_name))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `vec![Value::from(..), ..]` with one argument per key column
pub fn key_where_args(meta: &TypeMeta, runtime: &syn::Path) -> TokenStream {
    let args = meta.key_columns().map(|column| {
        let field = &column.field;
        quote! { #runtime::Value::from(::core::clone::Clone::clone(&object.#field)) }
    });
    quote! { ::std::vec![#(#args),*] }
}

/// Statements filling `content_values` from `object`, one per column.
/// Columns with `ignore_null` are only written when present.
pub fn content_value_puts(meta: &TypeMeta) -> Vec<TokenStream> {
    meta.columns.iter().map(content_value_put).collect()
}

fn content_value_put(column: &ColumnMeta) -> TokenStream {
    let field = &column.field;
    let name = lit(&column.column_name);
    if column.skips_absent() {
        quote! {
            if let ::core::option::Option::Some(value) = &object.#field {
                content_values.put(#name, ::core::clone::Clone::clone(value));
            }
        }
    } else {
        quote! {
            content_values.put(#name, ::core::clone::Clone::clone(&object.#field));
        }
    }
}

/// Statements assigning every column of `object` from `cursor`
pub fn cursor_reads(meta: &TypeMeta) -> Vec<TokenStream> {
    meta.columns.iter().map(cursor_read).collect()
}

fn cursor_read(column: &ColumnMeta) -> TokenStream {
    let field = &column.field;
    let name = lit(&column.column_name);
    let read = typed_read(column.field_type.column_type);

    if column.field_type.nullable {
        quote! {
            {
                let index = cursor.column_index_or_err(#name)?;
                object.#field = if cursor.is_null(index) {
                    ::core::option::Option::None
                } else {
                    ::core::option::Option::Some(#read)
                };
            }
        }
    } else {
        quote! {
            {
                let index = cursor.column_index_or_err(#name)?;
                object.#field = #read;
            }
        }
    }
}

fn typed_read(column_type: ColumnType) -> TokenStream {
    match column_type {
        ColumnType::Boolean => quote! { cursor.get_i32(index)? == 1 },
        ColumnType::Int8 => quote! { cursor.get_i8(index)? },
        ColumnType::Int16 => quote! { cursor.get_i16(index)? },
        ColumnType::Int32 => quote! { cursor.get_i32(index)? },
        ColumnType::Int64 => quote! { cursor.get_i64(index)? },
        ColumnType::Float32 => quote! { cursor.get_f32(index)? },
        ColumnType::Float64 => quote! { cursor.get_f64(index)? },
        ColumnType::String => quote! { cursor.get_string(index)? },
        ColumnType::ByteArray => quote! { cursor.get_blob(index)? },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::DeclarationId;
    use crate::error::Location;
    use crate::introspection::FieldType;
    use crate::meta::StorageLocator;
    use syn::parse_quote;

    fn column(field: &str, column_name: &str, field_type: FieldType, key: bool, ignore_null: bool) -> ColumnMeta {
        ColumnMeta {
            owner: DeclarationId(0),
            field: syn::parse_str(field).unwrap(),
            field_name: field.to_owned(),
            column_name: column_name.to_owned(),
            field_type,
            is_key: key,
            ignore_null,
            location: Location::detached(field),
        }
    }

    fn book() -> TypeMeta {
        let mut meta = TypeMeta::shell(
            "Book",
            Vec::new(),
            StorageLocator::default(),
            Location::detached("Book"),
        );
        meta.columns = vec![
            column("id", "_id", FieldType::required(ColumnType::Int64), true, false),
            column("author", "author", FieldType::nullable(ColumnType::String), false, true),
            column("isbn", "isbn", FieldType::required(ColumnType::String), true, false),
            column("read", "read", FieldType::required(ColumnType::Boolean), false, false),
        ];
        meta
    }

    #[test]
    fn test_key_where_clause() {
        assert_eq!(key_where_clause(&book()), "_id = ? AND isbn = ?");
    }

    #[test]
    fn test_key_where_args_only_use_keys() {
        let runtime: syn::Path = parse_quote!(storio::sqlite);
        let rendered = key_where_args(&book(), &runtime).to_string();
        assert!(rendered.contains("object . id"));
        assert!(rendered.contains("object . isbn"));
        assert!(!rendered.contains("object . author"));
    }

    #[test]
    fn test_ignore_null_put_is_conditional() {
        let puts = content_value_puts(&book());
        assert_eq!(puts.len(), 4);
        assert!(puts[1].to_string().starts_with("if let"));
        assert!(!puts[0].to_string().starts_with("if let"));
    }

    #[test]
    fn test_cursor_reads() {
        let reads = cursor_reads(&book());
        assert!(reads[0].to_string().contains("get_i64"));
        assert!(reads[1].to_string().contains("is_null"));
        assert!(reads[3].to_string().contains("get_i32 (index) ? == 1"));
    }

    #[test]
    fn test_doc_switch() {
        let runtime: syn::Path = parse_quote!(storio::sqlite);
        let on = GenerationContext { runtime: runtime.clone(), docs: true };
        let off = GenerationContext { runtime, docs: false };
        assert!(doc(&on, "Put resolver").to_string().contains("Put resolver"));
        assert!(doc(&off, "Put resolver").is_empty());
    }
}
