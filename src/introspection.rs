//! Classification of host field types into column types.
//!
//! The processor never looks at a field type directly. Everything goes
//! through a [`TypeIntrospector`], which either maps the type onto the
//! closed [`ColumnType`] set or rejects it.

use quote::ToTokens;
use strum::{Display, EnumIter};
use syn::{GenericArgument, PathArguments, Type};
use thiserror::Error;

/// Storage-side semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ColumnType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    ByteArray,
}

impl ColumnType {
    /// Primitives cannot represent an absent value on their own
    pub fn is_primitive(&self) -> bool {
        !matches!(self, ColumnType::String | ColumnType::ByteArray)
    }
}

/// Result of classifying a field type: the column type plus whether the
/// host representation can be absent (`Option<T>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl FieldType {
    pub fn required(column_type: ColumnType) -> Self {
        Self {
            column_type,
            nullable: false,
        }
    }

    pub fn nullable(column_type: ColumnType) -> Self {
        Self {
            column_type,
            nullable: true,
        }
    }

    /// A primitive that can never be absent, such as `bool` or `i64`
    pub fn is_non_nullable_primitive(&self) -> bool {
        self.column_type.is_primitive() && !self.nullable
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported type {description}")]
pub struct UnsupportedType {
    pub description: String,
}

impl UnsupportedType {
    fn of(ty: &Type) -> Self {
        Self {
            description: ty.to_token_stream().to_string(),
        }
    }
}

/// Maps a declared field type to its column representation.
pub trait TypeIntrospector {
    fn classify(&self, ty: &Type) -> Result<FieldType, UnsupportedType>;
}

/// Introspector for plain Rust field types.
///
/// Supported: `bool`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64`, `String`,
/// `Vec<u8>`, and `Option` of any of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeIntrospector;

impl TypeIntrospector for RustTypeIntrospector {
    fn classify(&self, ty: &Type) -> Result<FieldType, UnsupportedType> {
        if let Some(inner) = option_inner(ty) {
            return scalar(inner)
                .map(FieldType::nullable)
                .ok_or_else(|| UnsupportedType::of(ty));
        }
        scalar(ty)
            .map(FieldType::required)
            .ok_or_else(|| UnsupportedType::of(ty))
    }
}

fn scalar(ty: &Type) -> Option<ColumnType> {
    let segment = last_segment(ty)?;
    let column_type = match segment.ident.to_string().as_str() {
        "bool" => ColumnType::Boolean,
        "i8" => ColumnType::Int8,
        "i16" => ColumnType::Int16,
        "i32" => ColumnType::Int32,
        "i64" => ColumnType::Int64,
        "f32" => ColumnType::Float32,
        "f64" => ColumnType::Float64,
        "String" => ColumnType::String,
        "Vec" => {
            let element = single_generic(segment)?;
            return match last_segment(element) {
                Some(s) if s.ident == "u8" && s.arguments.is_none() => Some(ColumnType::ByteArray),
                _ => None,
            };
        }
        _ => return None,
    };
    // `String<T>` and friends are not the std types
    segment.arguments.is_none().then_some(column_type)
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    single_generic(segment)
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}

fn single_generic(segment: &syn::PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}
