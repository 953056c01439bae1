use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use storio_codegen::backends::Backend;
use storio_codegen::config::ProcessorConfig;
use storio_codegen::elements::Round;
use storio_codegen::error::CodegenError;
use storio_codegen::processor::Processor;

/// Derives the SQLite put, get and delete resolvers and the type mapping
/// for a struct.
///
/// # Attributes
///
/// - `#[storio_sqlite_type(table = "...")]` - **Required**. Table the type is stored in
/// - `#[storio_sqlite_column(name = "...", key, ignore_null)]` - Marks a persisted field.
///   At least one column must be a `key`.
///
/// The struct must implement `Default` and every marked field must be
/// `pub`. Generated code refers to the runtime at `storio::sqlite`.
///
/// # Examples
///
/// ```ignore
/// use storio_macros::StorIOSQLiteType;
///
/// #[derive(StorIOSQLiteType, Default)]
/// #[storio_sqlite_type(table = "books")]
/// pub struct Book {
///     #[storio_sqlite_column(name = "_id", key)]
///     pub id: i64,
///     #[storio_sqlite_column(name = "title")]
///     pub title: String,
///     #[storio_sqlite_column(name = "author", ignore_null)]
///     pub author: Option<String>,
/// }
/// // Generates: BookStorIOSQLitePutResolver
/// // Generates: BookStorIOSQLiteGetResolver
/// // Generates: BookStorIOSQLiteDeleteResolver
/// // Generates: BookSQLiteTypeMapping
/// ```
#[cfg(feature = "sqlite")]
#[proc_macro_derive(StorIOSQLiteType, attributes(storio_sqlite_type, storio_sqlite_column))]
pub fn storio_sqlite_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(storio_codegen::backends::SqliteBackend, &input).into()
}

/// Derives the ContentResolver put, get and delete resolvers and the type
/// mapping for a struct.
///
/// # Attributes
///
/// - `#[storio_content_resolver_type(uri = "...")]` - Common URI for every operation.
///   `insert_uri`, `update_uri` and `delete_uri` override it per operation; when
///   `uri` is absent all three are required.
/// - `#[storio_content_resolver_column(name = "...", key, ignore_null)]` - Marks a
///   persisted field.
///
/// # Examples
///
/// ```ignore
/// use storio_macros::StorIOContentResolverType;
///
/// #[derive(StorIOContentResolverType, Default)]
/// #[storio_content_resolver_type(uri = "content://books", delete_uri = "content://books/trash")]
/// pub struct Book {
///     #[storio_content_resolver_column(name = "_id", key)]
///     pub id: i64,
/// }
/// ```
#[cfg(feature = "content-resolver")]
#[proc_macro_derive(
    StorIOContentResolverType,
    attributes(storio_content_resolver_type, storio_content_resolver_column)
)]
pub fn storio_content_resolver_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(storio_codegen::backends::ContentResolverBackend, &input).into()
}

fn expand<B: Backend>(backend: B, input: &DeriveInput) -> proc_macro2::TokenStream {
    let result = Round::from_derive_input(input, &B::MARKERS)
        .map_err(CodegenError::from)
        .and_then(|round| {
            Ok(Processor::new(backend, &ProcessorConfig::default())?.process(&round)?)
        });

    match result {
        Ok(output) => output.to_token_stream(),
        Err(CodegenError::Processing(error)) => error.to_compile_error(),
        Err(error) => syn::Error::new_spanned(&input.ident, error.to_string()).to_compile_error(),
    }
}
