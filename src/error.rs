use std::fmt;

use proc_macro2::{Span, TokenStream};
use strum::{AsRefStr, Display};
use thiserror::Error;

pub type ProcessingResult<T> = Result<T, ProcessingError>;

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Top level error for everything that happens around a processing run:
/// reading inputs, loading configuration and the run itself.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error("Failed to parse Rust source: {0}")]
    Syntax(#[from] syn::Error),
    #[error("Failed to decode TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The closed set of validation failures. Every one of them aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ErrorKind {
    /// The field's type has no column representation.
    UnsupportedType,
    /// The column marker sits on a private or immutable field.
    Access,
    /// The column marker sits on a non-field element or outside a marked struct.
    Structural,
    /// `ignore_null` on a non-nullable primitive.
    ConflictingOptions,
    /// Empty storage-side column name.
    InvalidName,
    /// The enclosing declaration has no type shell.
    OrphanColumn,
    /// Two columns of one type share a storage name.
    DuplicateColumn,
    /// Neither the common locator nor all operation locators are present.
    InvalidLocator,
    /// A persistable type without columns.
    EmptyType,
    /// A persistable type without key columns.
    MissingKey,
    /// A marker attribute that does not parse.
    MalformedMarker,
}

/// Where a diagnostic points: the qualified element name, the source file
/// when known and the span of the offending tokens.
#[derive(Debug, Clone)]
pub struct Location {
    pub element: String,
    pub file: Option<String>,
    pub span: Span,
}

impl Location {
    pub fn new(element: impl Into<String>, span: Span) -> Self {
        Self {
            element: element.into(),
            file: None,
            span,
        }
    }

    pub fn detached(element: impl Into<String>) -> Self {
        Self::new(element, Span::call_site())
    }

    pub fn in_file(mut self, file: Option<&str>) -> Self {
        self.file = file.map(str::to_owned);
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            // Line information is only meaningful for spans of parsed files
            Some(file) => {
                let start = self.span.start();
                write!(f, "{} ({}:{}:{})", self.element, file, start.line, start.column + 1)
            }
            None => write!(f, "{}", self.element),
        }
    }
}

#[derive(Error, Debug, Clone)]
#[error("{message} [{location}]")]
pub struct ProcessingError {
    pub kind: ErrorKind,
    pub location: Location,
    pub message: String,
}

impl ProcessingError {
    pub fn new(kind: ErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Render the error as a `compile_error!` invocation spanned at the
    /// offending element, for use from derive macros.
    pub fn to_compile_error(&self) -> TokenStream {
        syn::Error::new(self.location.span, &self.message).to_compile_error()
    }
}

macro_rules! kind_constructors {
    ($($fn_name:ident => $kind:ident),* $(,)?) => {
        impl ProcessingError {
            $(
                pub fn $fn_name(location: &Location, message: impl Into<String>) -> Self {
                    Self::new(ErrorKind::$kind, location.clone(), message)
                }
            )*
        }
    };
}

kind_constructors!(
    unsupported_type => UnsupportedType,
    access => Access,
    structural => Structural,
    conflicting_options => ConflictingOptions,
    invalid_name => InvalidName,
    orphan_column => OrphanColumn,
    duplicate_column => DuplicateColumn,
    invalid_locator => InvalidLocator,
    empty_type => EmptyType,
    missing_key => MissingKey,
    malformed_marker => MalformedMarker,
);

impl From<(syn::Error, &Location)> for ProcessingError {
    fn from((err, location): (syn::Error, &Location)) -> Self {
        let mut location = location.clone();
        location.span = err.span();
        Self::new(ErrorKind::MalformedMarker, location, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProcessingError::empty_type(
            &Location::detached("crate::models::Book"),
            "Class marked with StorIOSQLiteType annotation should have at least one field marked with StorIOSQLiteColumn annotation",
        );
        assert_eq!(
            err.to_string(),
            "Class marked with StorIOSQLiteType annotation should have at least one field marked with StorIOSQLiteColumn annotation [crate::models::Book]"
        );
        assert_eq!(err.kind(), ErrorKind::EmptyType);
    }

    #[test]
    fn test_compile_error_mentions_message() {
        let err = ProcessingError::access(
            &Location::detached("Book::title"),
            "StorIOSQLiteColumn can not be applied to private field: title",
        );
        let rendered = err.to_compile_error().to_string();
        assert!(rendered.contains("compile_error"));
        assert!(rendered.contains("can not be applied to private field: title"));
    }

    #[test]
    fn test_codegen_error_wraps_processing_error() {
        let err: CodegenError =
            ProcessingError::missing_key(&Location::detached("Book"), "no key").into();
        assert!(matches!(err, CodegenError::Processing(ref e) if e.kind() == ErrorKind::MissingKey));
    }
}
