//! Prelude module for convenient imports.
//!
//! ```rust
//! use storio_codegen::prelude::*;
//! ```

pub use crate::backends::Backend;
#[cfg(feature = "content-resolver")]
pub use crate::backends::ContentResolverBackend;
#[cfg(feature = "sqlite")]
pub use crate::backends::SqliteBackend;
pub use crate::config::ProcessorConfig;
pub use crate::elements::{Round, SnapshotSchema};
pub use crate::error::{
    CodegenError, CodegenResult, ErrorKind, ProcessingError, ProcessingResult,
};
pub use crate::generate::{
    DeleteGenerator, GeneratedUnit, GenerationContext, Generator, GeneratorKind, GetGenerator,
    MappingGenerator, PutGenerator,
};
pub use crate::introspection::{ColumnType, FieldType, RustTypeIntrospector, TypeIntrospector};
pub use crate::meta::{ColumnMeta, Operation, StorageLocator, TypeMeta};
pub use crate::processor::{ProcessingOutput, Processor};
pub use crate::{process_schema, process_source};
