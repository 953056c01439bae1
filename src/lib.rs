//! # StorIO codegen
//!
//! Compile-time generation of object mapping code for StorIO-style storage
//! runtimes. Structs carrying a backend's type marker, and fields carrying
//! its column marker, are validated into a type model from which four units
//! are generated per type: a put resolver, a get resolver, a delete resolver
//! and a type mapping that registers the three.
//!
//! ## Features
//!
//! - **Two backends**: SQLite (`sqlite`, addressed by table) and
//!   ContentResolver (`content-resolver`, addressed by URI)
//! - **Fail fast**: the first invalid marker aborts the run with its location
//! - **Deterministic**: identical input yields byte-identical output
//! - **Three front ends**: Rust source files, derive input through
//!   `storio_macros`, or a TOML element snapshot
//!
//! ## Quick Start
//!
//! ```
//! use storio_codegen::prelude::*;
//!
//! let source = r#"
//!     #[storio_content_resolver_type(uri = "content://books")]
//!     pub struct Book {
//!         #[storio_content_resolver_column(name = "_id", key)]
//!         pub id: i64,
//!         #[storio_content_resolver_column(name = "title", ignore_null)]
//!         pub title: Option<String>,
//!     }
//! "#;
//!
//! let output = process_source(ContentResolverBackend, source, &ProcessorConfig::default()).unwrap();
//! let put = output.unit("Book", GeneratorKind::Put).unwrap();
//! assert_eq!(put.unit_name, "BookStorIOContentResolverPutResolver");
//! assert_eq!(put.file_name(), "book_storio_content_resolver_put_resolver.rs");
//! ```

pub mod backends;
pub mod config;
pub mod elements;
pub mod error;
pub mod generate;
pub mod introspection;
pub mod meta;
pub mod prelude;
pub mod processor;

use log::debug;

use crate::backends::Backend;
use crate::config::ProcessorConfig;
use crate::elements::{Round, SnapshotSchema};
use crate::error::CodegenResult;
use crate::processor::{ProcessingOutput, Processor};

/// Parse Rust source and run the pipeline for one backend.
///
/// Items are qualified with the configured module path.
pub fn process_source<B: Backend>(
    backend: B,
    source: &str,
    config: &ProcessorConfig,
) -> CodegenResult<ProcessingOutput> {
    let file = syn::parse_file(source)?;
    let round = Round::from_file(&file, config.module_segments(), &B::MARKERS)?;
    debug!("process_source: Scanned {} declaration(s)", round.declarations.len());
    Ok(Processor::new(backend, config)?.process(&round)?)
}

/// Read a TOML element snapshot and run the pipeline for one backend.
pub fn process_schema<B: Backend>(
    backend: B,
    schema: &str,
    config: &ProcessorConfig,
) -> CodegenResult<ProcessingOutput> {
    let schema = SnapshotSchema::from_toml_str(schema)?;
    let round = schema.into_round(&B::MARKERS)?;
    debug!("process_schema: Loaded {} declaration(s)", round.declarations.len());
    Ok(Processor::new(backend, config)?.process(&round)?)
}
