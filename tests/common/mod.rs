// Common test utilities and helpers

#![allow(dead_code)]

use storio_codegen::prelude::*;

pub fn sqlite(source: &str) -> CodegenResult<ProcessingOutput> {
    process_source(SqliteBackend, source, &ProcessorConfig::default())
}

pub fn content_resolver(source: &str) -> CodegenResult<ProcessingOutput> {
    process_source(ContentResolverBackend, source, &ProcessorConfig::default())
}

/// Unwrap the processing error of a failed run
pub fn processing_error(result: CodegenResult<ProcessingOutput>) -> ProcessingError {
    match result {
        Err(CodegenError::Processing(error)) => error,
        Err(other) => panic!("expected a processing error, got {other}"),
        Ok(output) => panic!("expected a processing error, got {} unit(s)", output.units.len()),
    }
}

/// Rendered code of one unit
pub fn rendered(output: &ProcessingOutput, type_name: &str, kind: GeneratorKind) -> String {
    output
        .unit(type_name, kind)
        .unwrap_or_else(|| panic!("no {kind} unit for {type_name}"))
        .render()
}
