//! Attaching columns to their types and whole-graph checks.

use std::collections::BTreeMap;

use log::trace;

use crate::backends::Backend;
use crate::elements::DeclarationId;
use crate::error::{ProcessingError, ProcessingResult};
use crate::meta::{ColumnMeta, TypeMeta};

/// Type shells keyed by declaration, iterated in discovery order
pub type Shells = BTreeMap<DeclarationId, TypeMeta>;

/// Add a column to its owning shell.
///
/// A column whose storage name, or field name, is already taken in the
/// shell is rejected; the later of the two in discovery order is reported.
pub fn attach<B: Backend>(column: ColumnMeta, shells: &mut Shells) -> ProcessingResult<()> {
    let markers = &B::MARKERS;

    let Some(shell) = shells.get_mut(&column.owner) else {
        return Err(ProcessingError::orphan_column(
            &column.location,
            format!(
                "Field marked with {} annotation should be placed in class marked by {} annotation",
                markers.column_display, markers.type_display
            ),
        ));
    };

    let taken = shell.columns.iter().any(|existing| {
        existing.column_name == column.column_name || existing.field_name == column.field_name
    });
    if taken {
        return Err(ProcessingError::duplicate_column(
            &column.location,
            format!("Column name already used in this class: {}", column.column_name),
        ));
    }

    trace!(
        "Processor: attached column {} to {}",
        column.column_name,
        shell.qualified_name()
    );
    shell.columns.push(column);
    Ok(())
}

/// Every type needs at least one column and at least one key column.
pub fn validate_graph<B: Backend>(shells: &Shells) -> ProcessingResult<()> {
    let markers = &B::MARKERS;

    for meta in shells.values() {
        if meta.columns.is_empty() {
            return Err(ProcessingError::empty_type(
                &meta.location,
                format!(
                    "Class marked with {} annotation should have at least one field marked with {} annotation",
                    markers.type_display, markers.column_display
                ),
            ));
        }

        if meta.key_columns().next().is_none() {
            return Err(ProcessingError::missing_key(
                &meta.location,
                format!(
                    "Class marked with {} annotation should have at least one KEY field marked with {} annotation",
                    markers.type_display, markers.column_display
                ),
            ));
        }
    }

    Ok(())
}
