//! Per-element validation: type shells and column records.

use quote::ToTokens;

use crate::backends::Backend;
use crate::elements::{AnnotatedElement, Declaration, DeclarationKind, ElementKind, Round};
use crate::error::{ProcessingError, ProcessingResult};
use crate::introspection::TypeIntrospector;
use crate::meta::{ColumnMeta, StorageLocator, TypeMeta};

/// Build the column-less shell of a marked declaration and check its
/// locators.
///
/// The common locator alone is enough. Without it every operation locator
/// the backend knows must be present; the message names the first missing
/// operation unless all of them are missing.
pub fn build_type_shell<B: Backend>(declaration: &Declaration) -> ProcessingResult<TypeMeta> {
    let markers = &B::MARKERS;
    let qualified = declaration.qualified_name();

    if declaration.kind != DeclarationKind::Struct {
        return Err(ProcessingError::structural(
            &declaration.location,
            format!(
                "{} can be applied only to structs, not to {}: {}",
                markers.type_display, declaration.kind, qualified
            ),
        ));
    }

    let marker = declaration.marker.clone().unwrap_or_default();
    let locators = StorageLocator {
        common: marker.locator,
        insert: marker.insert_locator,
        update: marker.update_locator,
        delete: marker.delete_locator,
    };

    if locators.common.is_empty() {
        let missing: Vec<_> = B::OPERATIONS
            .iter()
            .filter(|operation| locators.operation(**operation).is_empty())
            .collect();

        if B::OPERATIONS.is_empty() || !missing.is_empty() {
            let mut message = format!(
                "{} of {} annotated with {} is null or empty",
                B::LOCATOR_NOUN,
                qualified,
                markers.type_display
            );
            if missing.len() < B::OPERATIONS.len() {
                if let Some(first) = missing.first() {
                    message.push_str(&format!(" for operation {first}"));
                }
            }
            return Err(ProcessingError::invalid_locator(&declaration.location, message));
        }
    }

    Ok(TypeMeta::shell(
        declaration.simple_name.clone(),
        declaration.module_path.clone(),
        locators,
        declaration.location.clone(),
    ))
}

/// Validate one marked element and turn it into a column record.
///
/// Checks run in a fixed order and the first failure is returned:
/// placement, access, type support, option conflicts, then the name.
pub fn build_column<B: Backend, I: TypeIntrospector + ?Sized>(
    element: &AnnotatedElement,
    round: &Round,
    introspector: &I,
) -> ProcessingResult<ColumnMeta> {
    let markers = &B::MARKERS;
    let name = element.name();
    let location = &element.location;

    if element.kind != ElementKind::Field {
        return Err(ProcessingError::structural(
            location,
            format!(
                "{} can be applied only to fields, not to {}: {}",
                markers.column_display, element.kind, name
            ),
        ));
    }

    // A dangling enclosing declaration is reported as an orphan on attach
    if let Some(enclosing) = round.declaration(element.enclosing) {
        if enclosing.kind != DeclarationKind::Struct {
            return Err(ProcessingError::structural(
                location,
                format!("Please apply {} to fields of class: {}", markers.type_display, name),
            ));
        }
        if !enclosing.is_marked() {
            return Err(ProcessingError::structural(
                location,
                format!(
                    "Please annotate class {} with {}",
                    enclosing.simple_name, markers.type_display
                ),
            ));
        }
    }

    if element.modifiers.private {
        return Err(ProcessingError::access(
            location,
            format!("{} can not be applied to private field: {}", markers.column_display, name),
        ));
    }

    if element.modifiers.immutable {
        return Err(ProcessingError::access(
            location,
            format!("{} can not be applied to final field: {}", markers.column_display, name),
        ));
    }

    let unsupported = |reason: String| {
        ProcessingError::unsupported_type(
            location,
            format!(
                "Unsupported type of field for {} annotation, if you need to serialize/deserialize field of that type -> please write your own resolver: {}",
                markers.column_display, reason
            ),
        )
    };

    let Some(ty) = element.ty.as_ref() else {
        return Err(unsupported(format!("field {name} has no declared type")));
    };
    let field_type = introspector
        .classify(ty)
        .map_err(|e| unsupported(e.to_string()))?;

    if element.marker.ignore_null && field_type.is_non_nullable_primitive() {
        return Err(ProcessingError::conflicting_options(
            location,
            format!(
                "ignore_null should not be used for primitive type: {}",
                ty.to_token_stream()
            ),
        ));
    }

    if element.marker.name.is_empty() {
        return Err(ProcessingError::invalid_name(location, "Column name is null or empty"));
    }

    Ok(ColumnMeta {
        owner: element.enclosing,
        field: element.ident.clone(),
        field_name: name,
        column_name: element.marker.name.clone(),
        field_type,
        is_key: element.marker.key,
        ignore_null: element.marker.ignore_null,
        location: location.clone(),
    })
}
