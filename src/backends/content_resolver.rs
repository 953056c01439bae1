//! Cursor-oriented content-provider storage addressed by URI.
//!
//! A type either names one `uri` for every operation or a separate URI per
//! operation; any operation URI overrides the common one.
//!
//! ```ignore
//! #[storio_content_resolver_type(
//!     uri = "content://books",
//!     delete_uri = "content://books/trash"
//! )]
//! pub struct Book {
//!     #[storio_content_resolver_column(name = "_id", key)]
//!     pub id: i64,
//! }
//! ```

use super::Backend;
use crate::elements::{LocatorKeys, MarkerSet};
use crate::generate::UnitNaming;
use crate::meta::Operation;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentResolverBackend;

impl Backend for ContentResolverBackend {
    const NAME: &'static str = "content-resolver";

    const MARKERS: MarkerSet = MarkerSet {
        type_attr: "storio_content_resolver_type",
        column_attr: "storio_content_resolver_column",
        type_display: "StorIOContentResolverType",
        column_display: "StorIOContentResolverColumn",
        locator_keys: LocatorKeys {
            common: "uri",
            insert: Some("insert_uri"),
            update: Some("update_uri"),
            delete: Some("delete_uri"),
        },
    };

    const NAMING: UnitNaming = UnitNaming {
        resolver_prefix: "StorIOContentResolver",
        resolver_slug: "storio_content_resolver",
        mapping_prefix: "ContentResolver",
        mapping_slug: "content_resolver",
    };

    const LOCATOR_NOUN: &'static str = "Uri";

    const OPERATIONS: &'static [Operation] = &[Operation::Insert, Operation::Update, Operation::Delete];

    const LOCATOR_METHOD: &'static str = "uri";

    const MAPPING_TYPE: &'static str = "ContentResolverTypeMapping";

    const DEFAULT_RUNTIME: &'static str = "storio::content_resolver";
}
