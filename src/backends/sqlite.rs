//! Row-oriented relational storage addressed by table name.
//!
//! ```ignore
//! #[storio_sqlite_type(table = "books")]
//! pub struct Book {
//!     #[storio_sqlite_column(name = "_id", key)]
//!     pub id: i64,
//!     #[storio_sqlite_column(name = "title")]
//!     pub title: String,
//! }
//! ```

use super::Backend;
use crate::elements::{LocatorKeys, MarkerSet};
use crate::generate::UnitNaming;
use crate::meta::Operation;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteBackend;

impl Backend for SqliteBackend {
    const NAME: &'static str = "sqlite";

    const MARKERS: MarkerSet = MarkerSet {
        type_attr: "storio_sqlite_type",
        column_attr: "storio_sqlite_column",
        type_display: "StorIOSQLiteType",
        column_display: "StorIOSQLiteColumn",
        locator_keys: LocatorKeys {
            common: "table",
            insert: None,
            update: None,
            delete: None,
        },
    };

    const NAMING: UnitNaming = UnitNaming {
        resolver_prefix: "StorIOSQLite",
        resolver_slug: "storio_sqlite",
        mapping_prefix: "SQLite",
        mapping_slug: "sqlite",
    };

    const LOCATOR_NOUN: &'static str = "Table name";

    // A table serves every operation
    const OPERATIONS: &'static [Operation] = &[];

    const LOCATOR_METHOD: &'static str = "table";

    const MAPPING_TYPE: &'static str = "SQLiteTypeMapping";

    const DEFAULT_RUNTIME: &'static str = "storio::sqlite";
}
