//! In-memory stand-in for the StorIO runtime the derives generate against.

pub mod sqlite {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Value {
        Null,
        Integer(i64),
        Real(f64),
        Text(String),
        Blob(Vec<u8>),
    }

    macro_rules! integer_values {
        ($($ty:ty),*) => {
            $(
                impl From<$ty> for Value {
                    fn from(value: $ty) -> Self {
                        Value::Integer(i64::from(value))
                    }
                }
            )*
        };
    }

    integer_values!(bool, i8, i16, i32, i64);

    impl From<f32> for Value {
        fn from(value: f32) -> Self {
            Value::Real(f64::from(value))
        }
    }

    impl From<f64> for Value {
        fn from(value: f64) -> Self {
            Value::Real(value)
        }
    }

    impl From<String> for Value {
        fn from(value: String) -> Self {
            Value::Text(value)
        }
    }

    impl From<Vec<u8>> for Value {
        fn from(value: Vec<u8>) -> Self {
            Value::Blob(value)
        }
    }

    impl<T: Into<Value>> From<Option<T>> for Value {
        fn from(value: Option<T>) -> Self {
            value.map_or(Value::Null, Into::into)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Error {
        MissingColumn(String),
        TypeMismatch(usize),
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Error::MissingColumn(name) => write!(f, "missing column {name}"),
                Error::TypeMismatch(index) => write!(f, "type mismatch at {index}"),
            }
        }
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ContentValues {
        pub values: Vec<(String, Value)>,
    }

    impl ContentValues {
        pub fn with_capacity(capacity: usize) -> Self {
            Self {
                values: Vec::with_capacity(capacity),
            }
        }

        pub fn put(&mut self, name: &str, value: impl Into<Value>) {
            self.values.push((name.to_owned(), value.into()));
        }

        pub fn get(&self, name: &str) -> Option<&Value> {
            self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
        }

        pub fn len(&self) -> usize {
            self.values.len()
        }
    }

    /// A single row
    #[derive(Debug, Clone, Default)]
    pub struct Cursor {
        columns: Vec<(String, Value)>,
    }

    impl From<ContentValues> for Cursor {
        fn from(values: ContentValues) -> Self {
            Self {
                columns: values.values,
            }
        }
    }

    impl Cursor {
        pub fn column_index_or_err(&self, name: &str) -> Result<usize, Error> {
            self.columns
                .iter()
                .position(|(n, _)| n == name)
                .ok_or_else(|| Error::MissingColumn(name.to_owned()))
        }

        pub fn is_null(&self, index: usize) -> bool {
            matches!(self.columns.get(index), Some((_, Value::Null)) | None)
        }

        fn integer(&self, index: usize) -> Result<i64, Error> {
            match self.columns.get(index) {
                Some((_, Value::Integer(value))) => Ok(*value),
                _ => Err(Error::TypeMismatch(index)),
            }
        }

        pub fn get_i8(&self, index: usize) -> Result<i8, Error> {
            i8::try_from(self.integer(index)?).map_err(|_| Error::TypeMismatch(index))
        }

        pub fn get_i16(&self, index: usize) -> Result<i16, Error> {
            i16::try_from(self.integer(index)?).map_err(|_| Error::TypeMismatch(index))
        }

        pub fn get_i32(&self, index: usize) -> Result<i32, Error> {
            i32::try_from(self.integer(index)?).map_err(|_| Error::TypeMismatch(index))
        }

        pub fn get_i64(&self, index: usize) -> Result<i64, Error> {
            self.integer(index)
        }

        pub fn get_f32(&self, index: usize) -> Result<f32, Error> {
            self.get_f64(index).map(|value| value as f32)
        }

        pub fn get_f64(&self, index: usize) -> Result<f64, Error> {
            match self.columns.get(index) {
                Some((_, Value::Real(value))) => Ok(*value),
                _ => Err(Error::TypeMismatch(index)),
            }
        }

        pub fn get_string(&self, index: usize) -> Result<String, Error> {
            match self.columns.get(index) {
                Some((_, Value::Text(value))) => Ok(value.clone()),
                _ => Err(Error::TypeMismatch(index)),
            }
        }

        pub fn get_blob(&self, index: usize) -> Result<Vec<u8>, Error> {
            match self.columns.get(index) {
                Some((_, Value::Blob(value))) => Ok(value.clone()),
                _ => Err(Error::TypeMismatch(index)),
            }
        }
    }

    macro_rules! query {
        ($query:ident, $builder:ident, $locator:ident) => {
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $query {
                pub $locator: String,
                pub where_clause: String,
                pub where_args: Vec<Value>,
            }

            impl $query {
                pub fn builder() -> $builder {
                    $builder::default()
                }
            }

            #[derive(Debug, Default)]
            pub struct $builder {
                query: $query,
            }

            impl $builder {
                pub fn $locator(mut self, $locator: &str) -> Self {
                    self.query.$locator = $locator.to_owned();
                    self
                }

                pub fn where_clause(mut self, where_clause: &str) -> Self {
                    self.query.where_clause = where_clause.to_owned();
                    self
                }

                pub fn where_args(mut self, where_args: Vec<Value>) -> Self {
                    self.query.where_args = where_args;
                    self
                }

                pub fn build(self) -> $query {
                    self.query
                }
            }
        };
    }

    pub(crate) use query;

    query!(InsertQuery, InsertQueryBuilder, table);
    query!(UpdateQuery, UpdateQueryBuilder, table);
    query!(DeleteQuery, DeleteQueryBuilder, table);

    pub trait PutResolver<T> {
        fn map_to_insert_query(&self, object: &T) -> InsertQuery;
        fn map_to_update_query(&self, object: &T) -> UpdateQuery;
        fn map_to_content_values(&self, object: &T) -> ContentValues;
    }

    pub trait GetResolver<T> {
        fn map_from_cursor(&self, cursor: &Cursor) -> Result<T, Error>;
    }

    pub trait DeleteResolver<T> {
        fn map_to_delete_query(&self, object: &T) -> DeleteQuery;
    }

    pub struct SQLiteTypeMapping<T> {
        pub put_resolver: Box<dyn PutResolver<T>>,
        pub get_resolver: Box<dyn GetResolver<T>>,
        pub delete_resolver: Box<dyn DeleteResolver<T>>,
    }

    impl<T> SQLiteTypeMapping<T> {
        pub fn new(
            put_resolver: Box<dyn PutResolver<T>>,
            get_resolver: Box<dyn GetResolver<T>>,
            delete_resolver: Box<dyn DeleteResolver<T>>,
        ) -> Self {
            Self {
                put_resolver,
                get_resolver,
                delete_resolver,
            }
        }
    }

    pub trait TypeMapped: Sized {
        fn type_mapping() -> SQLiteTypeMapping<Self>;
    }
}

pub mod content_resolver {
    pub use super::sqlite::{ContentValues, Cursor, Error, Value};

    super::sqlite::query!(InsertQuery, InsertQueryBuilder, uri);
    super::sqlite::query!(UpdateQuery, UpdateQueryBuilder, uri);
    super::sqlite::query!(DeleteQuery, DeleteQueryBuilder, uri);

    pub trait PutResolver<T> {
        fn map_to_insert_query(&self, object: &T) -> InsertQuery;
        fn map_to_update_query(&self, object: &T) -> UpdateQuery;
        fn map_to_content_values(&self, object: &T) -> ContentValues;
    }

    pub trait GetResolver<T> {
        fn map_from_cursor(&self, cursor: &Cursor) -> Result<T, Error>;
    }

    pub trait DeleteResolver<T> {
        fn map_to_delete_query(&self, object: &T) -> DeleteQuery;
    }

    pub struct ContentResolverTypeMapping<T> {
        pub put_resolver: Box<dyn PutResolver<T>>,
        pub get_resolver: Box<dyn GetResolver<T>>,
        pub delete_resolver: Box<dyn DeleteResolver<T>>,
    }

    impl<T> ContentResolverTypeMapping<T> {
        pub fn new(
            put_resolver: Box<dyn PutResolver<T>>,
            get_resolver: Box<dyn GetResolver<T>>,
            delete_resolver: Box<dyn DeleteResolver<T>>,
        ) -> Self {
            Self {
                put_resolver,
                get_resolver,
                delete_resolver,
            }
        }
    }

    pub trait TypeMapped: Sized {
        fn type_mapping() -> ContentResolverTypeMapping<Self>;
    }
}
