//! Package implement secondary indexes on top of an ordered key,value store.
//!
//! Underlying store is treated as an opaque ordered map that supports `put`,
//! `get`, `del` on primary keys, optionally an atomic `batch` of writes and
//! ordered `range` iteration, refer to [store::Store]. [IndexedStore] wraps
//! such a store, applications can declare one or more document fields as
//! indexed and the wrapper shall keep a derived entry for each of them,
//! mapping the field's value to the document's primary key.
//!
//! ```ignore
//! let store = Arc::new(store::MemStore::new("users"));
//! let mut users = IndexedStore::new(Config::new("users"), store)?;
//! users.index("username")?.index("email")?;
//!
//! users.put(1, json!({"username": "foobar", "email": "foo@bar"}))?;
//! let doc = users.by("username", "foobar")?;
//! let doc = users.find(json!({"email": "foo@bar"}))?;
//! let doc = users.call("byUsername", "foobar")?;
//! users.del(1)?;
//! ```
//!
//! Derived entries are stored in the same store as the documents, under the
//! key `/<index-name>/<field-value>`, and their value is the primary key of
//! the document in string form. Primary keys whose string form looks like a
//! derived key are rejected.
//!
//! **Uniqueness**: there is no uniqueness constraint across documents. When
//! two live documents carry the same value for an indexed field, the derived
//! entry points to the document that was written last. Updating or deleting
//! an earlier document leaves that entry untouched.
//!
//! **Consistency**: when the store supports atomic batch, every `put` and
//! `del` is applied as a single batch. Otherwise writes are applied one by one
//! and a failure half way is reported, but not rolled back.

use std::{error, fmt, result};

/// Short form to compose Error values.
///
/// Here are few possible ways:
///
/// ```ignore
/// use crate::Error;
/// err_at!(KeyNotFound, msg: "missing key {:?}", key);
/// ```
///
/// ```ignore
/// use crate::Error;
/// err_at!(IOError, fs::read(file_path));
/// ```
///
/// ```ignore
/// use crate::Error;
/// err_at!(FailConfig, toml::from_str(text), "config {:?}", loc);
/// ```
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

pub mod accessor;
pub mod codec;
mod config;
mod indexed;
mod stats;
pub mod store;

pub use config::Config;
pub use indexed::IndexedStore;
pub use stats::Stats;

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location, and a message.
#[derive(Clone, PartialEq)]
pub enum Error {
    /// Primary key or derived index key is missing in the store.
    KeyNotFound(String, String),
    /// Index name was never declared on the [IndexedStore] instance.
    NotIndexed(String, String),
    InvalidInput(String, String),
    NotImplemented(String, String),
    FailConfig(String, String),
    FailJson(String, String),
    IOError(String, String),
    Fatal(String, String),
}

/// Discriminator over [Error] values, as seen by applications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotIndexed,
    Store,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyNotFound(_, _) => ErrorKind::NotFound,
            Error::NotIndexed(_, _) => ErrorKind::NotIndexed,
            _ => ErrorKind::Store,
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            ErrorKind::NotFound => write!(f, "NotFoundError"),
            ErrorKind::NotIndexed => write!(f, "NotIndexedError"),
            ErrorKind::Store => write!(f, "StoreError"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            NotIndexed(p, msg) => write!(f, "{} NotIndexed: {}", p, msg),
            InvalidInput(p, msg) => write!(f, "{} InvalidInput: {}", p, msg),
            NotImplemented(p, msg) => write!(f, "{} NotImplemented: {}", p, msg),
            FailConfig(p, msg) => write!(f, "{} FailConfig: {}", p, msg),
            FailJson(p, msg) => write!(f, "{} FailJson: {}", p, msg),
            IOError(p, msg) => write!(f, "{} IOError: {}", p, msg),
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;
