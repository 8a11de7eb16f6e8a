//! Module define the capabilities consumed from the underlying store.
//!
//! Store is an ordered map of string keys to JSON values. All derived index
//! entries and primary documents live in the same store, refer to
//! [codec][crate::codec] for the key layout. [MemStore] is an in-memory
//! implementation of [Store] trait, useful for testing and as a reference
//! for implementing adapters over disk based stores.

use serde_json::Value;

use crate::{Error, Result};

mod mem;

pub use mem::MemStore;

/// Single write operation within a batch, refer [Store::batch].
#[derive(Clone, Debug, PartialEq)]
pub enum Write {
    Put { key: String, value: Value },
    Del { key: String },
}

impl Write {
    pub fn put(key: &str, value: Value) -> Write {
        Write::Put {
            key: key.to_string(),
            value,
        }
    }

    pub fn del(key: &str) -> Write {
        Write::Del {
            key: key.to_string(),
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            Write::Put { key, .. } => key,
            Write::Del { key } => key,
        }
    }
}

/// Trait to be implemented by the underlying key,value store.
///
/// Implementations shall be thread safe for concurrent calls, this crate
/// does not serialize access to the store.
pub trait Store {
    /// Get the value for `key`. Missing keys shall be reported
    /// as [Error::KeyNotFound].
    fn get(&self, key: &str) -> Result<Value>;

    /// Set `value` for `key`, older value if any is overwritten.
    fn put(&self, key: &str, value: Value) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn del(&self, key: &str) -> Result<()>;

    /// Return whether store support atomic [Store::batch].
    fn has_batch(&self) -> bool {
        false
    }

    /// Apply all operations in `ops`, in order, as a single atomic write.
    /// Either all operations are visible to readers or none.
    fn batch(&self, ops: Vec<Write>) -> Result<()> {
        err_at!(NotImplemented, msg: "batch of {} writes", ops.len())
    }

    /// Return entries whose key starts with `prefix`, in key order.
    fn range(&self, prefix: &str) -> Result<Vec<(String, Value)>> {
        err_at!(NotImplemented, msg: "range over {:?}", prefix)
    }
}
