//! Module implement per-index accessor methods.
//!
//! For every declared index, two method names are generated by capitalizing
//! the index name and prefixing it with `by` and `getBy`. Say, declaring
//! index `username` generates `byUsername` and `getByUsername`. Method names
//! are resolved through a dispatch [Table], refer
//! [IndexedStore::call][crate::IndexedStore::call].

use serde_json::Value;

use std::collections::HashMap;

use crate::{store::Store, IndexedStore, Result};

/// Method generated for a declared index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    By,
    GetBy,
}

/// Dispatch entry, binds a generated method name to its index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub index: String,
    pub method: Method,
}

/// Return the generated method names, `(by<Name>, getBy<Name>)`, for index
/// `name`.
pub fn to_method_names(name: &str) -> (String, String) {
    let cap = capitalize(name);
    (format!("by{}", cap), format!("getBy{}", cap))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) => ch.to_uppercase().chain(chars).collect(),
        None => String::default(),
    }
}

/// Dispatch table from generated method name to [Entry].
#[derive(Clone, Debug, Default)]
pub struct Table {
    names: Vec<String>,
    entries: HashMap<String, Entry>,
}

impl Table {
    pub fn new() -> Table {
        Table::default()
    }

    /// Install accessor methods for `index`. Method names that are
    /// already installed are left untouched, return the number of
    /// methods newly installed.
    pub fn install(&mut self, index: &str) -> usize {
        let (by, get_by) = to_method_names(index);

        let mut n = 0;
        for (name, method) in vec![(by, Method::By), (get_by, Method::GetBy)] {
            if self.entries.contains_key(&name) {
                continue;
            }
            let entry = Entry {
                index: index.to_string(),
                method,
            };
            self.entries.insert(name.clone(), entry);
            self.names.push(name);
            n += 1;
        }
        n
    }

    pub fn resolve(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Return installed method names in the order of index declaration.
    pub fn to_names(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Accessor bound to a declared index, created via
/// [IndexedStore::accessor][crate::IndexedStore::accessor].
pub struct Accessor<'a, S> {
    db: &'a IndexedStore<S>,
    index: String,
}

impl<'a, S> Accessor<'a, S>
where
    S: Store,
{
    pub(crate) fn new(db: &'a IndexedStore<S>, index: &str) -> Accessor<'a, S> {
        Accessor {
            db,
            index: index.to_string(),
        }
    }

    pub fn to_index_name(&self) -> String {
        self.index.clone()
    }

    pub fn by<V>(&self, value: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        self.db.by(&self.index, value)
    }

    pub fn get_by<V>(&self, value: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        self.db.get_by(&self.index, value)
    }

    /// Dispatch `method` on this accessor.
    pub fn call<V>(&self, method: Method, value: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        match method {
            Method::By => self.by(value),
            Method::GetBy => self.get_by(value),
        }
    }
}

#[cfg(test)]
#[path = "accessor_test.rs"]
mod accessor_test;
