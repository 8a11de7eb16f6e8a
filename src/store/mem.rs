use log::trace;
use serde_json::Value;

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering::SeqCst},
        RwLock,
    },
};

use crate::{
    store::{Store, Write},
    Error, Result,
};

/// In memory store, keeps entries sorted by key in a [BTreeMap].
///
/// Reads are concurrent, writes are serialized. Batch writes are applied
/// under a single write-lock hence atomic to readers.
pub struct MemStore {
    name: String,
    batch: bool,

    data: RwLock<BTreeMap<String, Value>>,
    n_batches: AtomicUsize,
}

impl MemStore {
    pub fn new(name: &str) -> MemStore {
        MemStore {
            name: name.to_string(),
            batch: true,

            data: RwLock::new(BTreeMap::new()),
            n_batches: AtomicUsize::new(0),
        }
    }

    /// Enable or disable batch support. With batch disabled, this store
    /// behaves like a store that can only `put`, `get` and `del`.
    pub fn set_batch(&mut self, batch: bool) -> &mut Self {
        self.batch = batch;
        self
    }

    #[inline]
    pub fn to_name(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries, documents and derived entries included.
    pub fn len(&self) -> Result<usize> {
        Ok(err_at!(Fatal, self.data.read())?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Return number of batches applied so far.
    pub fn to_batches(&self) -> usize {
        self.n_batches.load(SeqCst)
    }
}

impl Store for MemStore {
    fn get(&self, key: &str) -> Result<Value> {
        match err_at!(Fatal, self.data.read())?.get(key) {
            Some(value) => Ok(value.clone()),
            None => err_at!(KeyNotFound, msg: "{} key {:?}", self.name, key),
        }
    }

    fn put(&self, key: &str, value: Value) -> Result<()> {
        err_at!(Fatal, self.data.write())?.insert(key.to_string(), value);
        Ok(())
    }

    fn del(&self, key: &str) -> Result<()> {
        err_at!(Fatal, self.data.write())?.remove(key);
        Ok(())
    }

    fn has_batch(&self) -> bool {
        self.batch
    }

    fn batch(&self, ops: Vec<Write>) -> Result<()> {
        if !self.batch {
            return err_at!(NotImplemented, msg: "{} batch disabled", self.name);
        }

        let n = ops.len();
        {
            let mut data = err_at!(Fatal, self.data.write())?;
            for op in ops.into_iter() {
                match op {
                    Write::Put { key, value } => data.insert(key, value),
                    Write::Del { key } => data.remove(&key),
                };
            }
        }
        self.n_batches.fetch_add(1, SeqCst);
        trace!(target: "memstore", "{} applied batch of {} writes", self.name, n);

        Ok(())
    }

    fn range(&self, prefix: &str) -> Result<Vec<(String, Value)>> {
        let data = err_at!(Fatal, self.data.read())?;
        let items = data
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(items)
    }
}

#[cfg(test)]
#[path = "mem_test.rs"]
mod mem_test;
