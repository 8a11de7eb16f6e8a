use log::{debug, trace, warn};
use serde_json::Value;

use std::sync::Arc;

use crate::{
    accessor::{self, Accessor},
    codec,
    stats::{Counters, Stats},
    store::{Store, Write},
    Config, Error, Result,
};

/// IndexedStore wraps an underlying [Store] and maintain secondary indexes
/// on declared document fields.
///
/// Cloning an IndexedStore is cheap, clones share the underlying store and
/// statistics, but index declarations made after cloning are local to the
/// instance that made them.
pub struct IndexedStore<S> {
    name: String,
    atomic: bool,
    store: Arc<S>,

    indexes: Vec<String>,
    accessors: accessor::Table,
    counters: Arc<Counters>,
}

impl<S> Clone for IndexedStore<S> {
    fn clone(&self) -> IndexedStore<S> {
        IndexedStore {
            name: self.name.clone(),
            atomic: self.atomic,
            store: Arc::clone(&self.store),

            indexes: self.indexes.clone(),
            accessors: self.accessors.clone(),
            counters: Arc::clone(&self.counters),
        }
    }
}

impl<S> IndexedStore<S>
where
    S: Store,
{
    /// Create a new indexed store over `store`, indexes listed in
    /// `config` are declared right away.
    pub fn new(config: Config, store: Arc<S>) -> Result<IndexedStore<S>> {
        let mut val = IndexedStore {
            name: config.name.clone(),
            atomic: config.atomic,
            store,

            indexes: vec![],
            accessors: accessor::Table::new(),
            counters: Arc::new(Counters::default()),
        };
        for name in config.indexes.iter() {
            val.index(name)?;
        }
        Ok(val)
    }

    /// Declare `name` as an indexed field, also install its accessor
    /// methods. Declaring the same index again is a no-op. Return self
    /// so that declarations can be chained.
    ///
    /// Documents written before the declaration are not indexed.
    pub fn index(&mut self, name: &str) -> Result<&mut Self> {
        if name.is_empty() || name.contains(codec::SEP) {
            return err_at!(InvalidInput, msg: "invalid index name {:?}", name);
        }

        if !self.is_indexed(name) {
            self.indexes.push(name.to_string());
            if self.accessors.install(name) < 2 {
                warn!(
                    target: "ixstore",
                    "{} accessors for {:?} collide with an earlier index", self.name, name
                );
            }
            debug!(target: "ixstore", "{} declared index {:?}", self.name, name);
        }

        Ok(self)
    }

    /// Return declared index names, in the order of declaration.
    pub fn indexes(&self) -> &[String] {
        &self.indexes
    }

    pub fn is_indexed(&self, name: &str) -> bool {
        self.indexes.iter().any(|x| x == name)
    }

    #[inline]
    pub fn to_name(&self) -> String {
        self.name.clone()
    }

    /// Return whether writes are applied as atomic batches.
    #[inline]
    pub fn is_atomic(&self) -> bool {
        self.atomic && self.store.has_batch()
    }

    /// Return the underlying store.
    pub fn as_store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn to_stats(&self) -> Stats {
        let mut stats = Stats::new(&self.name, self.is_atomic());
        stats.n_indexes = self.indexes.len();
        self.counters.to_stats(&mut stats);
        stats
    }
}

impl<S> IndexedStore<S>
where
    S: Store,
{
    /// Write `doc` under `key`. Derived entries of the older document under
    /// `key`, if any, are removed and a derived entry is written for every
    /// declared index present in `doc`.
    ///
    /// If another document carries the same value for an indexed field,
    /// its derived entry is overwritten to point to `key`. Derived entries
    /// that have since been claimed by another document are left as is.
    ///
    /// Fail with [Error::InvalidInput] if `key` collides with a derived key.
    pub fn put<K>(&self, key: K, doc: Value) -> Result<()>
    where
        K: Into<Value>,
    {
        let key = self.to_primary_key(key.into())?;

        let mut ops = match self.store.get(&key) {
            Ok(old) => self.to_removes(&key, &old)?,
            Err(Error::KeyNotFound(_, _)) => vec![],
            Err(err) => return Err(err),
        };
        let n_removes = ops.len();
        ops.extend(self.to_sets(&key, &doc));
        let n_sets = ops.len() - n_removes;
        ops.push(Write::put(&key, doc));

        self.apply(ops, false /*keep_going*/)?;

        Counters::incr(&self.counters.n_puts, 1);
        Counters::incr(&self.counters.n_index_removes, n_removes);
        Counters::incr(&self.counters.n_index_sets, n_sets);
        debug!(
            target: "ixstore",
            "{} put {:?} removes:{} sets:{}", self.name, key, n_removes, n_sets
        );

        Ok(())
    }

    /// Delete document under `key` along with its derived entries. If there
    /// is no document under `key`, fail with [Error::KeyNotFound] without
    /// touching the store.
    pub fn del<K>(&self, key: K) -> Result<()>
    where
        K: Into<Value>,
    {
        let key = self.to_primary_key(key.into())?;

        let doc = self.store.get(&key)?;
        let mut ops = self.to_removes(&key, &doc)?;
        let n_removes = ops.len();
        ops.push(Write::del(&key));

        self.apply(ops, true /*keep_going*/)?;

        Counters::incr(&self.counters.n_dels, 1);
        Counters::incr(&self.counters.n_index_removes, n_removes);
        debug!(target: "ixstore", "{} del {:?} removes:{}", self.name, key, n_removes);

        Ok(())
    }

    /// Get document under primary `key`.
    pub fn get<K>(&self, key: K) -> Result<Value>
    where
        K: Into<Value>,
    {
        self.store.get(&self.to_primary_key(key.into())?)
    }

    // primary keys share the store with derived entries, and must not
    // parse as one.
    fn to_primary_key(&self, key: Value) -> Result<String> {
        let key = codec::stringify(&key);
        match codec::parse_index_key(&key) {
            Some(_) => err_at!(InvalidInput, msg: "{} primary key {:?}", self.name, key),
            None => Ok(key),
        }
    }

    // derived entries of `doc` that still point to `key`, entries claimed
    // by a later document are skipped.
    fn to_removes(&self, key: &str, doc: &Value) -> Result<Vec<Write>> {
        let mut ops = vec![];
        for name in self.indexes.iter() {
            let ikey = match codec::field(doc, name) {
                Some(val) => codec::index_key(name, val),
                None => continue,
            };
            match self.store.get(&ikey) {
                Ok(pkey) if codec::stringify(&pkey) == key => ops.push(Write::del(&ikey)),
                Ok(_) | Err(Error::KeyNotFound(_, _)) => (),
                Err(err) => return Err(err),
            }
        }
        Ok(ops)
    }

    fn to_sets(&self, key: &str, doc: &Value) -> Vec<Write> {
        self.indexes
            .iter()
            .filter_map(|name| codec::field(doc, name).map(|val| (name, val)))
            .map(|(name, val)| {
                let value = Value::String(key.to_string());
                Write::put(&codec::index_key(name, val), value)
            })
            .collect()
    }

    // apply ops as a single batch, if possible, else one after the other.
    // With keep_going, remaining ops are attempted after a failure and the
    // first failure is returned.
    fn apply(&self, ops: Vec<Write>, keep_going: bool) -> Result<()> {
        if self.is_atomic() {
            return self.store.batch(ops);
        }

        let mut first_err = None;
        for op in ops.into_iter() {
            let key = op.as_key().to_string();
            let res = match op {
                Write::Put { key, value } => self.store.put(&key, value),
                Write::Del { key } => self.store.del(&key),
            };
            match res {
                Ok(_) => (),
                Err(err) => {
                    warn!(target: "ixstore", "{} write {:?}: {}", self.name, key, err);
                    if !keep_going {
                        return Err(err);
                    }
                    first_err.get_or_insert(err);
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<S> IndexedStore<S>
where
    S: Store,
{
    /// Get document whose field `name` is `value`. If `value` is a
    /// document, its field `name` is used for the lookup.
    ///
    /// Fail with [Error::NotIndexed] if `name` is not declared, and with
    /// [Error::KeyNotFound] if there is no document for `value`.
    pub fn by<V>(&self, name: &str, value: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        if !self.is_indexed(name) {
            return err_at!(NotIndexed, msg: "{} index {:?}", self.name, name);
        }

        let value = value.into();
        match &value {
            Value::Object(_) => match codec::field(&value, name) {
                Some(val) => self.lookup(name, val),
                None => err_at!(KeyNotFound, msg: "field {:?} missing in {}", name, value),
            },
            val => self.lookup(name, val),
        }
    }

    /// Alias for [IndexedStore::by].
    pub fn get_by<V>(&self, name: &str, value: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        self.by(name, value)
    }

    /// Find a document, trying `query` as a primary key first and then
    /// against every declared index in the order of declaration. If
    /// `query` is a document, it is never treated as primary key and only
    /// indexes named by its fields are tried. A `query` shaped like a
    /// derived key is not tried as primary key either.
    ///
    /// Fail with [Error::NotIndexed] when no index yields a document.
    pub fn find<V>(&self, query: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        let query = query.into();

        let trials: Vec<(&str, &Value)> = match &query {
            Value::Object(_) => self
                .indexes
                .iter()
                .filter_map(|name| codec::field(&query, name).map(|v| (name.as_str(), v)))
                .collect(),
            val => {
                match self.get(val.clone()) {
                    Ok(doc) => return Ok(doc),
                    Err(Error::KeyNotFound(_, _)) | Err(Error::InvalidInput(_, _)) => (),
                    Err(err) => return Err(err),
                }
                self.indexes.iter().map(|name| (name.as_str(), val)).collect()
            }
        };

        for (name, value) in trials.into_iter() {
            match self.lookup(name, value) {
                Ok(doc) => return Ok(doc),
                Err(Error::KeyNotFound(_, _)) => (),
                Err(err) => return Err(err),
            }
        }

        err_at!(NotIndexed, msg: "{} no index matches {}", self.name, query)
    }

    /// Return derived entries of index `name` as (field-value, primary-key)
    /// pairs sorted by field-value. Require [Store::range].
    pub fn entries(&self, name: &str) -> Result<Vec<(String, String)>> {
        if !self.is_indexed(name) {
            return err_at!(NotIndexed, msg: "{} index {:?}", self.name, name);
        }

        let mut items = vec![];
        for (key, pkey) in self.store.range(&codec::index_prefix(name))?.into_iter() {
            match codec::parse_index_key(&key) {
                Some((_, value)) => items.push((value.to_string(), codec::stringify(&pkey))),
                None => return err_at!(Fatal, msg: "invalid derived key {:?}", key),
            }
        }
        Ok(items)
    }

    fn lookup(&self, name: &str, value: &Value) -> Result<Value> {
        Counters::incr(&self.counters.n_lookups, 1);

        let ikey = codec::index_key(name, value);
        let res = self
            .store
            .get(&ikey)
            .and_then(|pkey| self.store.get(&codec::stringify(&pkey)));

        match &res {
            Ok(_) => trace!(target: "ixstore", "{} lookup {:?} hit", self.name, ikey),
            Err(Error::KeyNotFound(_, _)) => {
                Counters::incr(&self.counters.n_misses, 1);
                trace!(target: "ixstore", "{} lookup {:?} miss", self.name, ikey);
            }
            Err(_) => (),
        }

        res
    }
}

impl<S> IndexedStore<S>
where
    S: Store,
{
    /// Return an accessor bound to index `name`.
    pub fn accessor(&self, name: &str) -> Result<Accessor<'_, S>> {
        if !self.is_indexed(name) {
            return err_at!(NotIndexed, msg: "{} index {:?}", self.name, name);
        }
        Ok(Accessor::new(self, name))
    }

    /// Call a generated accessor method by its name, like `byUsername` or
    /// `getByUsername`.
    pub fn call<V>(&self, method: &str, value: V) -> Result<Value>
    where
        V: Into<Value>,
    {
        match self.accessors.resolve(method) {
            Some(entry) => self.accessor(&entry.index)?.call(entry.method, value),
            None => err_at!(NotIndexed, msg: "{} no accessor {:?}", self.name, method),
        }
    }

    /// Return generated accessor method names, in the order of index
    /// declaration.
    pub fn accessor_names(&self) -> Vec<String> {
        self.accessors.to_names()
    }
}

#[cfg(test)]
#[path = "indexed_test.rs"]
mod indexed_test;
