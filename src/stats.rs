use serde::Serialize;

use std::{
    fmt, result,
    sync::atomic::{AtomicUsize, Ordering::SeqCst},
};

use crate::{Error, Result};

/// Statistic type, for [IndexedStore][crate::IndexedStore] type.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    pub name: String,
    pub atomic: bool,
    pub n_indexes: usize,
    pub n_puts: usize,
    pub n_dels: usize,
    pub n_index_sets: usize,
    pub n_index_removes: usize,
    pub n_lookups: usize,
    pub n_misses: usize,
}

impl Stats {
    pub(crate) fn new(name: &str, atomic: bool) -> Stats {
        Stats {
            name: name.to_string(),
            atomic,
            ..Stats::default()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        err_at!(FailJson, serde_json::to_string(self))
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        writeln!(f, "ixstore.name = {}", self.name)?;
        writeln!(
            f,
            "ixstore = {{ atomic={}, n_indexes={} }}",
            self.atomic, self.n_indexes
        )?;
        writeln!(
            f,
            "ixstore.writes = {{ n_puts={}, n_dels={}, n_index_sets={}, n_index_removes={} }}",
            self.n_puts, self.n_dels, self.n_index_sets, self.n_index_removes
        )?;
        writeln!(
            f,
            "ixstore.reads = {{ n_lookups={}, n_misses={} }}",
            self.n_lookups, self.n_misses
        )
    }
}

// counters shared by clones of an indexed store.
#[derive(Default)]
pub(crate) struct Counters {
    pub n_puts: AtomicUsize,
    pub n_dels: AtomicUsize,
    pub n_index_sets: AtomicUsize,
    pub n_index_removes: AtomicUsize,
    pub n_lookups: AtomicUsize,
    pub n_misses: AtomicUsize,
}

impl Counters {
    pub fn incr(counter: &AtomicUsize, n: usize) {
        counter.fetch_add(n, SeqCst);
    }

    pub fn to_stats(&self, stats: &mut Stats) {
        stats.n_puts = self.n_puts.load(SeqCst);
        stats.n_dels = self.n_dels.load(SeqCst);
        stats.n_index_sets = self.n_index_sets.load(SeqCst);
        stats.n_index_removes = self.n_index_removes.load(SeqCst);
        stats.n_lookups = self.n_lookups.load(SeqCst);
        stats.n_misses = self.n_misses.load(SeqCst);
    }
}
