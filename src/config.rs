use serde::Deserialize;

use std::{ffi, fs};

use crate::{Error, Result};

/// Default name for [IndexedStore][crate::IndexedStore] instances.
pub const DEFAULT_NAME: &str = "ixstore";

/// Configuration for [IndexedStore][crate::IndexedStore] type.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Name of the indexed store, used while logging and in statistics.
    pub name: String,
    /// Apply each `put` and `del` as a single atomic batch, provided the
    /// underlying store supports batch writes. Otherwise writes are applied
    /// one after the other.
    ///
    /// Default: true
    pub atomic: bool,
    /// Indexes to declare when creating the indexed store. More indexes
    /// can be declared later.
    pub indexes: Vec<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config::new(DEFAULT_NAME)
    }
}

impl<'a> arbitrary::Arbitrary<'a> for Config {
    fn arbitrary(u: &mut arbitrary::Unstructured) -> arbitrary::Result<Self> {
        let name = u.choose(&["users", "accounts", "sessions"])?.to_string();
        let atomic: bool = u.arbitrary()?;
        let indexes = {
            let n = u.arbitrary::<usize>()? % 3;
            let names = ["username", "email", "phone"];
            names[..n].iter().map(|s| s.to_string()).collect()
        };

        let config = Config {
            name,
            atomic,
            indexes,
        };
        Ok(config)
    }
}

impl Config {
    pub fn new(name: &str) -> Config {
        Config {
            name: name.to_string(),
            atomic: true,
            indexes: vec![],
        }
    }

    pub fn set_atomic(&mut self, atomic: bool) -> &mut Self {
        self.atomic = atomic;
        self
    }

    pub fn add_index(&mut self, name: &str) -> &mut Self {
        if !self.indexes.iter().any(|x| x == name) {
            self.indexes.push(name.to_string())
        }
        self
    }

    /// Parse configuration from toml text. Missing parameters are picked
    /// from [Config::default].
    pub fn from_toml(text: &str) -> Result<Config> {
        let cfg: TomlConfig = err_at!(FailConfig, toml::from_str(text))?;
        Ok(cfg.into())
    }

    /// Load configuration from toml file at `loc`.
    pub fn from_file(loc: &ffi::OsStr) -> Result<Config> {
        let text = err_at!(IOError, fs::read_to_string(loc), "config {:?}", loc)?;
        Config::from_toml(&text)
    }
}

#[derive(Clone, Deserialize)]
struct TomlConfig {
    name: Option<String>,
    atomic: Option<bool>,
    indexes: Option<Vec<String>>,
}

impl From<TomlConfig> for Config {
    fn from(cfg: TomlConfig) -> Config {
        let mut config = Config::new(cfg.name.as_deref().unwrap_or(DEFAULT_NAME));
        config.set_atomic(cfg.atomic.unwrap_or(true));
        for name in cfg.indexes.unwrap_or_default().iter() {
            config.add_index(name);
        }
        config
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
