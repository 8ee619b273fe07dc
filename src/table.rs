use std::collections::HashMap;

use crate::apply::apply_maps;
use crate::env::Env;
use crate::error::{FlagError, TableError};
use crate::flags::FlagSet;
use crate::mapper::Mapper;

/// A fixed name-to-name table used as a [`Mapper`].
///
/// Keys are compared verbatim, so a table placed first in a chain is matched
/// against flag names exactly as they were registered. A nil table (the
/// default) never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table(Option<HashMap<String, String>>);

impl Table {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self(Some(map))
    }

    pub fn nil() -> Self {
        Self(None)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    pub fn insert(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.0
            .get_or_insert_with(HashMap::new)
            .insert(from.into(), to.into());
        self
    }

    /// Build a table from `SRC=DST` strings.
    ///
    /// The first `=` splits the entry, so `DST` may itself contain `=`.
    pub fn from_pairs<S: AsRef<str>>(entries: &[S]) -> Result<Self, TableError> {
        let mut map = HashMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (from, to) = entry
                .split_once('=')
                .ok_or_else(|| TableError::MalformedEntry {
                    entry: entry.to_string(),
                })?;
            if from.is_empty() {
                return Err(TableError::EmptySource {
                    entry: entry.to_string(),
                });
            }
            map.insert(from.to_string(), to.to_string());
        }
        Ok(Self::new(map))
    }

    /// Map flag names through this table into the environment, then parse
    /// `args` into `flags`. Returns the arguments left after the flags.
    pub fn parse_with<I, S>(&self, flags: &mut FlagSet, args: I) -> Result<Vec<String>, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        apply_maps(flags, &[self, &Env])?;
        flags.parse(args)
    }
}

impl Mapper for Table {
    fn map(&self, name: &str) -> Option<String> {
        self.0.as_ref()?.get(name).cloned()
    }
}

impl From<HashMap<String, String>> for Table {
    fn from(map: HashMap<String, String>) -> Self {
        Self::new(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
