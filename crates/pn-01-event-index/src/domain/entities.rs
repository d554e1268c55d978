//! # Entities
//!
//! The two in-memory structures derived from the event log and the
//! slot that holds each of them.

use super::value_objects::{Fingerprint, MintRecord};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Contents of one cache slot.
///
/// A slot only ever transitions `Unbuilt -> Built` on a successful build
/// and `Built -> Unbuilt` on invalidation. A failed build leaves it as is.
#[derive(Debug)]
pub enum CacheState<T> {
    Unbuilt,
    Built(Arc<T>),
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self::Unbuilt
    }
}

impl<T> CacheState<T> {
    pub fn get(&self) -> Option<Arc<T>> {
        match self {
            Self::Unbuilt => None,
            Self::Built(value) => Some(Arc::clone(value)),
        }
    }
}

/// Set of every fingerprint ever registered, keyed by canonical decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintIndex {
    keys: HashSet<String>,
}

impl FingerprintIndex {
    pub fn from_fingerprints<I>(fingerprints: I) -> Self
    where
        I: IntoIterator<Item = Fingerprint>,
    {
        Self {
            keys: fingerprints
                .into_iter()
                .map(|fp| fp.canonical_key())
                .collect(),
        }
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.keys.contains(&fingerprint.canonical_key())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Mint records ordered by block number, newest first.
///
/// The sort is stable, so records from the same block keep the order the
/// ledger reported them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyList {
    records: Vec<MintRecord>,
}

impl RecencyList {
    pub fn from_records(mut records: Vec<MintRecord>) -> Self {
        records.sort_by(|a, b| b.block_number.cmp(&a.block_number));
        Self { records }
    }

    /// First `limit` records. A missing or non-positive limit returns all of
    /// them.
    pub fn take(&self, limit: Option<i64>) -> Vec<MintRecord> {
        match limit {
            Some(n) if n > 0 => {
                let n = usize::try_from(n).unwrap_or(usize::MAX);
                self.records.iter().take(n).cloned().collect()
            }
            _ => self.records.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Observable state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CacheStatus {
    Unbuilt,
    /// A build holds the slot right now.
    Building,
    Built { entries: usize },
}

/// Counters exposed for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub fingerprint_index: CacheStatus,
    pub recency_list: CacheStatus,
    /// Completed `IdeaProven` log scans.
    pub fingerprint_scans: u64,
    /// Completed `Transfer` log scans.
    pub mint_scans: u64,
    /// Reads answered from a built slot.
    pub cache_hits: u64,
    pub failed_builds: u64,
    pub invalidations: u64,
}
