//! # Event Index Service
//!
//! Owns the two cache slots and serializes builds per slot.
//!
//! Each slot is an async mutex held for the whole build, so concurrent
//! first reads wait on the same scan instead of issuing their own.
//! `invalidate()` takes both locks before resetting, which makes it wait
//! for in-flight builds; a scan that started before a mint can therefore
//! never repopulate a slot after the mint's invalidation.

use crate::builder::{scan_mints, scan_registrations};
use crate::domain::{
    CacheState, CacheStatus, Fingerprint, FingerprintIndex, IndexConfig, IndexError, IndexStats,
    MintRecord, RecencyList,
};
use crate::ports::{EventIndexApi, LedgerReader};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Counters {
    fingerprint_scans: AtomicU64,
    mint_scans: AtomicU64,
    cache_hits: AtomicU64,
    failed_builds: AtomicU64,
    invalidations: AtomicU64,
}

/// Lazily built, explicitly invalidated view of the contract's history.
pub struct EventIndexService {
    ledger: Arc<dyn LedgerReader>,
    config: IndexConfig,
    fingerprints: Mutex<CacheState<FingerprintIndex>>,
    recency: Mutex<CacheState<RecencyList>>,
    counters: Counters,
}

impl EventIndexService {
    pub fn new(ledger: Arc<dyn LedgerReader>, config: IndexConfig) -> Self {
        Self {
            ledger,
            config,
            fingerprints: Mutex::new(CacheState::Unbuilt),
            recency: Mutex::new(CacheState::Unbuilt),
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    async fn fingerprint_index(&self) -> Result<Arc<FingerprintIndex>, IndexError> {
        let mut slot = self.fingerprints.lock().await;
        if let Some(index) = slot.get() {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(index);
        }

        match scan_registrations(self.ledger.as_ref(), &self.config).await {
            Ok(index) => {
                self.counters.fingerprint_scans.fetch_add(1, Ordering::Relaxed);
                let index = Arc::new(index);
                *slot = CacheState::Built(Arc::clone(&index));
                Ok(index)
            }
            Err(e) => {
                self.counters.failed_builds.fetch_add(1, Ordering::Relaxed);
                warn!("[pn-01] {}", e);
                Err(e)
            }
        }
    }

    async fn recency_list(&self) -> Result<Arc<RecencyList>, IndexError> {
        let mut slot = self.recency.lock().await;
        if let Some(list) = slot.get() {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(list);
        }

        match scan_mints(self.ledger.as_ref(), &self.config).await {
            Ok(list) => {
                self.counters.mint_scans.fetch_add(1, Ordering::Relaxed);
                let list = Arc::new(list);
                *slot = CacheState::Built(Arc::clone(&list));
                Ok(list)
            }
            Err(e) => {
                self.counters.failed_builds.fetch_add(1, Ordering::Relaxed);
                warn!("[pn-01] {}", e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl EventIndexApi for EventIndexService {
    async fn exists(&self, fingerprint: &Fingerprint) -> Result<bool, IndexError> {
        let index = self.fingerprint_index().await?;
        let found = index.contains(fingerprint);
        debug!(fingerprint = %fingerprint, found, "Duplicate check");
        Ok(found)
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<MintRecord>, IndexError> {
        let list = self.recency_list().await?;
        Ok(list.take(limit))
    }

    async fn invalidate(&self) {
        // Only place holding both locks: fingerprints, then recency.
        let mut fingerprints = self.fingerprints.lock().await;
        let mut recency = self.recency.lock().await;
        *fingerprints = CacheState::Unbuilt;
        *recency = CacheState::Unbuilt;
        self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
        info!("[pn-01] Event index invalidated");
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            fingerprint_index: status_of(&self.fingerprints, FingerprintIndex::len),
            recency_list: status_of(&self.recency, RecencyList::len),
            fingerprint_scans: self.counters.fingerprint_scans.load(Ordering::Relaxed),
            mint_scans: self.counters.mint_scans.load(Ordering::Relaxed),
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            failed_builds: self.counters.failed_builds.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
        }
    }
}

/// A held slot is reported as `Building`.
fn status_of<T>(slot: &Mutex<CacheState<T>>, entries: fn(&T) -> usize) -> CacheStatus {
    match slot.try_lock() {
        Ok(state) => match &*state {
            CacheState::Unbuilt => CacheStatus::Unbuilt,
            CacheState::Built(value) => CacheStatus::Built {
                entries: entries(value),
            },
        },
        Err(_) => CacheStatus::Building,
    }
}
