//! # Index Builder
//!
//! One-pass historical scans. Each build issues exactly one `get_logs`
//! over `[genesis, latest]` for its event kind and folds the result into
//! a fresh structure.

use crate::domain::{
    decode_mint_transfer, decode_registration, EventKind, FingerprintIndex, IndexConfig,
    IndexError, RecencyList,
};
use crate::ports::LedgerReader;
use shared_types::{BlockSpec, LogEntry, LogQuery};
use std::time::Instant;
use tracing::{debug, info};

/// Build the set of registered fingerprints from `IdeaProven` logs.
pub async fn scan_registrations<L>(
    ledger: &L,
    config: &IndexConfig,
) -> Result<FingerprintIndex, IndexError>
where
    L: LedgerReader + ?Sized,
{
    let kind = EventKind::Registration;
    let started = Instant::now();
    let logs = fetch(ledger, config, kind).await?;
    let total = logs.len();

    let mut fingerprints = Vec::with_capacity(total);
    for log in relevant(&logs, kind) {
        let event = decode_registration(log).map_err(|source| IndexError::Decode { kind, source })?;
        fingerprints.push(event.fingerprint);
    }

    let index = FingerprintIndex::from_fingerprints(fingerprints);
    info!(
        kind = %kind,
        logs = total,
        entries = index.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Index built"
    );
    Ok(index)
}

/// Build the recency list from `Transfer` logs whose sender is the zero
/// address.
pub async fn scan_mints<L>(ledger: &L, config: &IndexConfig) -> Result<RecencyList, IndexError>
where
    L: LedgerReader + ?Sized,
{
    let kind = EventKind::MintTransfer;
    let started = Instant::now();
    let logs = fetch(ledger, config, kind).await?;
    let total = logs.len();

    let mut records = Vec::new();
    for log in relevant(&logs, kind) {
        if let Some(record) =
            decode_mint_transfer(log).map_err(|source| IndexError::Decode { kind, source })?
        {
            records.push(record);
        }
    }

    let list = RecencyList::from_records(records);
    info!(
        kind = %kind,
        logs = total,
        entries = list.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Index built"
    );
    Ok(list)
}

async fn fetch<L>(
    ledger: &L,
    config: &IndexConfig,
    kind: EventKind,
) -> Result<Vec<LogEntry>, IndexError>
where
    L: LedgerReader + ?Sized,
{
    let query = LogQuery::for_event(
        config.contract_address,
        kind.topic(),
        BlockSpec::Number(config.genesis_block),
        BlockSpec::Latest,
    );
    debug!(kind = %kind, from = config.genesis_block, "Scanning event log");
    ledger
        .get_logs(query)
        .await
        .map_err(|source| IndexError::Scan { kind, source })
}

/// Entries of the wrong event kind or dropped by a reorg are not part of
/// the history.
fn relevant<'a>(logs: &'a [LogEntry], kind: EventKind) -> impl Iterator<Item = &'a LogEntry> {
    let topic = kind.topic();
    logs.iter().filter(move |log| {
        if log.removed {
            debug!(kind = %kind, tx = ?log.transaction_hash, "Skipping removed log");
            return false;
        }
        if log.signature() != Some(&topic) {
            debug!(kind = %kind, "Skipping log with foreign signature");
            return false;
        }
        true
    })
}
