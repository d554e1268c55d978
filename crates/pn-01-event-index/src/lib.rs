//! # Event Index Subsystem (pn-01)
//!
//! Read-side authority for what the patent contract has already recorded.
//! It answers two questions from the contract's event log:
//!
//! - Has this idea fingerprint been registered before? (Duplicate Guard)
//! - Which patents were minted, most recent first? (Recency List)
//!
//! ## Data Flow
//!
//! ```text
//!   exists(fp) ──┐                        ┌── list(limit)
//!                ↓                        ↓
//!     [FingerprintIndex slot]      [RecencyList slot]
//!        Unbuilt │ Built              Unbuilt │ Built
//!                ↓ (first read)               ↓ (first read)
//!         scan IdeaProven logs        scan Transfer(0x0 → to) logs
//!                └──────────┬─────────────────┘
//!                           ↓
//!                 LedgerReader::get_logs([genesis, latest])
//!
//!   invalidate() ──→ both slots reset to Unbuilt (after every confirmed mint)
//! ```
//!
//! ## Cache Rules
//!
//! | Rule | Enforcement | Location |
//! |------|-------------|----------|
//! | Full replay only | one `get_logs` per event kind, from genesis | builder.rs |
//! | Failed build keeps slot unbuilt | slot written only on success | service.rs |
//! | Single scan per slot | async mutex held across the build | service.rs |
//! | Invalidation clears both slots | `invalidate()` resets both | service.rs |
//! | Canonical fingerprint keys | decimal words joined by `,` | value_objects.rs |
//!
//! ## Scalability Ceiling
//!
//! Every build rescans the whole log range. There is no block checkpoint;
//! this is acceptable only while the contract's total event count is small.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): records, event decoding, cache structures
//! - **Ports Layer** (`ports/`): inbound `EventIndexApi`, outbound `LedgerReader`
//! - **Builder** (`builder.rs`): one-pass historical scans
//! - **Service** (`service.rs`): cache slots, single-flight builds, invalidation

pub mod builder;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    decode_mint_transfer, decode_registration, event_topic, CacheState, CacheStatus,
    DecodeError, EventKind, Fingerprint, FingerprintIndex, IndexConfig, IndexError, IndexStats,
    LedgerReadError, MintRecord, RecencyList, RegistrationEvent, IDEA_PROVEN_SIGNATURE,
    TRANSFER_SIGNATURE,
};
pub use ports::{EventIndexApi, LedgerReader};
pub use service::EventIndexService;
