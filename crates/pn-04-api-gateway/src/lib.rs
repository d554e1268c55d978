//! # API Gateway Subsystem (pn-04)
//!
//! HTTP surface over the event index and the minting flow.
//!
//! ## Routes
//!
//! | Method | Path | Backed by |
//! |--------|------|-----------|
//! | GET | `/health` | liveness |
//! | GET | `/api/mint-logs?limit=N` | `EventIndexApi::list` |
//! | GET | `/api/ideas/exists?a=..&b=..` | `EventIndexApi::exists` |
//! | POST | `/api/mint` | `IdeaMintingApi::mint` |
//! | POST | `/api/mint/calldata` | `IdeaMintingApi::mint_with_calldata` |
//! | GET | `/api/patents/:token_id/fingerprint` | `FingerprintLookup` |
//! | GET | `/api/index/stats` | `EventIndexApi::stats` |
//! | POST | `/api/submit` (multipart `patent_document`) | `IdeaSummarizer` |
//!
//! ## Error Mapping
//!
//! | Failure | Status |
//! |---------|--------|
//! | malformed input, invalid idea, missing or non-text upload | 400 |
//! | unknown patent | 404 |
//! | duplicate fingerprint | 409 |
//! | body or upload over the limit | 413 |
//! | PDF, DOCX and other binary uploads | 415 |
//! | index build, proof generation | 500 |
//! | submission, revert, missing event, contract read, summarizer | 502 |
//! | summarizer not configured | 503 |

pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;

pub use domain::{
    ApiError, ApiResult, ConfigError, CorsConfig, DocumentError, GatewayConfig, GatewayError,
    UploadedDocument, DOCUMENT_FIELD,
};
pub use ports::{FingerprintLookup, IdeaSummarizer, LookupError, SummarizeError};
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;
