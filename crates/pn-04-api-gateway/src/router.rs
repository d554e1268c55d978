//! HTTP routes.
//!
//! All JSON bodies carry a `success` flag. Successful payloads are flattened
//! next to it: `{"success": true, "patents": [...]}`.

use crate::domain::config::GatewayConfig;
use crate::domain::document::{UploadedDocument, DOCUMENT_FIELD};
use crate::domain::error::{ApiError, ApiResult};
use crate::middleware::{create_cors_layer, RequestTracingLayer};
use crate::ports::{FingerprintLookup, IdeaSummarizer};
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use pn_01_event_index::{EventIndexApi, Fingerprint, IndexStats, MintRecord};
use pn_02_idea_minting::{IdeaMintingApi, MintRequest, ProofCalldata};
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<dyn EventIndexApi>,
    pub minting: Arc<dyn IdeaMintingApi>,
    pub fingerprints: Arc<dyn FingerprintLookup>,
    /// `None` disables `/api/submit`.
    pub summarizer: Option<Arc<dyn IdeaSummarizer>>,
}

/// Build the full router with middleware applied.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(RequestTracingLayer::new());

    Router::new()
        .route("/health", get(health_check))
        .route("/api/mint-logs", get(mint_logs))
        .route("/api/ideas/exists", get(idea_exists))
        .route("/api/mint", post(mint))
        .route("/api/mint/calldata", post(mint_with_calldata))
        .route("/api/patents/:token_id/fingerprint", get(patent_fingerprint))
        .route("/api/index/stats", get(index_stats))
        .route(
            "/api/submit",
            post(submit_document).layer(DefaultBodyLimit::max(config.limits.max_upload_size)),
        )
        .layer(DefaultBodyLimit::max(config.limits.max_request_size))
        .layer(middleware)
        .with_state(state)
}

#[derive(Serialize)]
struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

fn success<T: Serialize>(body: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        body,
    })
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "patent-notary",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<String>,
}

#[derive(Serialize)]
struct PatentsBody {
    patents: Vec<MintRecord>,
}

async fn mint_logs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let limit = params.limit.as_deref().and_then(parse_limit);
    let patents = state.index.list(limit).await?;
    Ok(success(PatentsBody { patents }))
}

/// Lenient limit parsing. Accepts decimal, `0x` hex and exponent notation;
/// fractions truncate toward zero. Anything that is not a number means
/// "no limit".
pub fn parse_limit(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc() as i64),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct ExistsParams {
    a: Option<String>,
    b: Option<String>,
}

#[derive(Serialize)]
struct ExistsBody {
    exists: bool,
}

async fn idea_exists(
    State(state): State<AppState>,
    Query(params): Query<ExistsParams>,
) -> ApiResult<impl IntoResponse> {
    let (Some(a), Some(b)) = (params.a, params.b) else {
        return Err(ApiError::bad_request(
            "query parameters `a` and `b` are required",
        ));
    };
    let fingerprint = Fingerprint::parse(&a, &b)
        .map_err(|e| ApiError::bad_request(format!("invalid fingerprint: {}", e)))?;

    let exists = state.index.exists(&fingerprint).await?;
    Ok(success(ExistsBody { exists }))
}

#[derive(Debug, Deserialize)]
struct MintBody {
    owner: String,
    idea: String,
}

async fn mint(
    State(state): State<AppState>,
    body: Result<Json<MintBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body.map_err(rejection)?;
    let owner = parse_owner(&body.owner)?;

    let outcome = state
        .minting
        .mint(MintRequest {
            owner,
            idea: body.idea,
        })
        .await?;
    Ok(success(outcome))
}

/// Locally proved calldata, either structured or the raw text snarkjs
/// exports.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CalldataInput {
    Structured(ProofCalldata),
    Solidity(String),
}

#[derive(Debug, Deserialize)]
struct CalldataBody {
    owner: String,
    calldata: CalldataInput,
}

async fn mint_with_calldata(
    State(state): State<AppState>,
    body: Result<Json<CalldataBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body.map_err(rejection)?;
    let owner = parse_owner(&body.owner)?;
    let calldata = match body.calldata {
        CalldataInput::Structured(calldata) => calldata,
        CalldataInput::Solidity(text) => ProofCalldata::from_solidity_calldata(&text)
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
    };

    let outcome = state.minting.mint_with_calldata(owner, calldata).await?;
    Ok(success(outcome))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintBody {
    token_id: String,
    fingerprint: Fingerprint,
}

async fn patent_fingerprint(
    State(state): State<AppState>,
    Path(token_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = U256::parse(&token_id)
        .map_err(|e| ApiError::bad_request(format!("invalid token id: {}", e)))?;

    let fingerprint = state.fingerprints.fingerprint_of(id).await?;
    if fingerprint.words().iter().all(U256::is_zero) {
        return Err(ApiError::not_found(format!("patent {}", id)));
    }
    Ok(success(FingerprintBody {
        token_id: id.to_dec_string(),
        fingerprint,
    }))
}

#[derive(Serialize)]
struct StatsBody {
    index: IndexStats,
}

async fn index_stats(State(state): State<AppState>) -> impl IntoResponse {
    success(StatsBody {
        index: state.index.stats(),
    })
}

#[derive(Serialize)]
struct IdeaBody {
    idea: String,
}

/// Condense an uploaded document into the idea text a client then mints.
async fn submit_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let Some(summarizer) = state.summarizer.clone() else {
        return Err(ApiError::unavailable(
            "document summarization is not configured",
        ));
    };
    let mut multipart = multipart.map_err(|e| ApiError::new(e.status(), e.body_text()))?;
    let document = read_document(&mut multipart).await?.ok_or_else(|| {
        ApiError::bad_request(format!("no file uploaded in `{}`", DOCUMENT_FIELD))
    })?;

    let text = document.extract_text()?;
    let idea = summarizer.summarize(&text).await?;
    info!(
        file = document.file_name.as_deref().unwrap_or("-"),
        document_bytes = document.bytes.len(),
        idea_chars = idea.chars().count(),
        "[pn-04] document summarized"
    );
    Ok(success(IdeaBody { idea }))
}

/// First field named [`DOCUMENT_FIELD`]. Other fields are skipped.
async fn read_document(multipart: &mut Multipart) -> ApiResult<Option<UploadedDocument>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(UploadedDocument {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::new(e.status(), e.body_text())
}

/// Owner must be a 20-byte hex address other than zero.
pub fn parse_owner(raw: &str) -> ApiResult<Address> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(digits)
        .map_err(|_| ApiError::bad_request(format!("invalid owner address: {}", raw)))?;
    if bytes.len() != 20 {
        return Err(ApiError::bad_request(format!(
            "owner address must be 20 bytes, got {}",
            bytes.len()
        )));
    }
    let owner = Address::from_slice(&bytes);
    if owner.is_zero() {
        return Err(ApiError::bad_request("owner cannot be the zero address"));
    }
    Ok(owner)
}

fn rejection(e: JsonRejection) -> ApiError {
    let status = match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    ApiError::new(status, e.body_text())
}
