//! CORS layer built from [`CorsConfig`].

use crate::domain::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::str::FromStr;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. A disabled config still answers preflights
/// permissively so browser clients on other origins keep working.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::very_permissive();
    }

    let mut cors = CorsLayer::new()
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age));

    cors = if is_wildcard(&config.allowed_origins) {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(parse_all::<HeaderValue>(&config.allowed_origins))
    };

    if is_wildcard(&config.allowed_headers) {
        cors.allow_headers(Any)
    } else {
        cors.allow_headers(parse_all::<HeaderName>(&config.allowed_headers))
    }
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Unparsable entries are skipped with a warning.
fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!("[pn-04] ignoring invalid CORS entry: {}", v);
                None
            }
        })
        .collect()
}
