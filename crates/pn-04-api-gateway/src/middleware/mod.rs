//! Tower middleware wrapped around every route.

pub mod cors;
pub mod tracing;

pub use self::cors::create_cors_layer;
pub use self::tracing::{RequestTracingLayer, RequestTracingService};
