//! Per-request span and access log.
//!
//! Every request gets an `api_request` span carrying method, path and the
//! caller's W3C `traceparent` trace id when present. Status and latency are
//! recorded on completion.

use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{field, info, info_span, warn, Instrument, Span};

#[derive(Clone, Copy, Default)]
pub struct RequestTracingLayer;

impl RequestTracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestTracingLayer {
    type Service = RequestTracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTracingService { inner }
    }
}

#[derive(Clone)]
pub struct RequestTracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestTracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Take the service that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let span = info_span!(
            "api_request",
            http.method = %req.method(),
            http.target = %req.uri().path(),
            trace_id = field::Empty,
            http.status_code = field::Empty,
            latency_ms = field::Empty,
        );
        if let Some(trace_id) = trace_id_of(&req) {
            span.record("trace_id", trace_id);
        }

        Box::pin(
            async move {
                let started = Instant::now();
                let result = inner.call(req).await;
                let elapsed = started.elapsed().as_millis() as u64;

                let current = Span::current();
                current.record("latency_ms", elapsed);
                match &result {
                    Ok(response) => {
                        let status = response.status();
                        current.record("http.status_code", status.as_u16());
                        if status.is_server_error() {
                            warn!(status = status.as_u16(), "[pn-04] request failed");
                        } else {
                            info!(status = status.as_u16(), "[pn-04] request served");
                        }
                    }
                    Err(_) => warn!("[pn-04] request errored before a response"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Trace id from a W3C `traceparent` header
/// (`version-trace_id-parent_id-flags`).
fn trace_id_of<B>(req: &Request<B>) -> Option<&str> {
    let traceparent = req.headers().get("traceparent")?.to_str().ok()?;
    let mut parts = traceparent.split('-');
    let (_version, trace_id, _parent, _flags) =
        (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || trace_id.len() != 32 {
        return None;
    }
    Some(trace_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(traceparent: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(value) = traceparent {
            builder = builder.header("traceparent", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_traceparent_parsing() {
        let req = request_with(Some(
            "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01",
        ));
        assert_eq!(trace_id_of(&req), Some("0af7651916cd43dd8448eb211c80319c"));
    }

    #[test]
    fn test_invalid_traceparent() {
        assert_eq!(trace_id_of(&request_with(Some("invalid"))), None);
        assert_eq!(trace_id_of(&request_with(Some("00-abc-def-01"))), None);
    }

    #[test]
    fn test_no_traceparent() {
        assert_eq!(trace_id_of(&request_with(None)), None);
    }
}
