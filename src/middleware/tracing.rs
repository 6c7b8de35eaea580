use std::time::Duration;

use tracing::info;

use super::Middleware;
use crate::dispatcher::{DispatchRequest, DispatchResponse};

/// Logs each matched request and its response, keyed by request id
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn before(&self, req: &mut DispatchRequest) {
        info!(
            request_id = %req.request_id,
            issued_at_ms = req.request_id.issued_at_ms(),
            method = %req.method,
            path = %req.path,
            host = ?req.host,
            "Request started"
        );
    }

    fn after(&self, req: &DispatchRequest, res: &mut DispatchResponse, latency: Duration) {
        info!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            status = res.status,
            latency_us = latency.as_micros() as u64,
            "Request completed"
        );
    }
}
