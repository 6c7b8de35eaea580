use std::time::Duration;

use crate::dispatcher::{DispatchRequest, DispatchResponse};

/// A unit of middleware with optional `before` and `after` hooks
///
/// Both hooks default to no-ops, so an implementation provides whichever of
/// the two it needs. `before` may mutate the request, including setting a
/// redirect, which makes the dispatcher skip the handler.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &mut DispatchRequest) {}

    fn after(&self, _req: &DispatchRequest, _res: &mut DispatchResponse, _latency: Duration) {}
}
