#![allow(dead_code)]

use routedispatch::dispatcher::{DispatchRequest, DispatchResponse, HandlerOutput};
use routedispatch::middleware::Middleware;
use routedispatch::spec::RouteTemplate;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn show(_: &DispatchRequest) -> HandlerOutput {
    HandlerOutput::text("show")
}

pub fn returns_a_dict(_: &DispatchRequest) -> HandlerOutput {
    HandlerOutput::json(json!({ "id": 1 }))
}

/// Handler that echoes the bound parameters as JSON
pub fn echo_params(req: &DispatchRequest) -> HandlerOutput {
    let params: serde_json::Map<String, serde_json::Value> = req
        .path_params
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();
    HandlerOutput::json(serde_json::Value::Object(params))
}

/// Zoo route table used across router and dispatcher tests
pub fn zoo_routes() -> Vec<RouteTemplate> {
    vec![
        RouteTemplate::get("/", show).name("root_handler"),
        RouteTemplate::get("/zoo/animals", show).name("get_animals"),
        RouteTemplate::post("/zoo/animals", show).name("create_animal"),
        RouteTemplate::get("/zoo/animals/@id", echo_params).name("get_animal"),
        RouteTemplate::put("/zoo/animals/@id", show).name("update_animal"),
        RouteTemplate::patch("/zoo/animals/@id", show).name("patch_animal"),
        RouteTemplate::delete("/zoo/animals/@id", show).name("delete_animal"),
        RouteTemplate::get("/zoo/animals/@id/toys/@toy_id", echo_params).name("animal_toy"),
        RouteTemplate::new(http::Method::HEAD, "/zoo/health", show).name("health_check"),
        RouteTemplate::new(http::Method::OPTIONS, "/zoo/health", show).name("supported_ops"),
        RouteTemplate::new(http::Method::TRACE, "/zoo/health", show).name("trace_route"),
    ]
}

/// Shared, ordered log of stage names
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Middleware recording `<label>:before` / `<label>:after` into a journal
pub struct Recorder {
    pub label: &'static str,
    pub journal: Journal,
}

impl Recorder {
    pub fn new(label: &'static str, journal: &Journal) -> Arc<dyn Middleware> {
        Arc::new(Self {
            label,
            journal: journal.clone(),
        })
    }
}

impl Middleware for Recorder {
    fn before(&self, _req: &mut DispatchRequest) {
        self.journal.push(format!("{}:before", self.label));
    }

    fn after(&self, _req: &DispatchRequest, _res: &mut DispatchResponse, _latency: Duration) {
        self.journal.push(format!("{}:after", self.label));
    }
}

/// Middleware with only a `before` hook
pub struct BeforeOnly(pub Journal);

impl Middleware for BeforeOnly {
    fn before(&self, _req: &mut DispatchRequest) {
        self.0.push("before-only");
    }
}

/// Middleware with no hooks at all
pub struct Inert;

impl Middleware for Inert {}
