//! HTTP API: routing, request/response mapping, server wiring.

pub mod app;
pub mod context;
pub mod middleware;
