//! HTTP API: router, handlers and JSON mapping.

pub mod app;
