//! HTTP API: storefront routes, request parsing and JSON response mapping.

pub mod app;
pub mod middleware;
