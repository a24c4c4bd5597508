//! Interaction layer: the HTTP client for the sales-analytics backend.

pub mod http_api;

pub use http_api::HttpSalesApi;
