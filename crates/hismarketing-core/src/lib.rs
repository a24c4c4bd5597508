//! Domain layer of the HisMarketing client.
//!
//! Holds the data model of the upload → analysis → prediction workflow and
//! the traits the other layers implement: [`api::SalesApi`] (backend),
//! [`session::SessionStore`] (durable session), [`report_sink::ReportSink`]
//! (saved reports) and [`presentation::Presenter`] (UI).

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod presentation;
pub mod report_sink;
pub mod session;

// Re-export common error type
pub use error::{HisError, ValidationError};
