//! Infrastructure layer: file locations, atomic storage, the durable
//! session store, configuration loading and the report sink.

pub mod config_service;
pub mod paths;
pub mod report_sink;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::HisPaths;
pub use crate::report_sink::DirectoryReportSink;
pub use crate::session_store::{MemorySessionStore, TomlSessionStore};
