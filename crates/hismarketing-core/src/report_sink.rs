//! Report sink trait.

use std::path::PathBuf;

use crate::error::Result;

/// Destination for downloaded report files.
///
/// `save` must be all-or-nothing: on error no file with `file_name` may be
/// left behind.
pub trait ReportSink: Send + Sync {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}
