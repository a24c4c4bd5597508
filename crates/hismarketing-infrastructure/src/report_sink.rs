//! Directory-backed report sink.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use hismarketing_core::error::{HisError, Result};
use hismarketing_core::report_sink::ReportSink;

use crate::storage::temp_path;

/// Saves reports into a directory, replacing files of the same name.
///
/// The payload is written to a hidden temporary file and renamed into
/// place, so a failed write never leaves a partial report.
#[derive(Debug, Clone)]
pub struct DirectoryReportSink {
    dir: PathBuf,
}

impl DirectoryReportSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for DirectoryReportSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(HisError::internal(format!(
                "Invalid report file name: {file_name:?}"
            )));
        }

        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(file_name);
        let tmp = temp_path(&target)?;

        let written = (|| -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&tmp, &target)
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::info!(path = %target.display(), bytes = bytes.len(), "[ReportSink] Report saved");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectoryReportSink::new(temp_dir.path().join("reports"));

        let path = sink.save("hismarketing_analysis_raporu.pdf", b"%PDF-1.4").unwrap();

        assert_eq!(path, temp_dir.path().join("reports/hismarketing_analysis_raporu.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
        assert!(!temp_dir.path().join("reports/.hismarketing_analysis_raporu.pdf.tmp").exists());
    }

    #[test]
    fn test_save_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectoryReportSink::new(temp_dir.path().to_path_buf());

        sink.save("r.xlsx", b"old").unwrap();
        let path = sink.save("r.xlsx", b"new").unwrap();

        assert_eq!(fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn test_rejects_path_separators() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectoryReportSink::new(temp_dir.path().to_path_buf());

        assert!(sink.save("../escape.pdf", b"x").is_err());
        assert!(sink.save("", b"x").is_err());
    }
}
