use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Extensions accepted for upload, lowercase with the leading dot.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

/// Returns the lowercase extension (with the leading dot) of `file_name`.
///
/// The extension is everything from the last `.`; names without a dot have
/// no extension.
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|index| file_name[index..].to_lowercase())
}

/// Checks `file_name` against [`ALLOWED_EXTENSIONS`], case-insensitively.
pub fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    match file_extension(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::UnsupportedFileType {
            file_name: file_name.to_string(),
        }),
    }
}

/// A spreadsheet file ready to be sent as a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Server response to a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub file_id: String,
    pub row_count: u64,
    pub column_count: u64,
    #[serde(default)]
    pub detected_columns: Vec<String>,
    /// Sanitized name the server stored the file under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}
