//! Uploaded patent documents and plain-text extraction.
//!
//! Only textual uploads are read. Binary office formats are refused with
//! `415 Unsupported Media Type` so the caller can convert them first.

use std::fmt;

/// Multipart field carrying the document.
pub const DOCUMENT_FIELD: &str = "patent_document";

/// A file received through `POST /api/submit`.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported document type {0}; upload plain text")]
    Unsupported(String),

    #[error("document is not valid UTF-8 text")]
    NotText,

    #[error("document contains no text")]
    Empty,
}

impl UploadedDocument {
    /// Media type without parameters, lowercased.
    fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Text content of the upload.
    ///
    /// `text/*`, JSON and XML are read as UTF-8, as are uploads with no
    /// declared type or `application/octet-stream` when the bytes decode.
    pub fn extract_text(&self) -> Result<String, DocumentError> {
        match self.media_type().as_deref() {
            None | Some("") | Some("application/octet-stream") => {}
            Some(t) if t.starts_with("text/") => {}
            Some("application/json") | Some("application/xml") => {}
            Some(other) => return Err(DocumentError::Unsupported(other.to_string())),
        }

        let text = std::str::from_utf8(&self.bytes).map_err(|_| DocumentError::NotText)?;
        let text = text.trim_start_matches('\u{feff}').trim();
        if text.is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(text.to_string())
    }
}
