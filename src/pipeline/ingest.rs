//! Upload validation and text extraction.
//!
//! Only plain text is actually read. PDF and Word uploads pass validation but
//! come back as [`IngestOutcome::Unsupported`] so callers can show the
//! limitation instead of treating a placeholder as document content.

use serde::Serialize;

pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";

const PDF_UNSUPPORTED: &str = "PDF text extraction requires server-side processing. For now, please use .txt files or paste text directly.";
const WORD_UNSUPPORTED: &str = "Word document text extraction requires server-side processing. For now, please use .txt files or paste text directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Pdf,
    Word,
}

impl DocumentFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Browsers may append parameters, e.g. "text/plain; charset=utf-8".
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence {
            MIME_TEXT => Some(DocumentFormat::Text),
            MIME_PDF => Some(DocumentFormat::Pdf),
            MIME_DOCX | MIME_DOC => Some(DocumentFormat::Word),
            _ => None,
        }
    }

    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(DocumentFormat::Text),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" | "doc" => Some(DocumentFormat::Word),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("File size must be less than 5MB")]
    TooLarge,
    #[error("Please upload a .txt, .pdf, or .docx file")]
    UnsupportedType,
    #[error("Could not extract text from the file")]
    Empty,
    #[error("Error processing file. Please try a different file.")]
    Unreadable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum IngestOutcome {
    Text {
        file_name: String,
        text: String,
    },
    Unsupported {
        file_name: String,
        format: DocumentFormat,
        message: String,
    },
}

/// Checks size and type only; never touches the contents.
pub fn validate(size: u64, format: Option<DocumentFormat>) -> Result<DocumentFormat, IngestError> {
    if size > MAX_FILE_BYTES {
        return Err(IngestError::TooLarge);
    }
    format.ok_or(IngestError::UnsupportedType)
}

/// Turn already-validated file contents into an outcome.
pub fn extract(
    file_name: &str,
    format: DocumentFormat,
    contents: &[u8],
) -> Result<IngestOutcome, IngestError> {
    let file_name = file_name.to_string();
    match format {
        DocumentFormat::Text => {
            let text = std::str::from_utf8(contents).map_err(|_| IngestError::Unreadable)?;
            if text.trim().is_empty() {
                return Err(IngestError::Empty);
            }
            Ok(IngestOutcome::Text {
                file_name,
                text: text.to_string(),
            })
        }
        DocumentFormat::Pdf => Ok(IngestOutcome::Unsupported {
            file_name,
            format,
            message: PDF_UNSUPPORTED.into(),
        }),
        DocumentFormat::Word => Ok(IngestOutcome::Unsupported {
            file_name,
            format,
            message: WORD_UNSUPPORTED.into(),
        }),
    }
}

/// Accumulates a streamed upload. Only plain text is kept; other formats are
/// counted for the size check and dropped.
#[derive(Debug)]
pub struct UploadBuffer {
    format: Option<DocumentFormat>,
    size: u64,
    contents: Vec<u8>,
}

impl UploadBuffer {
    pub fn new(mime: &str) -> Self {
        Self {
            format: DocumentFormat::from_mime(mime),
            size: 0,
            contents: Vec::new(),
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns `false` once the upload is over the limit and reading should stop.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        self.size += chunk.len() as u64;
        if self.size > MAX_FILE_BYTES {
            self.contents.clear();
            return false;
        }
        if self.format == Some(DocumentFormat::Text) {
            self.contents.extend_from_slice(chunk);
        }
        true
    }

    pub fn finish(self, file_name: &str) -> Result<IngestOutcome, IngestError> {
        let format = validate(self.size, self.format)?;
        extract(file_name, format, &self.contents)
    }
}

/// Ingest a file from disk. Size and type are checked from metadata and the
/// extension before the file is opened for reading.
pub async fn ingest_path(path: &std::path::Path) -> anyhow::Result<IngestOutcome> {
    let metadata = tokio::fs::metadata(path).await?;
    let format = validate(metadata.len(), DocumentFormat::from_extension(path))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Only plain text is ever read.
    let contents = match format {
        DocumentFormat::Text => tokio::fs::read(path).await?,
        DocumentFormat::Pdf | DocumentFormat::Word => Vec::new(),
    };
    Ok(extract(&file_name, format, &contents)?)
}
