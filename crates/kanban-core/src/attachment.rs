use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::KanbanError;

/// A file stored inline with its task as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

impl FileAttachment {
    pub fn from_bytes(id: String, name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            id,
            name: name.to_string(),
            size: bytes.len() as u64,
            mime_type: mime_type.to_string(),
            data: encode_data_url(mime_type, bytes),
            created_at: Utc::now(),
        }
    }

    /// Decode the inline payload back into the original bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, KanbanError> {
        decode_data_url(&self.data)
    }

    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_mime(&self.mime_type)
    }

    /// Images and PDFs open in a preview; everything else downloads.
    pub fn is_previewable(&self) -> bool {
        self.mime_type.starts_with("image/") || self.mime_type.contains("pdf")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Pdf,
    Document,
    Spreadsheet,
    Text,
    Other,
}

impl AttachmentKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            AttachmentKind::Image
        } else if mime.contains("pdf") {
            AttachmentKind::Pdf
        } else if mime.contains("word") || mime.contains("document") {
            AttachmentKind::Document
        } else if mime.contains("excel") || mime.contains("spreadsheet") {
            AttachmentKind::Spreadsheet
        } else if mime.contains("text") {
            AttachmentKind::Text
        } else {
            AttachmentKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Pdf => "pdf",
            AttachmentKind::Document => "document",
            AttachmentKind::Spreadsheet => "spreadsheet",
            AttachmentKind::Text => "text",
            AttachmentKind::Other => "other",
        }
    }
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn decode_data_url(data: &str) -> Result<Vec<u8>, KanbanError> {
    let rest = data
        .strip_prefix("data:")
        .ok_or_else(|| KanbanError::InvalidInput("attachment is not a data URL".into()))?;
    let (_, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| KanbanError::InvalidInput("attachment is not base64 encoded".into()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| KanbanError::InvalidInput(format!("attachment payload: {e}")))
}

/// Human-readable size: bytes below 1 KiB, then KB and MB with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
