//! Company logo shown in the header.
//!
//! The logo is kept as raw bytes plus a MIME type and can be rendered as a
//! `data:` URL, the same encoding a browser produces for an uploaded image.
//! Nothing about the image is validated.

use anyhow::{Context, Result};
use base64::Engine as _;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    name: Option<String>,
    mime: String,
    bytes: Vec<u8>,
}

impl Logo {
    pub fn from_bytes(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            name: None,
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a logo from disk, guessing the MIME type from the extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read logo file {}", path.display()))?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        Ok(Self {
            name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
            mime: mime.essence_str().to_string(),
            bytes,
        })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn data_url(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, payload)
    }

    /// Short description for places that cannot draw the image
    pub fn label(&self) -> String {
        let size = human_size(self.bytes.len());
        match &self.name {
            Some(name) => format!("{} ({}, {})", name, self.mime, size),
            None => format!("{} ({})", self.mime, size),
        }
    }
}

fn human_size(len: usize) -> String {
    if len < 1024 {
        format!("{} B", len)
    } else if len < 1024 * 1024 {
        format!("{:.1} KB", len as f64 / 1024.0)
    } else {
        format!("{:.1} MB", len as f64 / (1024.0 * 1024.0))
    }
}
