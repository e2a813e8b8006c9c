use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use image::ImageFormat;
use serde::Serialize;
use thiserror::Error;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request body cap for uploads: the largest accepted image as base64 plus
/// room for the JSON envelope and a data-URL prefix.
pub const MAX_UPLOAD_BODY_BYTES: usize = (MAX_UPLOAD_BYTES + 2) / 3 * 4 + 64 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidUpload {
    #[error("Formato de arquivo inválido. Apenas JPG/PNG são permitidos.")]
    UnsupportedFormat { mime_type: String },
    #[error("Arquivo muito grande. Tamanho máximo é 5MB.")]
    TooLarge { size: usize },
    #[error("Erro ao ler o arquivo.")]
    Unreadable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMime {
    pub fn parse(mime_type: &str) -> Option<Self> {
        match mime_type {
            "image/jpeg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }

    fn format(&self) -> ImageFormat {
        match self {
            ImageMime::Jpeg => ImageFormat::Jpeg,
            ImageMime::Png => ImageFormat::Png,
        }
    }
}

/// The user's base photo, validated and decoded.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub mime: ImageMime,
    pub bytes: Bytes,
    pub received_at: DateTime<Utc>,
}

impl UploadedImage {
    /// Accepts raw base64 or a `data:<mime>;base64,` URL. Checks run in order:
    /// declared type, decoded size, then the content must really be that type.
    pub fn from_base64(mime_type: &str, data: &str) -> Result<Self, InvalidUpload> {
        let mime = ImageMime::parse(mime_type.trim())
            .ok_or_else(|| InvalidUpload::UnsupportedFormat { mime_type: mime_type.to_string() })?;

        let payload = match data.split_once(',') {
            Some((header, rest)) if header.starts_with("data:") => rest,
            _ => data,
        };
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|_| InvalidUpload::Unreadable)?;

        Self::from_bytes(mime, decoded)
    }

    pub fn from_bytes(mime: ImageMime, bytes: Vec<u8>) -> Result<Self, InvalidUpload> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(InvalidUpload::TooLarge { size: bytes.len() });
        }
        match image::guess_format(&bytes) {
            Ok(format) if format == mime.format() => {}
            _ => return Err(InvalidUpload::Unreadable),
        }
        Ok(Self { mime, bytes: Bytes::from(bytes), received_at: Utc::now() })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
