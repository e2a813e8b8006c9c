use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::catalog::{Category, ModuleKind};
use crate::upload::ImageMime;

/// Image + prompt handed to the generator. Built once per image and never mutated.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    image: Bytes,
    mime: ImageMime,
    prompt: String,
}

impl GenerationRequest {
    pub fn new(image: Bytes, mime: ImageMime, prompt: String) -> Self {
        Self { image, mime, prompt }
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratedImageResult {
    pub id: Uuid,
    pub image_base64: String,
    /// Model output is treated as JPEG for display and download.
    pub mime_type: String,
    pub prompt: String,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CreateSessionRequest {
    pub module: ModuleKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SelectRequest {
    pub category: Category,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub variation: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct ModuleInfo {
    pub module: ModuleKind,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize, Clone)]
pub struct CategoryOptions {
    pub category: Category,
    pub label: &'static str,
    pub options: Vec<&'static str>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct UploadView {
    pub mime_type: &'static str,
    pub size: usize,
    pub received_at: DateTime<Utc>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct SessionView {
    pub id: Uuid,
    pub module: ModuleKind,
    pub selection: crate::selection::SelectionState,
    pub upload: Option<UploadView>,
    pub credits: u32,
    pub required_credits: u32,
    pub complete: bool,
    pub missing_message: Option<&'static str>,
    pub generating: bool,
    pub results: Vec<GeneratedImageResult>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
