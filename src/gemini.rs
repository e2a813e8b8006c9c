use std::io::Cursor;

use async_trait::async_trait;
use base64::Engine;
use image::{codecs::jpeg::JpegEncoder, ImageBuffer, Rgb};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::GenerationRequest;

pub const DEMO_KEY: &str = "DEMO_KEY";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Model returned text instead of image. Possible reason: Safety policy or inability to generate. Response: \"{0}...\"")]
    TextInsteadOfImage(String),
    #[error("No image data or meaningful text found in the response. The model might have filtered the content or encountered an internal issue.")]
    NoImage,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("placeholder rendering failed: {0}")]
    Placeholder(String),
}

/// The external image model: one photo plus one instruction in, one image out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the generated image as base64.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeminiError>;
}

// Helper function to truncate base64 data in JSON for cleaner logging
fn truncate_base64_in_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "data" {
                    if let serde_json::Value::String(s) = val {
                        if s.len() > 100 && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=') {
                            *val = serde_json::Value::String(format!("{}...[truncated {} chars]", &s[..50], s.len() - 50));
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_base64_in_json(val);
            }
        }
        _ => {}
    }
}

fn preview(data: &str) -> String {
    match data.char_indices().nth(50) {
        Some((cut, _)) => format!("{}...[{} chars total]", &data[..cut], data.len()),
        None => data.to_string(),
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_api_base.clone(),
            model: config.gemini_image_model.clone(),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.api_key == DEMO_KEY
    }

    async fn perform_api_call(&self, request: &GenerationRequest) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key);

        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));

        let request_body = json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "data": base64::engine::general_purpose::STANDARD.encode(request.image()),
                            "mimeType": request.mime().as_str(),
                        }
                    },
                    {"text": request.prompt()}
                ]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "candidateCount": 1
            }
        });

        let mut logged = request_body.clone();
        truncate_base64_in_json(&mut logged);
        info!("📤 Request body: {}", serde_json::to_string_pretty(&logged).unwrap_or_default());

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ API Error response: {}", error_body);
            return Err(GeminiError::Status { status: status.as_u16(), body: error_body });
        }

        let response_text = response.text().await.map_err(|e| GeminiError::Http(e.to_string()))?;

        if let Ok(mut json_value) = serde_json::from_str::<serde_json::Value>(&response_text) {
            truncate_base64_in_json(&mut json_value);
            info!("📥 Raw Gemini API response: {}", serde_json::to_string(&json_value).unwrap_or_default());
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| GeminiError::Parse(e.to_string()))?;

        extract_image(&parsed)
    }

    /// Local stand-in used when no API key is configured: a small gradient
    /// JPEG so the rest of the flow can be exercised offline.
    fn generate_placeholder_image(&self) -> Result<String, GeminiError> {
        let mut rng = rand::thread_rng();
        let base: [u8; 3] = [rng.gen_range(40..200), rng.gen_range(40..200), rng.gen_range(40..200)];
        let (width, height) = (256u32, 320u32);
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let shade = ((x + y) * 55 / (width + height)) as u8;
            Rgb([base[0].saturating_add(shade), base[1].saturating_add(shade), base[2].saturating_add(shade)])
        });

        let mut buf = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buf, 80)
            .encode_image(&img)
            .map_err(|e| GeminiError::Placeholder(e.to_string()))?;
        Ok(base64::engine::general_purpose::STANDARD.encode(buf.into_inner()))
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeminiError> {
        if self.is_demo() {
            info!("Using demo mode - no real images generated");
            let placeholder = self.generate_placeholder_image()?;
            info!("📦 Generated placeholder image: {}", preview(&placeholder));
            return Ok(placeholder);
        }

        info!("Generating image with Gemini API...");
        match self.perform_api_call(request).await {
            Ok(image_data) => {
                info!("✅ Successfully generated image: {}", preview(&image_data));
                Ok(image_data)
            }
            Err(e) => {
                error!("❌ Failed to generate image: {}", e);
                Err(e)
            }
        }
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
    #[allow(dead_code)]
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
    #[serde(rename = "mimeType", default)]
    mime_type: String,
}

/// First inline image of the first candidate that has one. Without an image,
/// any text the model sent back becomes the failure reason.
fn extract_image(resp: &GeminiResponse) -> Result<String, GeminiError> {
    for c in &resp.candidates {
        for p in &c.content.parts {
            if let Part::Inline { inline_data } = p {
                info!("🎯 Found image data with mime type: {}", inline_data.mime_type);
                return Ok(inline_data.data.clone());
            }
        }
    }

    let text: String = resp
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ");

    if text.trim().is_empty() {
        warn!("⚠️ No inline image data found in response structure");
        Err(GeminiError::NoImage)
    } else {
        warn!("⚠️ Model answered with text instead of an image");
        Err(GeminiError::TextInsteadOfImage(text.chars().take(200).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> GeminiResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn extracts_inline_image() {
        let resp = parse(json!({
            "candidates": [{"content": {"parts": [
                {"text": "here you go"},
                {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
            ]}}]
        }));
        assert_eq!(extract_image(&resp).unwrap(), "aGVsbG8=");
    }

    #[test]
    fn text_only_answer_is_classified() {
        let long = "I cannot create that image. ".repeat(20);
        let resp = parse(json!({"candidates": [{"content": {"parts": [{"text": long}]}}]}));
        match extract_image(&resp) {
            Err(GeminiError::TextInsteadOfImage(t)) => assert_eq!(t.chars().count(), 200),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_answer_has_no_image() {
        let resp = parse(json!({"candidates": []}));
        assert!(matches!(extract_image(&resp), Err(GeminiError::NoImage)));
        let resp = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert!(matches!(extract_image(&resp), Err(GeminiError::NoImage)));
    }

    #[test]
    fn truncates_long_base64_for_logs() {
        let mut body = json!({"parts": [{"inlineData": {"data": "A".repeat(500)}}]});
        truncate_base64_in_json(&mut body);
        let data = body["parts"][0]["inlineData"]["data"].as_str().unwrap();
        assert!(data.contains("[truncated 450 chars]"));
    }

    #[test]
    fn non_base64_data_is_logged_untouched() {
        let text = "ação ".repeat(40);
        let mut body = json!({"data": text.clone()});
        truncate_base64_in_json(&mut body);
        assert_eq!(body["data"], text);
        assert!(preview(&text).starts_with("ação ação"));
    }

    #[tokio::test]
    async fn demo_mode_returns_a_jpeg() {
        let client = GeminiClient::new(&Config::default());
        assert!(client.is_demo());
        let request = GenerationRequest::new(
            bytes::Bytes::from_static(b"\xFF\xD8\xFF"),
            crate::upload::ImageMime::Jpeg,
            "prompt".into(),
        );
        let data = client.generate(&request).await.unwrap();
        let raw = base64::engine::general_purpose::STANDARD.decode(data).unwrap();
        assert_eq!(image::guess_format(&raw).unwrap(), image::ImageFormat::Jpeg);
    }
}
