use std::env;

use crate::credits::DEFAULT_CREDITS;
use crate::gemini::DEMO_KEY;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_IDLE_MINUTES: u32 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_image_model: String,
    pub port: u16,
    pub initial_credits: u32,
    /// Sessions untouched for longer than this are dropped by the sweeper.
    pub session_idle_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: DEMO_KEY.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            gemini_image_model: DEFAULT_IMAGE_MODEL.to_string(),
            port: DEFAULT_PORT,
            initial_credits: DEFAULT_CREDITS,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded).
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY").unwrap_or(defaults.gemini_api_key),
            gemini_api_base: non_empty("GEMINI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_api_base),
            gemini_image_model: non_empty("GEMINI_IMAGE_MODEL").unwrap_or(defaults.gemini_image_model),
            port: non_empty("PORT").and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
            initial_credits: non_empty("INITIAL_CREDITS").and_then(|v| v.parse().ok()).unwrap_or(defaults.initial_credits),
            session_idle_minutes: non_empty("SESSION_IDLE_MINUTES")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|m| *m > 0)
                .unwrap_or(defaults.session_idle_minutes),
        }
    }

    pub fn masked_api_key(&self) -> String {
        let visible: String = self.gemini_api_key.chars().take(4).collect();
        format!("{visible}***")
    }
}
