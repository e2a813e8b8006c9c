use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::archive::ExportError;
use crate::credits::QuotaExhausted;
use crate::gemini::GeminiError;
use crate::selection::SelectionError;
use crate::upload::InvalidUpload;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidUpload(#[from] InvalidUpload),
    #[error(transparent)]
    InvalidSelection(#[from] SelectionError),
    #[error("{message}")]
    IncompleteSelection { message: String },
    #[error(transparent)]
    QuotaExhausted(#[from] QuotaExhausted),
    #[error("{message}")]
    GenerationFailure { message: String, completed: usize, requested: usize },
    #[error("Uma geração já está em andamento para esta sessão.")]
    GenerationInProgress,
    #[error("{0} not found")]
    NotFound(String),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("preset could not be stored: {0}")]
    Preset(#[from] serde_json::Error),
}

impl AppError {
    pub fn generation_failed(err: &GeminiError, completed: usize, requested: usize) -> Self {
        AppError::GenerationFailure {
            message: format!("Falha ao gerar a imagem: {err}. Verifique sua conexão ou tente novamente."),
            completed,
            requested,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUpload(_) | AppError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            AppError::IncompleteSelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::QuotaExhausted(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::GenerationFailure { .. } => StatusCode::BAD_GATEWAY,
            AppError::GenerationInProgress => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Export(ExportError::Empty) => StatusCode::NOT_FOUND,
            AppError::Export(_) | AppError::Preset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }
        let body = match &self {
            AppError::GenerationFailure { completed, requested, .. } => json!({
                "error": self.to_string(),
                "completed": completed,
                "requested": requested,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
