use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    archive,
    catalog::{Category, ModuleKind},
    config::Config,
    error::AppError,
    gemini::ImageGenerator,
    models::{CategoryOptions, CreateSessionRequest, GenerateRequest, ModuleInfo, SelectRequest, SessionView, UploadRequest},
    preset::PresetStore,
    prompt::ComposeOptions,
    session::{run_plan, Session},
    upload::{InvalidUpload, MAX_UPLOAD_BODY_BYTES},
};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    pub presets: Arc<PresetStore>,
    pub generator: Arc<dyn ImageGenerator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            sessions: Arc::default(),
            presets: Arc::new(PresetStore::new()),
            generator,
            config: Arc::new(config),
        }
    }

    fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> Result<T, AppError>) -> Result<T, AppError> {
        let mut guard = self.sessions.write();
        let session = guard.get_mut(&id).ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
        f(session)
    }

    /// Drops sessions idle for longer than `max_idle`. Sessions with a
    /// generation in flight are kept so the result can still land.
    pub fn remove_idle(&self, max_idle: chrono::Duration, now: DateTime<Utc>) -> usize {
        let mut guard = self.sessions.write();
        let before = guard.len();
        guard.retain(|_, s| s.is_generating() || now - s.updated_at < max_idle);
        before - guard.len()
    }
}

/// Periodically expires idle sessions, per `Config::session_idle_minutes`.
pub fn spawn_idle_sweeper(state: AppState) -> tokio::task::JoinHandle<()> {
    let max_idle = chrono::Duration::minutes(i64::from(state.config.session_idle_minutes));
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(60));
        loop {
            tick.tick().await;
            let removed = state.remove_idle(max_idle, Utc::now());
            if removed > 0 {
                tracing::info!("🧹 Expired {} idle session(s)", removed);
            }
        }
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/modules", get(list_modules))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/options/:category", get(get_options))
        .route("/api/sessions/:id/selection", put(select))
        .route(
            "/api/sessions/:id/upload",
            post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
        .route("/api/sessions/:id/generate", post(generate))
        .route("/api/sessions/:id/reset", post(reset))
        .route("/api/sessions/:id/preset", post(save_preset))
        .route("/api/sessions/:id/preset/load", post(load_preset))
        .route("/api/sessions/:id/export", get(export))
        .with_state(state)
}

pub async fn list_modules() -> Json<Vec<ModuleInfo>> {
    Json(
        ModuleKind::ALL
            .iter()
            .map(|m| ModuleInfo { module: *m, name: m.display_name(), description: m.description() })
            .collect(),
    )
}

pub async fn create_session(State(state): State<AppState>, Json(body): Json<CreateSessionRequest>) -> Json<SessionView> {
    let session = Session::new(body.module, state.config.initial_credits);
    tracing::info!("🎯 Created {} session {} with {} credits", body.module, session.id, session.credits());
    let view = session.view();
    state.sessions.write().insert(session.id, session);
    Json(view)
}

pub async fn get_session(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    state.with_session(id, |s| Ok(Json(s.view())))
}

pub async fn delete_session(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<StatusCode, AppError> {
    match state.sessions.write().remove(&id) {
        Some(_) => {
            tracing::info!("🗑️ Session {} closed", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(format!("session {id}"))),
    }
}

pub async fn get_options(
    Path((id, category)): Path<(Uuid, Category)>,
    State(state): State<AppState>,
) -> Result<Json<CategoryOptions>, AppError> {
    state.with_session(id, |s| s.options(category).map(Json))
}

pub async fn select(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<SelectRequest>,
) -> Result<Json<SessionView>, AppError> {
    state.with_session(id, |s| {
        s.select(body.category, body.value.as_deref())?;
        Ok(Json(s.view()))
    })
}

pub async fn upload(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let Json(body) = body.map_err(|rejection| upload_rejection(&rejection, &headers))?;
    state.with_session(id, |s| {
        s.upload(&body.mime_type, &body.data)?;
        Ok(Json(s.view()))
    })
}

// A body over the cap never reaches validation; report it like any other
// oversized photo.
fn upload_rejection(rejection: &JsonRejection, headers: &HeaderMap) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let body_len = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(MAX_UPLOAD_BODY_BYTES);
        return InvalidUpload::TooLarge { size: body_len / 4 * 3 }.into();
    }
    tracing::warn!("⚠️ Upload body rejected: {}", rejection.body_text());
    InvalidUpload::Unreadable.into()
}

#[axum::debug_handler]
pub async fn generate(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    body: Option<Json<GenerateRequest>>,
) -> Result<Json<SessionView>, AppError> {
    let Json(body) = body.unwrap_or_default();

    // Plan under the lock, call the model without it.
    let plan = state.with_session(id, |s| s.prepare(ComposeOptions { variation: body.variation }))?;
    let outcome = run_plan(state.generator.as_ref(), plan).await;

    let mut guard = state.sessions.write();
    match guard.get_mut(&id) {
        Some(session) => {
            session.commit(outcome)?;
            Ok(Json(session.view()))
        }
        None => {
            tracing::warn!("⚠️ Session {} disappeared while generating; {} image(s) dropped", id, outcome.results.len());
            Err(AppError::NotFound(format!("session {id}")))
        }
    }
}

pub async fn reset(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    state.with_session(id, |s| {
        s.reset();
        tracing::info!("🔄 Session {} reset", id);
        Ok(Json(s.view()))
    })
}

pub async fn save_preset(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let (module, snapshot) = state.with_session(id, |s| Ok((s.module, s.snapshot())))?;
    state.presets.save(module, &snapshot)?;
    Ok(Json(json!({ "key": module.preset_key(), "preset": snapshot })))
}

pub async fn load_preset(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    let module = state.with_session(id, |s| Ok(s.module))?;
    let snapshot = state
        .presets
        .load(module)?
        .ok_or_else(|| AppError::NotFound(format!("preset {}", module.preset_key())))?;
    state.with_session(id, |s| {
        s.apply_preset(&snapshot)?;
        Ok(Json(s.view()))
    })
}

pub async fn export(Path(id): Path<Uuid>, State(state): State<AppState>) -> Result<Response, AppError> {
    let (catalog, results) = state.with_session(id, |s| Ok((s.catalog(), s.results().to_vec())))?;
    let bytes = archive::export_zip(catalog, &results)?;
    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", archive::archive_name(catalog))),
    ];
    Ok((headers, bytes).into_response())
}
