use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use promptscan::normalize::{normalize, NormalizedText};
use promptscan::process::{scan_base64_images, ProcessorConfig, ScanOutcome};
use promptscan::share::{copy_text, resolve_share, CopyFlavor, CopyOutput, ShareOutcome, SharePayload};
use promptscan::store::{PromptFilter, PromptStore, SavedPrompt, SqliteStorage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            message: Some(message.into()),
        }
    }
}

type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

fn ok<T>(data: T) -> ApiResult<T> {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

fn fail<T>(status: StatusCode, message: impl Into<String>) -> ApiResult<T> {
    (status, Json(ApiResponse::error(message)))
}

/// The store sits behind one async mutex so save/remove cycles never interleave.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<PromptStore<SqliteStorage>>>,
    pub processor: ProcessorConfig,
}

impl AppState {
    pub fn new(store: PromptStore<SqliteStorage>, processor: ProcessorConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            processor,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/health", get(|| async { "healthy" }))
        .route("/normalize", post(normalize_text))
        .route("/scan", post(scan))
        .route("/prompts", get(list_prompts).post(save_prompt))
        .route("/prompts/:id", get(get_prompt).delete(remove_prompt))
        .route("/tags", get(list_tags))
        .route("/copy", post(copy))
        .route("/share", post(share))
        .with_state(state)
}

#[derive(Deserialize)]
struct TextRequest {
    text: String,
}

async fn normalize_text(Json(payload): Json<TextRequest>) -> ApiResult<NormalizedText> {
    ok(normalize(&payload.text))
}

#[derive(Deserialize)]
struct ScanRequest {
    images: Vec<String>, // base64 or data URLs
    previous_text: Option<String>,
    polish: Option<bool>,
}

async fn scan(State(state): State<AppState>, Json(payload): Json<ScanRequest>) -> ApiResult<ScanOutcome> {
    if payload.images.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "No images provided");
    }
    log::info!("Scanning {} image(s)", payload.images.len());

    let mut config = state.processor.clone();
    if let Some(polish) = payload.polish {
        config.polish = polish;
    }

    match scan_base64_images(&payload.images, payload.previous_text.as_deref(), &config).await {
        Ok(outcome) => ok(outcome),
        Err(err) => {
            log::error!("Scan failed: {:#}", err);
            fail(StatusCode::UNPROCESSABLE_ENTITY, format!("Scanning failed: {:#}", err))
        }
    }
}

async fn list_prompts(
    State(state): State<AppState>,
    Query(filter): Query<PromptFilter>,
) -> ApiResult<Vec<SavedPrompt>> {
    let store = state.store.lock().await;
    ok(store.search(&filter))
}

async fn save_prompt(State(state): State<AppState>, Json(payload): Json<TextRequest>) -> ApiResult<SavedPrompt> {
    if payload.text.trim().is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Text is empty");
    }

    let store = state.store.lock().await;
    match store.save(&payload.text) {
        Ok(prompt) => (StatusCode::CREATED, Json(ApiResponse::ok(prompt))),
        Err(err) => {
            log::error!("Failed to save prompt: {:#}", err);
            fail(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to save prompt: {:#}", err))
        }
    }
}

async fn get_prompt(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<SavedPrompt> {
    let store = state.store.lock().await;
    match store.get(&id) {
        Some(prompt) => ok(prompt),
        None => fail(StatusCode::NOT_FOUND, format!("Prompt not found: {}", id)),
    }
}

async fn remove_prompt(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<String> {
    let store = state.store.lock().await;
    match store.remove(&id) {
        Ok(()) => ok(id),
        Err(err) => {
            log::error!("Failed to remove prompt {}: {:#}", id, err);
            fail(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to remove prompt: {:#}", err))
        }
    }
}

async fn list_tags(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let store = state.store.lock().await;
    ok(store.tags())
}

#[derive(Deserialize)]
struct CopyRequest {
    text: String,
    flavor: Option<CopyFlavor>,
}

async fn copy(Json(payload): Json<CopyRequest>) -> ApiResult<CopyOutput> {
    if payload.text.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Text is empty");
    }
    ok(copy_text(&payload.text, payload.flavor.unwrap_or(CopyFlavor::Standard)))
}

async fn share(Form(payload): Form<SharePayload>) -> ApiResult<ShareOutcome> {
    match resolve_share(&payload) {
        ShareOutcome::FileUnsupported => {
            fail(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Shared files must be uploaded through /scan")
        }
        outcome => ok(outcome),
    }
}
