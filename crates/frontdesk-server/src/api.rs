use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, Path, State},
    http::{header, Method},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use frontdesk_store::{
    CallDoc, ChatMessage, Concern, ConcernStatus, Image, NewCallDoc, NewChatMessage, NewConcern,
    NewImage, Store,
};

use crate::config::ServerConfig;
use crate::content_store::ContentStore;
use crate::error::ApiError;
use crate::upload;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub content_store: Arc<ContentStore>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    // Multipart framing adds overhead on top of the file itself, so the
    // body cap sits above the per-file cap enforced by the pipeline.
    let body_limit = state.config.max_image_size + 1024 * 1024;

    Router::new()
        .route("/health", get(health_check))
        .route("/concerns", get(list_concerns).post(create_concern))
        .route("/concerns/category/:category", get(concerns_by_category))
        .route("/concerns/patient/:name/:dob", get(concerns_by_patient))
        .route("/concerns/:id/status", patch(update_concern_status))
        .route("/concerns/:id/call-docs", get(list_call_docs))
        .route("/call-docs", post(create_call_doc))
        .route("/concerns/:id/chat", get(list_chat_messages))
        .route("/chat", post(create_chat_message))
        .route("/images/upload", post(upload_image))
        .route("/images/file/:filename", get(serve_image))
        .route("/images/:id", get(list_images).delete(delete_image))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Deserialize)]
struct StatusUpdateRequest {
    status: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ─── Concerns ───

async fn list_concerns(State(state): State<AppState>) -> Json<Vec<Concern>> {
    Json(state.store.concerns().await)
}

async fn concerns_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Concern>> {
    Json(state.store.concerns_by_category(&category).await)
}

async fn concerns_by_patient(
    State(state): State<AppState>,
    Path((name, dob)): Path<(String, String)>,
) -> Json<Vec<Concern>> {
    Json(state.store.concerns_by_patient(&name, &dob).await)
}

async fn create_concern(
    State(state): State<AppState>,
    payload: Result<Json<NewConcern>, JsonRejection>,
) -> Result<Json<Concern>, ApiError> {
    let Json(new) =
        payload.map_err(|_| ApiError::BadRequest("Invalid concern data".to_string()))?;
    let concern = state.store.create_concern(new).await;
    info!(id = %concern.id, category = %concern.category, "Concern created");
    Ok(Json(concern))
}

async fn update_concern_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<Concern>, ApiError> {
    let Json(req) =
        payload.map_err(|_| ApiError::BadRequest("Invalid status value".to_string()))?;
    let status: ConcernStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid status value".to_string()))?;

    let concern = state
        .store
        .update_concern_status(id, status)
        .await
        .ok_or(ApiError::NotFound("Concern"))?;

    info!(id = %id, status = %status, "Concern status updated");
    Ok(Json(concern))
}

// ─── Call documentation ───

async fn list_call_docs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<CallDoc>> {
    Json(state.store.call_docs(id).await)
}

async fn create_call_doc(
    State(state): State<AppState>,
    payload: Result<Json<NewCallDoc>, JsonRejection>,
) -> Result<Json<CallDoc>, ApiError> {
    let Json(new) = payload
        .map_err(|_| ApiError::BadRequest("Invalid call documentation data".to_string()))?;
    Ok(Json(state.store.create_call_doc(new).await))
}

// ─── Chat ───

async fn list_chat_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<ChatMessage>> {
    Json(state.store.chat_messages(id).await)
}

async fn create_chat_message(
    State(state): State<AppState>,
    payload: Result<Json<NewChatMessage>, JsonRejection>,
) -> Result<Json<ChatMessage>, ApiError> {
    let Json(new) =
        payload.map_err(|_| ApiError::BadRequest("Invalid chat message data".to_string()))?;
    Ok(Json(state.store.create_chat_message(new).await))
}

// ─── Images ───

async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Image>, ApiError> {
    let mut file: Option<(String, String, axum::body::Bytes)> = None;
    let mut concern_id_raw: Option<String> = None;
    let mut call_doc_id_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                if file.is_some() {
                    return Err(ApiError::BadRequest(
                        "Exactly one file per upload".to_string(),
                    ));
                }
                let filename = field.file_name().unwrap_or("upload").to_string();
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
                file = Some((filename, mimetype, data));
            }
            "concernId" => concern_id_raw = Some(text_field(field).await?),
            "callDocId" => call_doc_id_raw = Some(text_field(field).await?),
            _ => {}
        }
    }

    let (filename, mimetype, data) =
        file.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    upload::validate(&filename, &mimetype, data.len(), state.config.max_image_size)?;

    let name = upload::storage_name(&filename);
    state.content_store.save(&name, &data).await?;

    // Anything that fails once the bytes hit disk must clean them up.
    let registered = async {
        let concern_id = parse_optional_id(concern_id_raw, "concernId")?;
        let call_doc_id = parse_optional_id(call_doc_id_raw, "callDocId")?;
        Ok::<Image, ApiError>(
            state
                .store
                .create_image(NewImage {
                    concern_id,
                    call_doc_id,
                    filename,
                    mimetype,
                    size: data.len() as u64,
                    path: name.clone(),
                })
                .await,
        )
    }
    .await;

    match registered {
        Ok(image) => {
            info!(id = %image.id, filename = %image.filename, size = image.size, "Image uploaded");
            Ok(Json(image))
        }
        Err(err) => {
            if let Err(cleanup) = state.content_store.remove(&name).await {
                warn!(name = %name, error = %cleanup, "Failed to remove orphaned upload");
            }
            Err(err)
        }
    }
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {e}")))
}

/// An absent or empty association field means "unattached".
fn parse_optional_id(raw: Option<String>, field: &str) -> Result<Option<Uuid>, ApiError> {
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid {field}"))),
    }
}

async fn list_images(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<Vec<Image>> {
    Json(state.store.images(Some(id), None).await)
}

async fn serve_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.content_store.read(&filename).await?;
    Ok(([(header::CONTENT_TYPE, upload::mime_for(&filename))], data))
}

async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let image = state.store.image(id).await.ok_or(ApiError::NotFound("Image"))?;

    if !state.content_store.remove(&image.path).await? {
        warn!(id = %id, path = %image.path, "Blob already absent at delete");
    }
    state.store.delete_image(id).await;

    info!(id = %id, "Image deleted");
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
