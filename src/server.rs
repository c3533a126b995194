//! HTTP API server.
//!
//! Wires the record store, the LLM client, and the local response engine into
//! an axum router. Replies to chat messages come from the remote LLM when it
//! is configured and reachable; the local engine is the guaranteed fallback,
//! so `POST /api/companions/{id}/message` always produces an assistant reply.

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

use crate::config::MemoriaConfig;
use crate::engine::{ConversationContext, ResponseEngine, TemplateSet};
use crate::llm::LlmClient;
use crate::storage::types::{Companion, Conversation, Message, NewCompanion, Role};
use crate::storage::MemStore;

/// Number of prior messages handed to the local engine as history.
const HISTORY_WINDOW: usize = 6;

struct AppState {
    store: Mutex<MemStore>,
    engine: ResponseEngine,
    llm: Option<LlmClient>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

fn lock_store(state: &AppState) -> Result<MutexGuard<'_, MemStore>, ApiError> {
    state.store.lock().map_err(|_| {
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "storage lock poisoned")
    })
}

/// Start the HTTP server and block until ctrl-c.
pub async fn serve(config: MemoriaConfig) -> Result<()> {
    let templates = match &config.engine.templates_path {
        Some(path) => TemplateSet::load(path)
            .with_context(|| format!("failed to load templates from {path}"))?,
        None => TemplateSet::builtin().context("built-in templates are invalid")?,
    };
    let engine = ResponseEngine::new(templates, config.engine.clone());

    let llm = LlmClient::from_config(&config.llm)?;
    if llm.is_none() {
        info!("no LLM API key configured — replies come from the local engine");
    }

    let state = Arc::new(AppState {
        store: Mutex::new(MemStore::new()),
        engine,
        llm,
    });

    let router = Router::new()
        .route("/api/health", get(health))
        .route("/api/companions/upload", post(upload_photo))
        .route("/api/companions", post(create_companion))
        .route("/api/companions/{id}", get(get_companion))
        .route("/api/companions/{id}/conversation", get(get_conversation))
        .route("/api/companions/{id}/message", post(post_message))
        .layer(DefaultBodyLimit::max(config.upload.max_upload_bytes))
        .with_state(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "Memoria listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            info!("shutting down");
        })
        .await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    avatar_url: String,
    original_photo_url: String,
}

/// Accept a photo and return it as a base64 data URL.
///
/// Avatar generation is simulated: the uploaded photo stands in for both the
/// avatar and the original until a real generation service is wired up.
async fn upload_photo(mut multipart: Multipart) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        warn!(error = %err, "multipart read failed");
        api_error(StatusCode::BAD_REQUEST, "invalid multipart payload")
    })? {
        if field.name() != Some("photo") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|err| {
            warn!(error = %err, "photo upload read failed");
            api_error(StatusCode::BAD_REQUEST, "failed to read uploaded photo")
        })?;

        info!(bytes = bytes.len(), content_type = %content_type, "photo uploaded");
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let data_url = format!("data:{content_type};base64,{encoded}");
        return Ok(Json(UploadResponse {
            success: true,
            avatar_url: data_url.clone(),
            original_photo_url: data_url,
        }));
    }

    Err(api_error(StatusCode::BAD_REQUEST, "no file uploaded"))
}

/// Persona instructions seeded into every new conversation.
fn system_prompt(companion: &Companion) -> String {
    format!(
        "You are a compassionate AI companion based on a loved one who has passed away. \
         Your name is {}. Respond with empathy, warmth, and in a conversational manner. \
         Personality: {}. \
         Avoid mentioning that you are an AI or discussing your limitations. \
         Instead, focus on providing comfort, sharing memories, and having meaningful conversations.",
        companion.name, companion.personality
    )
}

async fn create_companion(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewCompanion>,
) -> Result<(StatusCode, Json<Companion>), ApiError> {
    if new.name.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "companion name is required"));
    }

    let mut store = lock_store(&state)?;
    let companion = store.create_companion(new);
    let seed = Message::new(Role::System, system_prompt(&companion));
    store.create_conversation(companion.id, vec![seed]);
    info!(companion_id = companion.id, name = %companion.name, "companion created");

    Ok((StatusCode::CREATED, Json(companion)))
}

async fn get_companion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Companion>, ApiError> {
    let store = lock_store(&state)?;
    store
        .companion(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "companion not found"))
}

async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Conversation>, ApiError> {
    let store = lock_store(&state)?;
    store
        .conversation_by_companion(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "conversation not found"))
}

#[derive(Debug, Deserialize)]
struct SendMessage {
    message: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: Message,
    conversation: Conversation,
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<SendMessage>,
) -> Result<Json<MessageResponse>, ApiError> {
    if body.message.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "invalid message format"));
    }

    // Snapshot the records so the lock is not held across the LLM call.
    let (companion, conversation) = {
        let store = lock_store(&state)?;
        let companion = store
            .companion(id)
            .cloned()
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "companion not found"))?;
        let conversation = store
            .conversation_by_companion(id)
            .cloned()
            .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "conversation not found"))?;
        (companion, conversation)
    };

    let user_message = Message::new(Role::User, body.message.clone());
    let mut llm_messages = conversation.messages.clone();
    llm_messages.push(user_message.clone());

    let reply = match &state.llm {
        Some(client) => match client.chat(&llm_messages).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, companion_id = id, "LLM request failed, using local engine");
                local_reply(&state.engine, &companion, &conversation, &body.message)
            }
        },
        None => local_reply(&state.engine, &companion, &conversation, &body.message),
    };

    let assistant_message = Message::new(Role::Assistant, reply);

    // Append to the live record rather than writing back the snapshot: a
    // concurrent post to the same companion may have landed during the LLM
    // await, and its exchange must survive.
    let mut store = lock_store(&state)?;
    let updated = store
        .append_messages(conversation.id, vec![user_message, assistant_message.clone()])
        .cloned()
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "conversation not found"))?;

    Ok(Json(MessageResponse {
        message: assistant_message,
        conversation: updated,
    }))
}

/// Build an engine context from the stored records and generate a reply.
fn local_reply(
    engine: &ResponseEngine,
    companion: &Companion,
    conversation: &Conversation,
    message: &str,
) -> String {
    let history: String = conversation
        .messages
        .iter()
        .rev()
        .take(HISTORY_WINDOW)
        .rev()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let ctx = ConversationContext {
        name: companion.name.clone(),
        description: companion.description.clone(),
        personality: Some(companion.personality.clone()),
        history: Some(history),
        last_message: message.to_string(),
    };

    engine.generate(&ctx, &mut rand::thread_rng())
}
