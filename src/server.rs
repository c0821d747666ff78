use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::chat::{ChatInputModel, Conversation, ConversationSnapshot, InputSink};
use crate::config::AppConfig;
use crate::error::WidgetError;
use crate::responder::{self, HttpResponder, Responder, StaticResponder};
use crate::ui;

/// Upper bound for any single request. Reply streaming runs in the
/// background and is not covered.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pick the responder the configuration asks for.
pub fn build_responder(config: &AppConfig) -> anyhow::Result<Arc<dyn Responder>> {
    if let Some(base_url) = config.responder.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        info!(base_url = %base_url, "Using remote reply service");
        return Ok(Arc::new(HttpResponder::new(
            base_url,
            config.request_timeout(),
        )?));
    }

    info!("No reply service configured, using static replies");
    Ok(Arc::new(
        config
            .responder
            .static_reply
            .clone()
            .map(StaticResponder::new)
            .unwrap_or_default(),
    ))
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let responder = build_responder(&config)?;
    let state = AppState::new(responder, config.render_settings());

    spawn_cleanup(
        state.clone(),
        config.idle_timeout(),
        Duration::from_secs(config.sessions.cleanup_interval_secs.max(1)),
    );

    let app = router(state).nest_service("/static", ServeDir::new(&config.server.static_dir));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Routes for pages, widget fragments and the JSON view.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(|| async { "ok" }))
        .route("/chat/{id}", get(chat_page_handler))
        .route("/chat/{id}/widget", get(widget_handler))
        .route("/chat/{id}/messages", get(widget_handler).post(submit_handler))
        .route("/api/chat/{id}", get(api_get_chat))
        .layer(axum::middleware::from_fn(
            |req: Request, next: Next| async move {
                match tokio::time::timeout(REQUEST_TIMEOUT, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn spawn_cleanup(state: AppState, idle_timeout: Duration, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = state
                .conversations
                .cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                tracing::debug!(removed, "Dropped idle conversations");
            }
        }
    });
}

fn lookup(state: &AppState, id: &str) -> Result<Conversation, WidgetError> {
    state
        .conversations
        .get(id)
        .ok_or_else(|| WidgetError::ConversationNotFound(id.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Page with a fresh conversation.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let conversation = state.conversations.create();
    tracing::debug!(conversation_id = %conversation.id(), "Created conversation");
    Html(ui::render_chat_page(&state.render, conversation.snapshot()))
}

/// GET /chat/{id} - Page for an existing conversation.
async fn chat_page_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WidgetError> {
    let conversation = lookup(&state, &id)?;
    Ok(Html(ui::render_chat_page(
        &state.render,
        conversation.snapshot(),
    )))
}

/// GET /chat/{id}/widget - Widget fragment (polled while a reply loads).
async fn widget_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WidgetError> {
    let conversation = lookup(&state, &id)?;
    Ok(Html(ui::render_widget(&state.render, conversation.snapshot())))
}

/// Form body posted by the chat input.
#[derive(Debug, Deserialize)]
struct SubmitForm {
    /// Absent when the textarea was disabled.
    #[serde(default)]
    message: String,
}

/// POST /chat/{id}/messages - Apply the posted draft and submit it.
async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, WidgetError> {
    let conversation = lookup(&state, &id)?;
    let mut sink = InputSink::new(&conversation);

    let before = conversation.snapshot();
    if !before.is_loading {
        ChatInputModel::new(&before.new_message, false).on_change(form.message, &mut sink);
    }

    let drafted = conversation.snapshot();
    ChatInputModel::new(&drafted.new_message, drafted.is_loading).on_send_click(&mut sink);

    if let Some(prompt) = sink.into_submitted() {
        tracing::info!(
            conversation_id = %id,
            message_length = prompt.len(),
            "Message submitted"
        );
        let responder = Arc::clone(&state.responder);
        let conversation = conversation.clone();
        tokio::spawn(async move {
            responder::relay_reply(responder.as_ref(), &conversation, &prompt).await;
        });
    } else {
        tracing::debug!(conversation_id = %id, "Submission ignored");
    }

    Ok(Html(ui::render_widget(&state.render, conversation.snapshot())))
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/chat/{id} - Conversation state as JSON.
async fn api_get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationSnapshot>, StatusCode> {
    state
        .conversations
        .get(&id)
        .map(|c| Json(c.snapshot()))
        .ok_or(StatusCode::NOT_FOUND)
}
