// http server mode - run aura as an api

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::core::RESET_GREETING;
use crate::{Chat, Error, Gemini, Risk};

struct AppState {
    gemini: Gemini,
    // one conversation per process, one turn at a time
    chat: Mutex<Chat>,
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    risk: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    helpful: bool,
}

#[derive(Serialize)]
struct FeedbackResponse {
    recorded: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub struct Server;

impl Server {
    pub async fn run(gemini: Gemini, host: &str, port: u16) -> Result<(), Error> {
        let state = Arc::new(AppState {
            gemini,
            chat: Mutex::new(Chat::new()),
        });

        let app = Router::new()
            .route("/health", get(health))
            .route("/chat", post(chat))
            .route("/history", get(history))
            .route("/reset", post(reset))
            .route("/feedback", post(feedback))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("{host}:{port}");
        println!("server running at http://{addr}");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse {
                reply: String::new(),
                risk: false,
                error: Some("empty message".to_string()),
            }),
        );
    }

    let mut chat = state.chat.lock().await;
    let risk = Risk::scan(&req.message);
    let reply = chat.send(&state.gemini, &req.message).await;

    (
        StatusCode::OK,
        Json(ChatResponse {
            reply,
            risk,
            error: None,
        }),
    )
}

async fn history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let chat = state.chat.lock().await;
    let turns: Vec<serde_json::Value> = chat
        .transcript
        .iter()
        .map(|turn| serde_json::json!({ "role": turn.role.name(), "content": turn.content }))
        .collect();
    Json(serde_json::json!({ "turns": turns }))
}

async fn reset(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut chat = state.chat.lock().await;
    chat.reset();
    Json(serde_json::json!({ "greeting": RESET_GREETING }))
}

async fn feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeedbackRequest>,
) -> (StatusCode, Json<FeedbackResponse>) {
    let mut chat = state.chat.lock().await;
    let recorded = if req.helpful {
        chat.mark_positive()
    } else {
        chat.mark_negative()
    };

    let status = if recorded {
        StatusCode::OK
    } else {
        StatusCode::CONFLICT
    };
    (status, Json(FeedbackResponse { recorded }))
}
