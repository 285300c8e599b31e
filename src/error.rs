use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("Missing API key. Set one of: GEMINI_API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}
