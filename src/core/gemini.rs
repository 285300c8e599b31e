// gemini integration - the hosted model behind aura

use crate::Error;
use log::info;
use serde_json::{Value, json};
use std::collections::VecDeque;

const MODEL: &str = "gemini-1.5-flash-latest";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// everything gets the same moderate blocking threshold
const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// one incremental piece of a streamed reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    SafetyBlock { reason: String, message: String },
}

/// one turn in the wire format gemini expects ("user" / "model")
#[derive(Debug, Clone)]
pub struct ModelTurn {
    pub role: &'static str,
    pub text: String,
}

impl ModelTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model",
            text: text.into(),
        }
    }
}

pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    persona: String,
}

impl Gemini {
    pub fn new(api_key: Option<String>, persona: String) -> Result<Self, Error> {
        // check common env var names for the api key
        let api_key = match api_key {
            Some(key) => key,
            None => std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .map_err(|_| Error::MissingApiKey)?,
        };

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            persona,
        })
    }

    /// send one user message on top of the committed history.
    /// the reply arrives as a stream of fragments.
    pub async fn send_message(
        &self,
        history: &[ModelTurn],
        text: &str,
    ) -> Result<ReplyStream, Error> {
        let mut contents: Vec<Value> = history
            .iter()
            .map(|turn| json!({ "role": turn.role, "parts": [{ "text": turn.text }] }))
            .collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": text }] }));

        let safety_settings: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": "BLOCK_MEDIUM_AND_ABOVE" }))
            .collect();

        let body = json!({
            "contents": contents,
            "systemInstruction": { "parts": [{ "text": self.persona }] },
            "generationConfig": {
                "temperature": 0.7,
                "topP": 0.95,
                "topK": 40,
                "maxOutputTokens": 800,
            },
            "safetySettings": safety_settings,
        });

        info!("gemini request with {} prior turns", history.len());

        let url = format!(
            "{BASE_URL}/models/{MODEL}:streamGenerateContent?alt=sse&key={}",
            self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(Error::Gemini(error));
        }

        Ok(ReplyStream::new(response))
    }
}

/// lazy, single-pass fragment stream over gemini's sse response
pub struct ReplyStream {
    response: reqwest::Response,
    buffer: String,
    pending: VecDeque<Fragment>,
    done: bool,
}

impl ReplyStream {
    fn new(response: reqwest::Response) -> Self {
        Self {
            response,
            buffer: String::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// next fragment, or None once the stream is exhausted
    pub async fn next(&mut self) -> Result<Option<Fragment>, Error> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                return Ok(Some(fragment));
            }
            if self.done {
                return Ok(None);
            }

            match self.response.chunk().await? {
                Some(bytes) => {
                    self.buffer.push_str(&String::from_utf8_lossy(&bytes));
                    self.drain_lines();
                }
                None => {
                    self.done = true;
                    // a last event without a trailing newline
                    if !self.buffer.trim().is_empty() {
                        let line = std::mem::take(&mut self.buffer);
                        self.parse_line(line.trim());
                    }
                }
            }
        }
    }

    fn drain_lines(&mut self) {
        while let Some(pos) = self.buffer.find('\n') {
            let line = self.buffer[..pos].trim().to_string();
            self.buffer.drain(..=pos);
            self.parse_line(&line);
        }
    }

    fn parse_line(&mut self, line: &str) {
        let Some(data) = line.strip_prefix("data: ") else {
            return;
        };
        let Ok(event) = serde_json::from_str::<Value>(data) else {
            return;
        };

        // prompt-level block: the model refused before generating anything
        if let Some(reason) = event["promptFeedback"]["blockReason"].as_str() {
            let message = event["promptFeedback"]["blockReasonMessage"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            self.pending.push_back(Fragment::SafetyBlock {
                reason: reason.to_string(),
                message,
            });
            return;
        }

        if let Some(parts) = event["candidates"][0]["content"]["parts"].as_array() {
            for part in parts {
                if let Some(text) = part["text"].as_str()
                    && !text.is_empty()
                {
                    self.pending.push_back(Fragment::Text(text.to_string()));
                }
            }
        }

        // a mid-stream safety stop arrives as a finish reason on the candidate
        if event["candidates"][0]["finishReason"].as_str() == Some("SAFETY") {
            self.pending.push_back(Fragment::SafetyBlock {
                reason: "SAFETY".to_string(),
                message: String::new(),
            });
        }
    }
}
