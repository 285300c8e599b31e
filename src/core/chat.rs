// conversation state - transcript, model session, feedback
//
// the ui layers re-render from scratch on every interaction, so this module
// is the one place where the visible transcript and the model's context are
// kept consistent with each other.

use crate::Error;
use crate::core::gemini::{Fragment, Gemini, ModelTurn};
use crate::core::risk::Risk;
use log::{error, info, warn};

pub const GREETING: &str = "Olá! Sou Aura. Como você está se sentindo hoje?";
pub const RESET_GREETING: &str =
    "Olá! Sou Aura. Como você está se sentindo hoje? (Conversa reiniciada)";

/// fixed reply for risk-flagged messages, never model-generated
pub const SAFETY_REPLY: &str = "Sinto muito que você esteja passando por um momento tão difícil \
    e pensando nisso. É muito importante buscar ajuda profissional **imediatamente**. Por favor, \
    entre em contato com o **CVV (Centro de Valorização da Vida) ligando para o número 188**. \
    A ligação é gratuita e eles estão disponíveis 24 horas por dia para conversar com você de \
    forma sigilosa e segura. Você não está sozinho(a) e há pessoas prontas para te ouvir e \
    ajudar. Por favor, ligue para eles agora.";

pub const BLOCK_SUFFIX: &str = "\n\n(Conteúdo removido por diretrizes de segurança.)";

pub const BLOCKED_FALLBACK: &str = "Sinto muito, sua mensagem não pôde ser processada devido às \
    diretrizes de conteúdo. Tente reformular, por favor.";

pub const EMPTY_FALLBACK: &str = "Sinto muito, não consegui pensar em uma resposta clara para \
    isso no momento. Você poderia tentar reformular sua pergunta ou falar sobre outra coisa?";

pub const APOLOGY: &str =
    "Sinto muito, tive um problema técnico interno e não consegui responder. 😔";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// the context already committed to the hosted model.
/// invariant: matches the transcript minus any in-flight user turn.
#[derive(Debug, Default)]
pub struct ModelSession {
    contents: Vec<ModelTurn>,
}

impl ModelSession {
    fn new(contents: Vec<ModelTurn>) -> Self {
        Self { contents }
    }

    pub fn contents(&self) -> &[ModelTurn] {
        &self.contents
    }

    fn commit(&mut self, user_text: &str, reply: &str) {
        self.contents.push(ModelTurn::user(user_text));
        self.contents.push(ModelTurn::model(reply));
    }
}

/// folds stream fragments into the final reply text
#[derive(Debug, Default)]
pub struct Accumulator {
    text: String,
    blocked: bool,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// feed one fragment; returns false once consumption should stop
    pub fn push(&mut self, fragment: Fragment) -> bool {
        match fragment {
            Fragment::Text(text) => {
                self.text.push_str(&text);
                true
            }
            Fragment::SafetyBlock { reason, message } => {
                warn!("reply blocked mid-stream: {reason} {message}");
                self.blocked = true;
                false
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// classify the outcome into exactly one reply
    pub fn finish(self) -> String {
        let text = self.text.trim().to_string();
        match (self.blocked, text.is_empty()) {
            (true, true) => BLOCKED_FALLBACK.to_string(),
            (true, false) => format!("{text}{BLOCK_SUFFIX}"),
            (false, true) => EMPTY_FALLBACK.to_string(),
            (false, false) => text,
        }
    }
}

pub struct Chat {
    pub transcript: Vec<Turn>,
    session: Option<ModelSession>,
    feedback_given: bool,
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

impl Chat {
    pub fn new() -> Self {
        Self {
            transcript: vec![Turn::assistant(GREETING)],
            session: None,
            feedback_given: false,
        }
    }

    /// wipe everything back to a single fresh greeting
    pub fn reset(&mut self) {
        self.transcript = vec![Turn::assistant(RESET_GREETING)];
        self.session = None;
        self.feedback_given = false;
        info!("conversation reset by user");
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// risk phrases bypass the model entirely: append the user turn plus the
    /// fixed cvv reply and report the turn as handled
    pub fn try_safety_reply(&mut self, text: &str) -> bool {
        if !Risk::scan(text) {
            return false;
        }
        warn!("risk phrase detected in user message");
        self.transcript.push(Turn::user(text));
        self.push_assistant(SAFETY_REPLY.to_string());
        true
    }

    pub fn push_user(&mut self, text: &str) {
        self.transcript.push(Turn::user(text));
    }

    /// transcript minus the in-flight user turn, in the model's wire roles
    pub fn replay_history(&self) -> Vec<ModelTurn> {
        let end = self.transcript.len().saturating_sub(1);
        self.transcript[..end]
            .iter()
            .map(|turn| match turn.role {
                Role::User => ModelTurn::user(turn.content.clone()),
                Role::Assistant => ModelTurn::model(turn.content.clone()),
            })
            .collect()
    }

    /// make sure a model session exists. on first use it is seeded by
    /// replaying every committed turn; the in-flight user turn is excluded
    /// because it travels separately as the live request.
    pub fn ensure_session(&mut self) -> &ModelSession {
        if self.session.is_none() {
            let replay = self.replay_history();
            info!("starting model session with {} replayed turns", replay.len());
            self.session = Some(ModelSession::new(replay));
        }
        self.session.get_or_insert_with(ModelSession::default)
    }

    /// record a finished exchange: the reply becomes a turn and both sides
    /// are committed to the session context
    pub fn commit_reply(&mut self, user_text: &str, reply: String) {
        if let Some(session) = self.session.as_mut() {
            session.commit(user_text, &reply);
        }
        self.push_assistant(reply);
    }

    /// a failed exchange still ends with an assistant turn. the session is
    /// discarded so the next turn rebuilds context from the transcript.
    pub fn fail_turn(&mut self, err: &Error) {
        error!("model exchange failed: {err}");
        self.session = None;
        self.push_assistant(APOLOGY.to_string());
    }

    /// full pipeline for one user turn, used by the http server.
    /// never fails: every error degrades into a substitute assistant turn.
    pub async fn send(&mut self, gemini: &Gemini, text: &str) -> String {
        if self.try_safety_reply(text) {
            return SAFETY_REPLY.to_string();
        }

        self.push_user(text);
        let history = self.ensure_session().contents().to_vec();

        match exchange(gemini, &history, text).await {
            Ok(reply) => {
                self.commit_reply(text, reply.clone());
                reply
            }
            Err(e) => {
                self.fail_turn(&e);
                APOLOGY.to_string()
            }
        }
    }

    /// whether the latest turn can be rated: must be a real model reply,
    /// not the greeting, the safety resources, or a fallback
    pub fn can_rate(&self) -> bool {
        if self.feedback_given || self.transcript.len() < 2 {
            return false;
        }
        match self.transcript.last() {
            Some(turn) if turn.role == Role::Assistant => !is_canned(&turn.content),
            _ => false,
        }
    }

    pub fn mark_positive(&mut self) -> bool {
        if !self.can_rate() {
            return false;
        }
        info!("feedback: positive");
        self.feedback_given = true;
        true
    }

    pub fn mark_negative(&mut self) -> bool {
        if !self.can_rate() {
            return false;
        }
        info!("feedback: negative");
        self.feedback_given = true;
        true
    }

    fn push_assistant(&mut self, content: String) {
        self.transcript.push(Turn::assistant(content));
        self.feedback_given = false;
    }
}

fn is_canned(content: &str) -> bool {
    content == SAFETY_REPLY
        || content == BLOCKED_FALLBACK
        || content == EMPTY_FALLBACK
        || content == APOLOGY
        || content.ends_with(BLOCK_SUFFIX)
}

async fn exchange(gemini: &Gemini, history: &[ModelTurn], text: &str) -> Result<String, Error> {
    let mut stream = gemini.send_message(history, text).await?;
    let mut acc = Accumulator::new();
    while let Some(fragment) = stream.next().await? {
        if !acc.push(fragment) {
            break;
        }
    }
    Ok(acc.finish())
}
