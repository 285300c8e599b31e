// aura library - emotional support chatbot

pub mod cli;
mod core;
mod error;
mod server;
pub mod tui;

pub use crate::core::{
    APOLOGY, Accumulator, BLOCK_SUFFIX, BLOCKED_FALLBACK, Chat, EMPTY_FALLBACK, Fragment, GREETING,
    Gemini, ModelSession, ModelTurn, RESET_GREETING, Risk, Role, SAFETY_REPLY, Turn,
};
pub use error::Error;
pub use server::Server;
