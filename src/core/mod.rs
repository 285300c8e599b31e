// core logic - risk scanning, gemini client, and conversation state

mod chat;
mod gemini;
mod persona;
mod risk;

pub use chat::{
    APOLOGY, Accumulator, BLOCK_SUFFIX, BLOCKED_FALLBACK, Chat, EMPTY_FALLBACK, GREETING,
    ModelSession, RESET_GREETING, Role, SAFETY_REPLY, Turn,
};
pub use gemini::{Fragment, Gemini, ModelTurn, ReplyStream};
pub use persona::{DEFAULT_PERSONA, load_persona};
pub use risk::Risk;
