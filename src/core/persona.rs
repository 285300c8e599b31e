// persona loading - the system instruction that shapes aura's voice

use log::{info, warn};

pub const DEFAULT_PERSONA: &str = "Você é um chatbot de apoio emocional. Seja gentil, acolhedor e \
    prestativo. Avise que não é um terapeuta e que não pode dar conselhos médicos.";

/// read the persona file, falling back to the built-in instruction.
/// a missing or empty persona is never fatal, only logged.
pub fn load_persona(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => {
            info!("persona loaded from {path} ({} chars)", text.len());
            text
        }
        Ok(_) => {
            warn!("persona file {path} is empty, using built-in fallback");
            DEFAULT_PERSONA.to_string()
        }
        Err(e) => {
            warn!("could not read persona file {path} ({e}), using built-in fallback");
            DEFAULT_PERSONA.to_string()
        }
    }
}
