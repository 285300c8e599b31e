// tests for conversation state handling

use aura::{
    APOLOGY, Accumulator, BLOCK_SUFFIX, BLOCKED_FALLBACK, Chat, EMPTY_FALLBACK, Error, Fragment,
    GREETING, RESET_GREETING, Role, SAFETY_REPLY,
};

#[test]
fn test_new_chat_starts_with_greeting() {
    let chat = Chat::new();
    assert_eq!(chat.transcript.len(), 1);
    assert_eq!(chat.transcript[0].role, Role::Assistant);
    assert_eq!(chat.transcript[0].content, GREETING);
    assert!(!chat.has_session());
}

#[test]
fn test_risk_message_short_circuits() {
    let mut chat = Chat::new();
    assert!(chat.try_safety_reply("quero morrer"));

    // greeting + user turn + fixed safety reply, and no model session
    assert_eq!(chat.transcript.len(), 3);
    assert_eq!(chat.transcript[1].role, Role::User);
    assert_eq!(chat.transcript[2].content, SAFETY_REPLY);
    assert!(!chat.has_session());
}

#[test]
fn test_clean_message_is_not_short_circuited() {
    let mut chat = Chat::new();
    assert!(!chat.try_safety_reply("estou triste hoje"));
    assert_eq!(chat.transcript.len(), 1);
}

#[test]
fn test_replay_excludes_in_flight_turn() {
    let mut chat = Chat::new();
    chat.push_user("oi");

    let history = chat.replay_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, "model");
    assert_eq!(history[0].text, GREETING);
}

#[test]
fn test_session_seeded_from_replay() {
    let mut chat = Chat::new();
    chat.push_user("oi");

    let session = chat.ensure_session();
    assert_eq!(session.contents().len(), 1);
    assert_eq!(session.contents()[0].role, "model");
}

#[test]
fn test_commit_keeps_session_in_step_with_transcript() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();
    chat.commit_reply("oi", "Olá! Que bom falar com você.".to_string());

    assert_eq!(chat.transcript.len(), 3);
    // session context: greeting + user turn + reply
    assert_eq!(chat.ensure_session().contents().len(), 3);
    assert_eq!(chat.transcript[2].content, "Olá! Que bom falar com você.");
}

#[test]
fn test_session_reused_across_turns() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();
    chat.commit_reply("oi", "olá".to_string());

    chat.push_user("tudo bem?");
    assert!(chat.has_session());
    // existing session is reused, not rebuilt from the transcript
    let session = chat.ensure_session();
    assert_eq!(session.contents().len(), 3);
}

#[test]
fn test_failed_turn_appends_apology_and_drops_session() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();
    chat.fail_turn(&Error::Gemini("connection reset".to_string()));

    let last = chat.transcript.last().expect("transcript never empty");
    assert_eq!(last.content, APOLOGY);
    assert!(!chat.has_session());
    // fallback turns are not offered for rating
    assert!(!chat.can_rate());
}

#[test]
fn test_reset_returns_to_single_greeting() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();
    chat.commit_reply("oi", "olá".to_string());

    chat.reset();
    assert_eq!(chat.transcript.len(), 1);
    assert_eq!(chat.transcript[0].content, RESET_GREETING);
    assert!(!chat.has_session());
}

// streaming outcome classification

#[test]
fn test_stream_normal_text() {
    let mut acc = Accumulator::new();
    assert!(acc.push(Fragment::Text("Olá".to_string())));
    assert!(acc.push(Fragment::Text(" tudo".to_string())));
    assert!(!acc.is_blocked());
    assert_eq!(acc.finish(), "Olá tudo");
}

#[test]
fn test_stream_blocked_with_partial_text() {
    let mut acc = Accumulator::new();
    acc.push(Fragment::Text("Olá".to_string()));
    acc.push(Fragment::Text(" tudo".to_string()));
    acc.push(Fragment::SafetyBlock {
        reason: "SAFETY".to_string(),
        message: String::new(),
    });
    assert_eq!(acc.finish(), format!("Olá tudo{BLOCK_SUFFIX}"));
}

#[test]
fn test_stream_blocked_with_no_text() {
    let mut acc = Accumulator::new();
    acc.push(Fragment::SafetyBlock {
        reason: "OTHER".to_string(),
        message: "policy".to_string(),
    });
    assert_eq!(acc.finish(), BLOCKED_FALLBACK);
}

#[test]
fn test_stream_empty_reply() {
    let acc = Accumulator::new();
    assert_eq!(acc.finish(), EMPTY_FALLBACK);
}

#[test]
fn test_block_signal_stops_consumption() {
    let mut acc = Accumulator::new();
    assert!(!acc.push(Fragment::SafetyBlock {
        reason: "SAFETY".to_string(),
        message: String::new(),
    }));
    assert!(acc.is_blocked());
}

#[test]
fn test_whitespace_only_reply_counts_as_empty() {
    let mut acc = Accumulator::new();
    acc.push(Fragment::Text("  \n ".to_string()));
    assert_eq!(acc.finish(), EMPTY_FALLBACK);
}

// feedback

#[test]
fn test_feedback_recorded_once_per_turn() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();
    chat.commit_reply("oi", "olá".to_string());

    assert!(chat.can_rate());
    assert!(chat.mark_positive());
    // second rating of the same turn is rejected
    assert!(!chat.mark_positive());
    assert!(!chat.mark_negative());
}

#[test]
fn test_feedback_reopens_on_new_reply() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();
    chat.commit_reply("oi", "olá".to_string());
    assert!(chat.mark_negative());

    chat.push_user("entendi");
    chat.commit_reply("entendi", "que bom".to_string());
    assert!(chat.can_rate());
}

#[test]
fn test_feedback_not_offered_for_greeting() {
    let chat = Chat::new();
    assert!(!chat.can_rate());
}

#[test]
fn test_feedback_not_offered_for_safety_reply() {
    let mut chat = Chat::new();
    chat.try_safety_reply("quero morrer");
    assert!(!chat.can_rate());
}

#[test]
fn test_feedback_not_offered_for_blocked_reply() {
    let mut chat = Chat::new();
    chat.push_user("oi");
    chat.ensure_session();

    let mut acc = Accumulator::new();
    acc.push(Fragment::Text("parcial".to_string()));
    acc.push(Fragment::SafetyBlock {
        reason: "SAFETY".to_string(),
        message: String::new(),
    });
    chat.commit_reply("oi", acc.finish());

    assert!(!chat.can_rate());
}
