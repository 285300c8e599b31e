// tests for risk phrase detection

use aura::Risk;

#[test]
fn test_plain_message_is_clean() {
    assert!(!Risk::scan("estou triste hoje"));
}

#[test]
fn test_exact_phrase_matches() {
    assert!(Risk::scan("quero morrer"));
}

#[test]
fn test_phrase_inside_sentence() {
    assert!(Risk::scan("às vezes eu quero morrer, sabe"));
}

#[test]
fn test_phrase_followed_by_punctuation() {
    assert!(Risk::scan("quero sumir."));
}

#[test]
fn test_uppercase_matches() {
    assert!(Risk::scan("QUERO MORRER"));
}

#[test]
fn test_mixed_case_matches() {
    assert!(Risk::scan("Quero Morrer"));
}

#[test]
fn test_substring_of_longer_word_does_not_match() {
    // "suicidio" embedded in a longer word is not a whole-word match
    assert!(!Risk::scan("o suicidiologista estudou o tema"));
}

#[test]
fn test_accented_entry_matches() {
    assert!(Risk::scan("penso em suicídio"));
}

#[test]
fn test_unaccented_entry_matches() {
    // both spellings are separate entries in the list
    assert!(Risk::scan("penso em suicidio"));
}

#[test]
fn test_accent_matching_is_exact() {
    // "não aguento mais viver" is listed with the accent; the unaccented
    // spelling is not an entry and is not normalized into one
    assert!(Risk::scan("não aguento mais viver"));
    assert!(!Risk::scan("nao aguento mais viver"));
}

#[test]
fn test_multiword_phrase_in_context() {
    assert!(Risk::scan("sinto que vou desistir de tudo agora"));
}

#[test]
fn test_unrelated_words_do_not_match() {
    assert!(!Risk::scan("a vida anda corrida mas estou bem"));
}
