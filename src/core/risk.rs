// self-harm risk detection
// runs before every model call, a single match short-circuits the turn

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

// literal phrases matched as whole words, case-insensitive.
// accents are matched exactly: "suicidio" and "suicídio" are separate entries,
// a differently-accented misspelling is not expected to match.
const RISK_PHRASES: &[&str] = &[
    "me matar",
    "me mate",
    "suicidio",
    "suicídio",
    "não aguento mais viver",
    "quero morrer",
    "queria morrer",
    "quero sumir",
    "desistir de tudo",
    "acabar com tudo",
    "fazer mal a mim",
    "me cortar",
    "me machucar",
    "automutilação",
    "quero me jogar",
    "tirar minha vida",
    "sem esperança",
    "fim da linha",
];

static RISK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RISK_PHRASES
        .iter()
        .map(|phrase| {
            RegexBuilder::new(&format!(r"\b{}\b", regex::escape(phrase)))
                .case_insensitive(true)
                .build()
                .expect("risk phrase compiles")
        })
        .collect()
});

pub struct Risk;

impl Risk {
    /// true if the text contains any risk phrase as a whole word
    pub fn scan(text: &str) -> bool {
        RISK_PATTERNS.iter().any(|re| re.is_match(text))
    }
}
