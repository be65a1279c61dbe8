//! Session-worthiness classifier.
//!
//! A message only warrants persistent storage when it looks like a technical
//! or educational question; greetings and small talk are answered without
//! ever touching the session store.

/// Topic keywords that mark a message as session-worthy.
///
/// Matching is case-insensitive substring containment. Note "c " keeps its
/// trailing space so the language name does not match every word containing
/// the letter.
const SESSION_KEYWORDS: &[&str] = &[
    "what is",
    "explain",
    "define",
    "difference",
    "example",
    "how to",
    "program",
    "code",
    "python",
    "java",
    "c ",
    "c++",
    "javascript",
    "html",
    "css",
    "sql",
    "database",
    "algorithm",
];

/// Returns true when `text` contains at least one topic keyword.
///
/// Pure and total: no side effects, no error conditions. Empty input is
/// never session-worthy.
pub fn is_session_worthy(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    SESSION_KEYWORDS.iter().any(|k| lowered.contains(k))
}
