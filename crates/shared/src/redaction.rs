//! Secret detection and redaction utilities.
//!
//! Provides consistent logic for detecting sensitive keys/variables and
//! redacting their values in error metadata and emitted log events.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Name segments that mark a key as secret.
const SECRET_SEGMENTS: [&str; 9] = [
    "key",
    "apikey",
    "token",
    "secret",
    "password",
    "passwd",
    "credential",
    "auth",
    "authorization",
];

/// Checks if a key/variable name likely refers to a secret.
///
/// The name is split into segments on non-alphanumeric characters and
/// camelCase boundaries; a key is secret when any segment, ignoring case and
/// a plural `s`, names a secret. `author` and `monkey` are not secrets.
///
/// # Examples
///
/// ```
/// use sqllog_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("dbAuth"));
/// assert!(!is_secret_key("query"));
/// assert!(!is_secret_key("author"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    key_segments(key).iter().any(|segment| {
        let singular = segment.strip_suffix('s').unwrap_or(segment.as_str());
        SECRET_SEGMENTS.contains(&segment.as_str()) || SECRET_SEGMENTS.contains(&singular)
    })
}

/// Lowercased segments of `key`: `"dbAPIKey_v2"` becomes `db`, `api`, `key`, `v2`.
fn key_segments(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;
    let mut chars = key.chars().peekable();

    while let Some(ch) = chars.next() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let after_lower = previous.is_some_and(|prev| !prev.is_uppercase());
            let acronym_end = previous.is_some_and(char::is_uppercase)
                && chars.peek().is_some_and(|next| next.is_lowercase());
            if after_lower || acronym_end {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.extend(ch.to_lowercase());
        previous = Some(ch);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Redacts a value if the key is likely a secret.
///
/// Returns `"[REDACTED]"` for secret keys, or the original value otherwise.
///
/// # Examples
///
/// ```
/// use sqllog_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("DB_PASSWORD", "hunter2"), "[REDACTED]");
/// assert_eq!(redact_if_secret("SQLLOG_LEVEL", "debug"), "debug");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}
