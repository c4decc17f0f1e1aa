//! Redaction of credentials from text that is about to be logged.

use std::borrow::Cow;

const MAX_LOGGED_BODY_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

const PREFIX_PATTERNS: [&str; 8] = [
    "sk-", "cpk_", "sk_or_", "ghp_", "hf_", "gsk_", "AIza", "eyJ",
];

const MARKER_PATTERNS: [&str; 8] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "Bearer ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"apiKey\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Bare marker without a token value.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        let replace_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

/// Redact token-shaped secrets (`sk-...`, bearer headers, `api_key=...`).
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        scrub_after_marker(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        scrub_after_marker(&mut scrubbed, prefix, false);
    }
    Cow::Owned(scrubbed)
}

/// Redact a specific known secret, then the generic patterns.
pub fn scrub_known_secret<'a>(input: &'a str, secret: &str) -> Cow<'a, str> {
    if secret.trim().is_empty() || !input.contains(secret) {
        return scrub_secret_patterns(input);
    }
    let replaced = input.replace(secret, REDACTED);
    Cow::Owned(scrub_secret_patterns(&replaced).into_owned())
}

/// Scrub and truncate a response body for a log line.
pub fn sanitize_for_log(input: &str, secret: &str) -> String {
    let scrubbed = scrub_known_secret(input, secret);
    if scrubbed.chars().count() <= MAX_LOGGED_BODY_CHARS {
        return scrubbed.into_owned();
    }
    let head: String = scrubbed.chars().take(MAX_LOGGED_BODY_CHARS).collect();
    format!("{head}...")
}
