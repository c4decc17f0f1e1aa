use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `chatkra`.
///
/// Each subsystem defines its own error enum. Library callers can match on
/// these to decide recovery strategy; internal I/O seams continue to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ChatError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Completion endpoint ──────────────────────────────────────────────
    #[error("completion: {0}")]
    Completion(#[from] CompletionError),

    // ── Persistence ──────────────────────────────────────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Completion errors ───────────────────────────────────────────────────────

/// Fallback shown when the endpoint fails without a usable description.
pub const GENERIC_API_ERROR: &str = "An error occurred while contacting the API";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", .message.as_deref().unwrap_or(GENERIC_API_ERROR))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("malformed completion response: {0}")]
    Decode(String),
}

impl CompletionError {
    /// Text placed into the `error`-role message shown to the user.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

// ─── Storage errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("key {key}: {message}")]
    Backend { key: String, message: String },

    #[error("key {key}: malformed JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("key {key}: failed to encode: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("key {key}: schema violation: {reason}")]
    Schema { key: String, reason: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ChatError>;
