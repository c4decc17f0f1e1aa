// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Client implementations ──────────────────────────────────────────────────
pub mod compatible;

// ── Re-exports ──────────────────────────────────────────────────────────────
pub use compatible::HttpCompletionClient;
pub use http_client::{
    DEFAULT_REQUEST_TIMEOUT_SECS, build_completion_client, build_completion_client_with_timeout,
};
pub use scrub::{sanitize_for_log, scrub_known_secret, scrub_secret_patterns};
pub use traits::{CompletionClient, CompletionFuture};
pub use types::{ChatRequest, ChatResponse, parse_error_message};
