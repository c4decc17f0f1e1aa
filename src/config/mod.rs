mod env_overrides;
mod loader;
pub mod schema;

#[cfg(test)]
mod test_env;

pub use schema::{
    Config, DEFAULT_DATA_DIR, DEFAULT_ENDPOINT, DEFAULT_LOG_LEVEL, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DefaultSettings, LOG_LEVELS,
};
