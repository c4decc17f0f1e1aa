use super::Config;
use crate::chat::ApiKey;

impl Config {
    /// Apply `CHATKRA_*` environment variables. Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("CHATKRA_API_KEY")
            && !key.is_empty()
        {
            self.defaults.api_key = ApiKey::new(key);
        }

        if let Ok(endpoint) = std::env::var("CHATKRA_ENDPOINT")
            && !endpoint.is_empty()
        {
            self.defaults.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("CHATKRA_MODEL")
            && !model.is_empty()
        {
            self.defaults.model = model;
        }

        if let Ok(data_dir) = std::env::var("CHATKRA_DATA_DIR")
            && !data_dir.is_empty()
        {
            self.data_dir = data_dir;
        }

        if let Ok(level) = std::env::var("CHATKRA_LOG_LEVEL")
            && !level.is_empty()
        {
            self.log_level = level;
        }
    }
}
