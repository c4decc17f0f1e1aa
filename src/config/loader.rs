use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;
use tracing::info;

const APP_DIR: &str = ".chatkra";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Load `~/.chatkra/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(APP_DIR))
    }

    /// Same as [`Config::load_or_init`] rooted at `app_dir`.
    pub fn load_or_init_in(app_dir: &Path) -> Result<Self> {
        let config_path = app_dir.join(CONFIG_FILE);

        if !app_dir.exists() {
            fs::create_dir_all(app_dir).context("Failed to create .chatkra directory")?;
        }

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save()?;
            info!(path = %config.config_path.display(), "wrote default config");
            Ok(config)
        }
    }

    /// Load an explicit config file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
