//! Typed persistence of conversations and settings over a [`KeyValueStore`].
//!
//! Stored values are decoded against explicit schemas. Anything that fails to
//! decode is reported as a [`StorageError`]; the `load_*` helpers swallow those
//! errors and degrade to empty/default state.

use super::traits::KeyValueStore;
use crate::chat::{ChatSettings, Conversation};
use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const CONVERSATIONS_KEY: &str = "chat-kra-conversations";
pub const SETTINGS_KEY: &str = "chat-kra-settings";

pub type ConversationMap = HashMap<String, Conversation>;

#[derive(Clone)]
pub struct ChatPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl ChatPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &str {
        self.store.name()
    }

    // ── Conversations ───────────────────────────────────────────

    pub fn read_conversations(&self) -> Result<Option<ConversationMap>, StorageError> {
        let Some(raw) = self.read_raw(CONVERSATIONS_KEY)? else {
            return Ok(None);
        };
        decode_conversations(&raw).map(Some)
    }

    /// Stored conversations, or an empty map when absent or malformed.
    pub fn load_conversations(&self) -> ConversationMap {
        match self.read_conversations() {
            Ok(Some(map)) => {
                debug!(count = map.len(), "loaded conversations");
                map
            }
            Ok(None) => ConversationMap::new(),
            Err(error) => {
                warn!("ignoring stored conversations: {error}");
                ConversationMap::new()
            }
        }
    }

    pub fn save_conversations(&self, conversations: &ConversationMap) -> Result<(), StorageError> {
        let json = serde_json::to_string(conversations).map_err(|source| StorageError::Encode {
            key: CONVERSATIONS_KEY.to_string(),
            source,
        })?;
        self.write_raw(CONVERSATIONS_KEY, &json)
    }

    // ── Settings ────────────────────────────────────────────────

    pub fn read_settings(&self) -> Result<Option<ChatSettings>, StorageError> {
        let Some(raw) = self.read_raw(SETTINGS_KEY)? else {
            return Ok(None);
        };
        decode_settings(&raw).map(Some)
    }

    /// Stored settings, or `defaults` when absent, malformed, or out of range.
    ///
    /// A stored record wins over `defaults` as a whole, including values the
    /// defaults took from `CHATKRA_*` environment variables.
    pub fn load_settings(&self, defaults: &ChatSettings) -> ChatSettings {
        match self.read_settings() {
            Ok(Some(settings)) => {
                if settings.api_key != defaults.api_key
                    || settings.endpoint != defaults.endpoint
                {
                    debug!(
                        key = SETTINGS_KEY,
                        "stored settings take precedence over configured defaults"
                    );
                }
                settings
            }
            Ok(None) => {
                debug!("no stored settings, using defaults");
                defaults.clone()
            }
            Err(error) => {
                warn!("ignoring stored settings: {error}");
                defaults.clone()
            }
        }
    }

    pub fn save_settings(&self, settings: &ChatSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings).map_err(|source| StorageError::Encode {
            key: SETTINGS_KEY.to_string(),
            source,
        })?;
        self.write_raw(SETTINGS_KEY, &json)
    }

    /// Drop the stored settings so the next load falls back to the defaults.
    pub fn clear_settings(&self) -> Result<(), StorageError> {
        self.store
            .remove(SETTINGS_KEY)
            .map_err(|error| StorageError::Backend {
                key: SETTINGS_KEY.to_string(),
                message: format!("{error:#}"),
            })
    }

    // ── Raw access ──────────────────────────────────────────────

    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get(key).map_err(|error| StorageError::Backend {
            key: key.to_string(),
            message: format!("{error:#}"),
        })
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store
            .set(key, value)
            .map_err(|error| StorageError::Backend {
                key: key.to_string(),
                message: format!("{error:#}"),
            })
    }
}

/// Decode the conversation mapping. Every entry's `id` must equal its key.
pub fn decode_conversations(raw: &str) -> Result<ConversationMap, StorageError> {
    let map: ConversationMap =
        serde_json::from_str(raw).map_err(|source| StorageError::Decode {
            key: CONVERSATIONS_KEY.to_string(),
            source,
        })?;

    if let Some((key, convo)) = map.iter().find(|(key, convo)| **key != convo.id) {
        return Err(StorageError::Schema {
            key: CONVERSATIONS_KEY.to_string(),
            reason: format!("entry {key} carries id {}", convo.id),
        });
    }

    Ok(map)
}

/// Decode persisted settings and check value ranges.
pub fn decode_settings(raw: &str) -> Result<ChatSettings, StorageError> {
    let settings: ChatSettings =
        serde_json::from_str(raw).map_err(|source| StorageError::Decode {
            key: SETTINGS_KEY.to_string(),
            source,
        })?;

    settings.validate().map_err(|reason| StorageError::Schema {
        key: SETTINGS_KEY.to_string(),
        reason,
    })?;

    Ok(settings)
}
