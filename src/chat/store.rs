//! Conversation store: owns every conversation, the active pointer, the
//! process-wide settings, and drives the send → complete → append cycle.
//!
//! All mutations go through `&mut self` and are persisted synchronously.
//! Persistence failures are logged and never surface to callers.

use super::notice::{Notice, SEND_FAILED_NOTICE};
use super::types::{ChatSettings, Conversation, Message, Role, SettingsPatch, generate_id};
use crate::error::{ChatError, ConfigError};
use crate::llm::{CompletionClient, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::storage::{ChatPersistence, ConversationMap};
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of [`ChatStore::send_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input; nothing was appended and no request was made.
    Skipped,
    /// The assistant replied and the reply was appended.
    Reply(Message),
    /// The endpoint returned no choices; only the user message was appended.
    Empty,
    /// An `error`-role message was appended.
    Error(Message),
}

impl SendOutcome {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Reply(message) | Self::Error(message) => Some(message),
            Self::Skipped | Self::Empty => None,
        }
    }
}

/// Clears the shared loading flag when dropped.
struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl LoadingGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, AtomicOrdering::SeqCst);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, AtomicOrdering::SeqCst);
    }
}

pub struct ChatStore {
    conversations: ConversationMap,
    active_id: Option<String>,
    settings: ChatSettings,
    defaults: ChatSettings,
    persistence: ChatPersistence,
    client: Arc<dyn CompletionClient>,
    loading: Arc<AtomicBool>,
    notices: Vec<Notice>,
    request_timeout: Duration,
}

impl ChatStore {
    /// Read persisted state once and settle on an active conversation.
    ///
    /// An empty store gets a fresh conversation; otherwise the most recently
    /// updated conversation becomes active.
    pub fn load(
        persistence: ChatPersistence,
        client: Arc<dyn CompletionClient>,
        defaults: ChatSettings,
    ) -> Self {
        let conversations = persistence.load_conversations();
        let settings = persistence.load_settings(&defaults);
        let mut store = Self {
            conversations,
            active_id: None,
            settings,
            defaults,
            persistence,
            client,
            loading: Arc::new(AtomicBool::new(false)),
            notices: Vec::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        match store.most_recent_id() {
            Some(id) => store.active_id = Some(id),
            None => {
                store.create_conversation();
            }
        }
        info!(
            backend = store.persistence.backend(),
            conversations = store.conversations.len(),
            client = store.client.name(),
            "chat store ready"
        );
        store
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    // ── Conversations ───────────────────────────────────────────

    pub fn create_conversation(&mut self) -> String {
        let id = generate_id();
        let title = format!("Conversation {}", self.conversations.len() + 1);
        debug!(%id, %title, "creating conversation");
        self.conversations
            .insert(id.clone(), Conversation::new(id.clone(), title));
        self.active_id = Some(id.clone());
        self.persist_conversations();
        id
    }

    /// Point the store at `id`. Unknown ids leave the selection unchanged.
    pub fn select_conversation(&mut self, id: &str) -> bool {
        if !self.conversations.contains_key(id) {
            debug!(%id, "ignoring selection of unknown conversation");
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    pub fn delete_conversation(&mut self, id: &str) -> bool {
        if self.conversations.remove(id).is_none() {
            return false;
        }
        debug!(%id, "deleted conversation");

        let active_removed = self.active_id.as_deref() == Some(id);
        if self.conversations.is_empty() {
            // create_conversation persists the replacement
            self.create_conversation();
            return true;
        }
        if active_removed {
            self.active_id = self.most_recent_id();
        }
        self.persist_conversations();
        true
    }

    pub fn clear_all(&mut self) {
        let removed = self.conversations.len();
        self.conversations.clear();
        self.active_id = None;
        self.create_conversation();
        info!(removed, "cleared all conversations");
    }

    pub fn rename_conversation(&mut self, id: &str, title: impl Into<String>) -> bool {
        let Some(conversation) = self.conversations.get_mut(id) else {
            return false;
        };
        conversation.rename(title);
        self.persist_conversations();
        true
    }

    /// Append a message to the active conversation, creating one if needed.
    pub fn add_message(&mut self, content: impl Into<String>, role: Role) -> Message {
        let message = Message::new(role, content);
        let id = self.ensure_active();
        self.append_to(&id, message.clone());
        message
    }

    // ── Sending ─────────────────────────────────────────────────

    /// Send `content` as a user message and append the completion reply.
    ///
    /// Never fails: every failure becomes an `error`-role message plus a
    /// notice. The loading flag is cleared on every exit path.
    pub async fn send_message(&mut self, content: &str) -> SendOutcome {
        if content.trim().is_empty() {
            return SendOutcome::Skipped;
        }

        let conversation_id = self.ensure_active();
        self.append_to(&conversation_id, Message::user(content));
        let _loading = LoadingGuard::engage(&self.loading);

        let history = match self.conversations.get(&conversation_id) {
            Some(conversation) => conversation.messages.clone(),
            None => return self.fail(&conversation_id, "no active conversation"),
        };
        let settings = self.settings.clone();
        let client = Arc::clone(&self.client);

        debug!(
            conversation = %conversation_id,
            messages = history.len(),
            "requesting completion"
        );
        let reply = tokio::time::timeout(self.request_timeout, client.complete(&history, &settings))
            .await;

        match reply {
            Ok(Some(reply)) if reply.is_error() => {
                self.notices.push(Notice::error(reply.content.clone()));
                self.append_to(&conversation_id, reply.clone());
                SendOutcome::Error(reply)
            }
            Ok(Some(reply)) => {
                self.append_to(&conversation_id, reply.clone());
                SendOutcome::Reply(reply)
            }
            Ok(None) => {
                debug!(conversation = %conversation_id, "completion produced no reply");
                SendOutcome::Empty
            }
            Err(elapsed) => {
                warn!(
                    timeout_secs = self.request_timeout.as_secs(),
                    "completion request timed out"
                );
                self.fail(&conversation_id, &elapsed.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(AtomicOrdering::SeqCst)
    }

    /// Shared handle for observing the loading flag from another task.
    pub fn loading_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loading)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── Settings ────────────────────────────────────────────────

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn default_settings(&self) -> &ChatSettings {
        &self.defaults
    }

    /// Shallow-merge `patch` into the current settings and persist.
    ///
    /// The merged value is validated first; an invalid patch leaves the
    /// current settings untouched.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<(), ChatError> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut merged = self.settings.clone();
        merged.merge(patch);
        merged
            .validate()
            .map_err(|reason| ChatError::Config(ConfigError::Validation(reason)))?;

        self.settings = merged;
        self.persist_settings();
        self.notices.push(Notice::info(
            "Settings saved",
            "Your new settings have been applied.",
        ));
        Ok(())
    }

    /// Restore the configured defaults.
    ///
    /// The stored record is removed rather than overwritten, so later runs
    /// follow the configuration (and its environment overrides) again.
    pub fn reset_settings(&mut self) {
        self.settings = self.defaults.clone();
        if let Err(error) = self.persistence.clear_settings() {
            warn!("failed to clear stored settings: {error}");
        }
        self.notices.push(Notice::info(
            "Settings reset",
            "Default settings have been restored.",
        ));
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_id
            .as_deref()
            .and_then(|id| self.conversations.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// All conversations, most recently updated first.
    pub fn conversations(&self) -> Vec<&Conversation> {
        let mut list: Vec<&Conversation> = self.conversations.values().collect();
        list.sort_by(|a, b| display_order(a, b));
        list
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    // ── Internals ───────────────────────────────────────────────

    fn ensure_active(&mut self) -> String {
        match self.active_id.clone() {
            Some(id) if self.conversations.contains_key(&id) => id,
            _ => self.create_conversation(),
        }
    }

    fn append_to(&mut self, conversation_id: &str, message: Message) {
        let Some(conversation) = self.conversations.get_mut(conversation_id) else {
            warn!(conversation = %conversation_id, "dropping message for missing conversation");
            return;
        };
        conversation.push(message);
        self.persist_conversations();
    }

    fn fail(&mut self, conversation_id: &str, description: &str) -> SendOutcome {
        let message = Message::error(format!("Error: {description}"));
        self.notices.push(Notice::error(SEND_FAILED_NOTICE));
        let target = if self.conversations.contains_key(conversation_id) {
            conversation_id.to_string()
        } else {
            self.ensure_active()
        };
        self.append_to(&target, message.clone());
        SendOutcome::Error(message)
    }

    fn most_recent_id(&self) -> Option<String> {
        self.conversations
            .values()
            .min_by(|a, b| display_order(a, b))
            .map(|conversation| conversation.id.clone())
    }

    fn persist_conversations(&self) {
        if let Err(error) = self.persistence.save_conversations(&self.conversations) {
            warn!("failed to persist conversations: {error}");
        }
    }

    fn persist_settings(&self) {
        if let Err(error) = self.persistence.save_settings(&self.settings) {
            warn!("failed to persist settings: {error}");
        }
    }
}

/// `updatedAt` descending, then `createdAt` descending, then id ascending.
fn display_order(a: &Conversation, b: &Conversation) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
