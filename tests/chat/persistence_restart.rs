use std::fs;
use std::sync::Arc;

use chatkra::chat::{ApiKey, ChatSettings, ChatStore, Message, Role, SettingsPatch};
use chatkra::llm::{CompletionClient, CompletionFuture};
use chatkra::storage::{CONVERSATIONS_KEY, ChatPersistence, SETTINGS_KEY};
use tempfile::TempDir;

use crate::chat_harness::{file_backend, settings_for};

struct EchoClient;

impl CompletionClient for EchoClient {
    fn name(&self) -> &str {
        "echo"
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        _settings: &'a ChatSettings,
    ) -> CompletionFuture<'a> {
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        Box::pin(async move { Some(Message::assistant(format!("echo: {last}"))) })
    }
}

fn open(dir: &TempDir) -> ChatStore {
    ChatStore::load(
        ChatPersistence::new(file_backend(dir.path())),
        Arc::new(EchoClient),
        settings_for("https://api.example.com/v1/chat/completions"),
    )
}

#[tokio::test]
async fn conversations_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let (first_id, second_id) = {
        let mut store = open(&dir);
        let first = store.active_id().unwrap().to_string();
        store.send_message("keep this").await;
        let second = store.create_conversation();
        store.send_message("and this").await;
        (first, second)
    };

    let store = open(&dir);

    assert_eq!(store.len(), 2);
    assert_eq!(store.active_id(), Some(second_id.as_str()));
    let first = store.get(&first_id).unwrap();
    assert_eq!(first.title, "keep this");
    assert_eq!(first.messages[1].content, "echo: keep this");
    assert_eq!(first.messages[1].role, Role::Assistant);
    assert!(dir.path().join(format!("{CONVERSATIONS_KEY}.json")).exists());
}

#[test]
fn settings_survive_a_restart_and_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store
            .update_settings(SettingsPatch {
                model: Some("persisted-model".into()),
                api_key: Some("sk-persisted".into()),
                temperature: Some(0.1),
                ..SettingsPatch::default()
            })
            .unwrap();
    }

    let mut store = open(&dir);
    assert_eq!(store.settings().model, "persisted-model");
    assert_eq!(store.settings().api_key, ApiKey::new("sk-persisted"));

    store.reset_settings();
    drop(store);

    let store = open(&dir);
    assert_eq!(store.settings().model, "harness-model");
}

#[test]
fn corrupted_files_fall_back_to_a_fresh_state() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(format!("{CONVERSATIONS_KEY}.json")), "{oops").unwrap();
    fs::write(dir.path().join(format!("{SETTINGS_KEY}.json")), "null").unwrap();

    let store = open(&dir);

    assert_eq!(store.len(), 1);
    assert_eq!(store.active_conversation().unwrap().title, "Conversation 1");
    assert_eq!(store.settings().model, "harness-model");
}

#[test]
fn clearing_rewrites_the_stored_mapping() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store.create_conversation();
        store.create_conversation();
        store.clear_all();
    }

    let store = open(&dir);
    assert_eq!(store.len(), 1);
}

#[test]
fn after_reset_a_restart_follows_changed_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store
            .update_settings(SettingsPatch {
                api_key: Some("sk-persisted".into()),
                ..SettingsPatch::default()
            })
            .unwrap();
        store.reset_settings();
    }
    assert!(!dir.path().join(format!("{SETTINGS_KEY}.json")).exists());

    let mut rotated = settings_for("https://llm.example.com/v1/chat/completions");
    rotated.api_key = ApiKey::new("sk-rotated");
    let store = ChatStore::load(
        ChatPersistence::new(file_backend(dir.path())),
        Arc::new(EchoClient),
        rotated.clone(),
    );

    assert_eq!(store.settings(), &rotated);
}
