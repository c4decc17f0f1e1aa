#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use chatkra::chat::{ApiKey, ChatSettings, ChatStore};
use chatkra::llm::HttpCompletionClient;
use chatkra::storage::{ChatPersistence, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

pub fn settings_for(endpoint: &str) -> ChatSettings {
    ChatSettings {
        endpoint: endpoint.to_string(),
        api_key: ApiKey::new("sk-test-harness"),
        model: "harness-model".into(),
        temperature: 0.3,
        max_tokens: 256,
        system_prompt: "You are a test harness.".into(),
    }
}

pub fn memory_backend() -> Arc<MemoryKeyValueStore> {
    Arc::new(MemoryKeyValueStore::new())
}

pub fn file_backend(dir: &Path) -> Arc<FileKeyValueStore> {
    Arc::new(FileKeyValueStore::new(dir).unwrap())
}

/// Store wired to the real HTTP client against `endpoint`.
pub fn http_store(backend: Arc<dyn KeyValueStore>, endpoint: &str) -> ChatStore {
    ChatStore::load(
        ChatPersistence::new(backend),
        Arc::new(HttpCompletionClient::new()),
        settings_for(endpoint),
    )
}
