pub mod adapter;
pub mod file;
pub mod memory;
pub mod traits;

pub use adapter::{
    CONVERSATIONS_KEY, ChatPersistence, ConversationMap, SETTINGS_KEY, decode_conversations,
    decode_settings,
};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
