pub mod notice;
pub mod store;
pub mod types;

pub use notice::{Notice, NoticeLevel, SEND_FAILED_NOTICE};
pub use store::{ChatStore, SendOutcome};
pub use types::{
    ApiKey, ChatSettings, Conversation, Message, Role, SettingsPatch, TITLE_MAX_CHARS,
    derive_title, generate_id,
};
