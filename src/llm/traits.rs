use crate::chat::{ChatSettings, Message};
use std::future::Future;
use std::pin::Pin;

pub type CompletionFuture<'a> = Pin<Box<dyn Future<Output = Option<Message>> + Send + 'a>>;

/// Turns a message history into a single reply.
///
/// Implementations never fail: transport and API failures come back as a
/// message with role `error`. `None` means the endpoint produced no choices.
pub trait CompletionClient: Send + Sync {
    /// Client identifier used in logs.
    fn name(&self) -> &str;

    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        settings: &'a ChatSettings,
    ) -> CompletionFuture<'a>;
}
