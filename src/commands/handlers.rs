use super::types::{Command, CommandResult};
use crate::chat::ChatStore;
use crate::ui::view;

pub fn handle_command(command: &Command, store: &mut ChatStore) -> CommandResult {
    match command {
        Command::New => handle_new(store),
        Command::List => CommandResult::ephemeral(view::conversation_list(store)),
        Command::Select { target } => handle_select(store, target.as_deref()),
        Command::Delete { target } => handle_delete(store, target.as_deref()),
        Command::Rename { title } => handle_rename(store, title.as_deref()),
        Command::Clear => handle_clear(store),
        Command::Settings => CommandResult::ephemeral(view::settings_summary(store.settings())),
        Command::Help => handle_help(),
        Command::Quit => CommandResult::exit("Bye."),
    }
}

/// Resolve a 1-based list index, an exact id, or a unique id prefix.
pub fn resolve_target(store: &ChatStore, target: &str) -> Result<String, String> {
    let target = target.trim();
    let listed = store.conversations();

    if let Ok(index) = target.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| listed.get(i))
            .map(|conversation| conversation.id.clone())
            .ok_or_else(|| format!("No conversation #{index} (have {}).", listed.len()));
    }
    if store.get(target).is_some() {
        return Ok(target.to_string());
    }

    let mut matches = listed.iter().filter(|c| c.id.starts_with(target));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only.id.clone()),
        (Some(_), Some(_)) => Err(format!("Id prefix '{target}' is ambiguous.")),
        (None, _) => Err(format!("No conversation matches '{target}'.")),
    }
}

fn handle_new(store: &mut ChatStore) -> CommandResult {
    let id = store.create_conversation();
    let title = store.get(&id).map(|c| c.title.clone()).unwrap_or_default();
    CommandResult::visible(format!("Started {title}."))
}

fn handle_select(store: &mut ChatStore, target: Option<&str>) -> CommandResult {
    let Some(target) = target else {
        return CommandResult::ephemeral("Usage: /select <number|id>");
    };
    match resolve_target(store, target) {
        Ok(id) => {
            store.select_conversation(&id);
            match store.active_conversation() {
                Some(conversation) => CommandResult::visible(view::transcript(conversation)),
                None => CommandResult::ephemeral("Selection failed."),
            }
        }
        Err(reason) => CommandResult::ephemeral(reason),
    }
}

fn handle_delete(store: &mut ChatStore, target: Option<&str>) -> CommandResult {
    let resolved = match target {
        Some(target) => resolve_target(store, target),
        None => store
            .active_id()
            .map(str::to_string)
            .ok_or_else(|| "No active conversation.".to_string()),
    };
    let id = match resolved {
        Ok(id) => id,
        Err(reason) => return CommandResult::ephemeral(reason),
    };
    let title = store.get(&id).map(|c| c.title.clone()).unwrap_or_default();
    store.delete_conversation(&id);
    CommandResult::visible(format!("Deleted \"{title}\"."))
}

fn handle_rename(store: &mut ChatStore, title: Option<&str>) -> CommandResult {
    let Some(title) = title else {
        return CommandResult::ephemeral("Usage: /rename <title>");
    };
    let Some(id) = store.active_id().map(str::to_string) else {
        return CommandResult::ephemeral("No active conversation.");
    };
    store.rename_conversation(&id, title);
    CommandResult::visible(format!("Renamed to \"{title}\"."))
}

fn handle_clear(store: &mut ChatStore) -> CommandResult {
    store.clear_all();
    CommandResult::visible("All conversations cleared.")
}

fn handle_help() -> CommandResult {
    CommandResult::ephemeral(
        "/new              -- Start a new conversation\n\
         /list             -- List conversations, most recent first\n\
         /select <n|id>    -- Switch to a conversation\n\
         /delete [n|id]    -- Delete a conversation (default: current)\n\
         /rename <title>   -- Rename the current conversation\n\
         /clear            -- Delete every conversation\n\
         /settings         -- Show the active settings\n\
         /help             -- Show this help message\n\
         /quit             -- Leave the chat",
    )
}
