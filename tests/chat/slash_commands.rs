use chatkra::commands::{Command, handle_command, parse_command};

use crate::chat_harness::{http_store, memory_backend};

#[test]
fn typed_commands_drive_the_store() {
    let mut store = http_store(memory_backend(), "https://api.example.com/v1/chat/completions");
    let first = store.active_id().unwrap().to_string();

    let new = parse_command("/new").unwrap();
    handle_command(&new, &mut store);
    assert_eq!(store.len(), 2);

    let rename = parse_command("/rename Groceries").unwrap();
    handle_command(&rename, &mut store);
    assert_eq!(store.active_conversation().unwrap().title, "Groceries");

    // "Groceries" is the most recent, so the first conversation is #2
    let select = parse_command("/select 2").unwrap();
    handle_command(&select, &mut store);
    assert_eq!(store.active_id(), Some(first.as_str()));

    let delete = parse_command("/delete").unwrap();
    handle_command(&delete, &mut store);
    assert_eq!(store.len(), 1);
    assert_eq!(store.active_conversation().unwrap().title, "Groceries");
}

#[test]
fn non_commands_are_left_for_sending() {
    assert_eq!(parse_command("hello there"), None);
    assert_eq!(parse_command("/quit"), Some(Command::Quit));
}

#[test]
fn bad_selection_reports_without_changing_state() {
    let mut store = http_store(memory_backend(), "https://api.example.com/v1/chat/completions");
    let active = store.active_id().unwrap().to_string();

    let result = handle_command(&parse_command("/select 9").unwrap(), &mut store);

    assert!(result.ephemeral);
    assert!(result.text.contains("No conversation #9"));
    assert_eq!(store.active_id(), Some(active.as_str()));
}
