use super::types::Command;

/// Parse a REPL line as a slash command. Anything else is a chat message.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();
    let args = parts.next().unwrap_or("").trim();
    let arg = (!args.is_empty()).then(|| args.to_string());

    match cmd.as_str() {
        "/new" => Some(Command::New),
        "/list" | "/ls" => Some(Command::List),
        "/select" | "/open" => Some(Command::Select { target: arg }),
        "/delete" | "/rm" => Some(Command::Delete { target: arg }),
        "/rename" | "/title" => Some(Command::Rename { title: arg }),
        "/clear" => Some(Command::Clear),
        "/settings" => Some(Command::Settings),
        "/help" | "/?" => Some(Command::Help),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_command() {
        assert_eq!(parse_command("/new"), Some(Command::New));
    }

    #[test]
    fn case_insensitive_with_leading_whitespace() {
        assert_eq!(parse_command("   /LIST"), Some(Command::List));
    }

    #[test]
    fn select_with_index() {
        assert_eq!(
            parse_command("/select 2"),
            Some(Command::Select {
                target: Some("2".to_string())
            })
        );
    }

    #[test]
    fn select_without_target() {
        assert_eq!(
            parse_command("/select"),
            Some(Command::Select { target: None })
        );
    }

    #[test]
    fn delete_defaults_to_active() {
        assert_eq!(
            parse_command("/delete"),
            Some(Command::Delete { target: None })
        );
    }

    #[test]
    fn rename_keeps_inner_whitespace() {
        assert_eq!(
            parse_command("/rename  Trip to   Lisbon "),
            Some(Command::Rename {
                title: Some("Trip to   Lisbon".to_string())
            })
        );
    }

    #[test]
    fn help_question_mark() {
        assert_eq!(parse_command("/?"), Some(Command::Help));
    }

    #[test]
    fn quit_aliases() {
        assert_eq!(parse_command("/quit"), Some(Command::Quit));
        assert_eq!(parse_command("/exit"), Some(Command::Quit));
    }

    #[test]
    fn plain_text_returns_none() {
        assert_eq!(parse_command("hello /new"), None);
    }

    #[test]
    fn unknown_command_returns_none() {
        assert_eq!(parse_command("/unknown"), None);
    }

    #[test]
    fn empty_input_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }
}
