use crate::chat::Role;
use console::style;
use std::fmt::Display;

/// Green bold: confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: titles, the active marker
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: timestamps, ids, secondary text
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: code block bodies
pub fn code<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Green: configured values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan: field labels
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Red bold: error messages and notices
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Speaker label for a transcript line.
pub fn role_label(role: Role) -> String {
    let name = match role {
        Role::System => "system",
        Role::User => "you",
        Role::Assistant => "assistant",
        Role::Error => "error",
    };
    match role {
        Role::User => style(name).cyan().bold().to_string(),
        Role::Assistant => style(name).magenta().bold().to_string(),
        Role::Error => error(name),
        Role::System => dim(name),
    }
}
