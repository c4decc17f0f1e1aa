#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    List,
    Select { target: Option<String> },
    Delete { target: Option<String> },
    Rename { title: Option<String> },
    Clear,
    Settings,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub text: String,
    pub ephemeral: bool,
    /// The REPL should stop after printing `text`.
    pub exit: bool,
}

impl CommandResult {
    pub fn visible(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: false,
            exit: false,
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: true,
            exit: false,
        }
    }

    pub fn exit(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: true,
            exit: true,
        }
    }
}
