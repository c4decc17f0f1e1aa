use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `chatkra` - terminal chat client for OpenAI-compatible endpoints.
#[derive(Parser, Debug)]
#[command(name = "chatkra")]
#[command(version)]
#[command(about = "Chat with an OpenAI-compatible completion endpoint.", long_about = None)]
pub struct Cli {
    /// Config file to load instead of ~/.chatkra/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep conversations in memory only; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `chat` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive chat session in the active conversation
    Chat,

    /// Send one message to the active conversation and print the reply
    Send {
        /// Message text (words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// List conversations, most recently updated first
    List,

    /// Start a new conversation and make it active
    New,

    /// Make a conversation active (list number, id, or id prefix)
    Select { target: String },

    /// Delete a conversation (list number, id, or id prefix)
    Delete { target: String },

    /// Rename a conversation
    Rename {
        target: String,
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Delete every conversation
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a conversation transcript (default: the active one)
    Show { target: Option<String> },

    /// Inspect or change chat settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },

    /// Render markdown from a file (or stdin) the way replies are rendered
    Render {
        file: Option<PathBuf>,

        /// Emit the HTML fragment instead of terminal output
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SettingsCommands {
    /// Show the active settings
    Show,

    /// Change one or more settings
    Set {
        #[arg(long)]
        endpoint: Option<String>,

        /// API key (prefer --prompt-api-key to keep it out of shell history)
        #[arg(long, conflicts_with = "prompt_api_key")]
        api_key: Option<String>,

        /// Read the API key from a hidden prompt
        #[arg(long)]
        prompt_api_key: bool,

        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature (0.0 - 1.0)
        #[arg(long)]
        temperature: Option<f64>,

        #[arg(long)]
        max_tokens: Option<u32>,

        #[arg(long)]
        system_prompt: Option<String>,
    },

    /// Restore the configured defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_chat() {
        let cli = Cli::parse_from(["chatkra"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn send_joins_trailing_words() {
        let cli = Cli::parse_from(["chatkra", "--ephemeral", "send", "hello", "there"]);
        assert!(cli.ephemeral);
        assert_eq!(
            cli.command,
            Some(Commands::Send {
                text: vec!["hello".into(), "there".into()]
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chatkra", "list", "-v", "--config", "/tmp/c.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn settings_set_parses_numbers() {
        let cli = Cli::parse_from([
            "chatkra",
            "settings",
            "set",
            "--temperature",
            "0.2",
            "--max-tokens",
            "512",
        ]);
        let Some(Commands::Settings {
            action: SettingsCommands::Set {
                temperature,
                max_tokens,
                ..
            },
        }) = cli.command
        else {
            panic!("expected settings set");
        };
        assert_eq!(temperature, Some(0.2));
        assert_eq!(max_tokens, Some(512));
    }

    #[test]
    fn api_key_flags_conflict() {
        let result = Cli::try_parse_from([
            "chatkra",
            "settings",
            "set",
            "--api-key",
            "k",
            "--prompt-api-key",
        ]);
        assert!(result.is_err());
    }
}
