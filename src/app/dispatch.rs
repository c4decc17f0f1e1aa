use crate::app::repl;
use crate::chat::{ChatStore, SettingsPatch};
use crate::cli::{Cli, Commands, SettingsCommands};
use crate::commands::resolve_target;
use crate::config::Config;
use crate::llm::{HttpCompletionClient, build_completion_client_with_timeout};
use crate::markdown;
use crate::storage::{ChatPersistence, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use crate::ui::{style, view};
use anyhow::{Context, Result, anyhow, bail};
use dialoguer::{Confirm, Password};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Open the persisted store (or an in-memory one) with an HTTP completion client.
pub fn build_store(config: &Config, ephemeral: bool) -> Result<ChatStore> {
    let backend: Arc<dyn KeyValueStore> = if ephemeral {
        info!("ephemeral session; nothing will be persisted");
        Arc::new(MemoryKeyValueStore::new())
    } else {
        let dir = config.data_dir_path();
        Arc::new(
            FileKeyValueStore::new(&dir)
                .with_context(|| format!("Failed to open data directory {}", dir.display()))?,
        )
    };
    let client = HttpCompletionClient::with_client(build_completion_client_with_timeout(
        config.request_timeout_secs,
    ));

    Ok(ChatStore::load(
        ChatPersistence::new(backend),
        Arc::new(client),
        config.chat_settings(),
    )
    .with_request_timeout(config.request_timeout()))
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Chat);
    if let Commands::Render { file, html } = &command {
        return render(file.as_deref(), *html).await;
    }

    let mut store = build_store(&config, cli.ephemeral)?;
    match command {
        Commands::Chat => repl::run(&mut store).await,
        Commands::Send { text } => {
            let text = text.join(" ");
            let outcome = store.send_message(&text).await;
            repl::print_outcome(&mut store, &outcome);
            Ok(())
        }
        Commands::List => {
            print!("{}", view::conversation_list(&store));
            Ok(())
        }
        Commands::New => {
            let id = store.create_conversation();
            println!(
                "{} {}",
                style::success("Created"),
                style::dim(view::short_id(&id))
            );
            Ok(())
        }
        Commands::Select { target } => {
            let id = resolve(&store, &target)?;
            store.select_conversation(&id);
            persist_selection(&mut store, &id);
            println!("{} {}", style::success("Active:"), title_of(&store, &id));
            Ok(())
        }
        Commands::Delete { target } => {
            let id = resolve(&store, &target)?;
            let title = title_of(&store, &id);
            store.delete_conversation(&id);
            println!("{} {title}", style::success("Deleted"));
            Ok(())
        }
        Commands::Rename { target, title } => {
            let id = resolve(&store, &target)?;
            let title = title.join(" ");
            store.rename_conversation(&id, title.as_str());
            println!("{} {title}", style::success("Renamed to"));
            Ok(())
        }
        Commands::Clear { yes } => clear(&mut store, yes),
        Commands::Show { target } => {
            let conversation = match target {
                Some(target) => {
                    let id = resolve(&store, &target)?;
                    store.get(&id)
                }
                None => store.active_conversation(),
            }
            .ok_or_else(|| anyhow!("No conversation to show"))?;
            print!("{}", view::transcript(conversation));
            Ok(())
        }
        Commands::Settings { action } => settings(&mut store, action),
        Commands::Render { .. } => Ok(()),
    }
}

fn resolve(store: &ChatStore, target: &str) -> Result<String> {
    resolve_target(store, target).map_err(|reason| anyhow!(reason))
}

fn title_of(store: &ChatStore, id: &str) -> String {
    store.get(id).map(|c| c.title.clone()).unwrap_or_default()
}

/// The active pointer is not persisted; selecting from the command line
/// bumps the conversation so the next run starts there.
fn persist_selection(store: &mut ChatStore, id: &str) {
    let title = title_of(store, id);
    store.rename_conversation(id, title);
}

fn clear(store: &mut ChatStore, yes: bool) -> Result<()> {
    if !yes {
        if !std::io::stdin().is_terminal() {
            bail!("refusing to clear without --yes in non-interactive mode");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete all {} conversations?", store.len()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", style::dim("Cancelled."));
            return Ok(());
        }
    }
    store.clear_all();
    println!("{}", style::success("All conversations cleared."));
    Ok(())
}

fn settings(store: &mut ChatStore, action: SettingsCommands) -> Result<()> {
    match action {
        SettingsCommands::Show => {}
        SettingsCommands::Set {
            endpoint,
            api_key,
            prompt_api_key,
            model,
            temperature,
            max_tokens,
            system_prompt,
        } => {
            let api_key = if prompt_api_key {
                Some(
                    Password::new()
                        .with_prompt("API key (input hidden)")
                        .allow_empty_password(true)
                        .interact()
                        .context("Failed to read API key from terminal")?,
                )
            } else {
                api_key
            };
            let patch = SettingsPatch {
                endpoint,
                api_key,
                model,
                temperature,
                max_tokens,
                system_prompt,
            };
            if patch.is_empty() {
                bail!("nothing to change; pass at least one option (see --help)");
            }
            store.update_settings(patch)?;
        }
        SettingsCommands::Reset => store.reset_settings(),
    }
    repl::print_notices(store);
    print!("{}", view::settings_summary(store.settings()));
    Ok(())
}

async fn render(file: Option<&Path>, html: bool) -> Result<()> {
    let text = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if html {
        println!("{}", markdown::render_html(&text));
    } else {
        println!("{}", view::render_markdown(&text));
    }
    Ok(())
}
