use crate::chat::{ChatStore, SendOutcome};
use crate::commands::{handle_command, parse_command};
use crate::ui::{style, view};
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

const TYPING_DELAY: Duration = Duration::from_millis(400);

/// Interactive loop over stdin: slash commands or chat messages.
pub async fn run(store: &mut ChatStore) -> Result<()> {
    println!(
        "{} {}",
        style::header("chatkra"),
        style::dim("(/help for commands, /quit to leave)")
    );
    if let Some(conversation) = store.active_conversation() {
        print!("{}", view::transcript(conversation));
    }

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        prompt()?;
        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = parse_command(line) {
            debug!(?command, "slash command");
            let result = handle_command(&command, store);
            println!("{}", result.text.trim_end());
            print_notices(store);
            if result.exit {
                break;
            }
            continue;
        }

        let indicator = typing_indicator(store.loading_flag());
        let outcome = store.send_message(line).await;
        indicator.abort();
        print_outcome(store, &outcome);
    }
    Ok(())
}

/// Print the reply (or the lack of one) followed by pending notices.
pub fn print_outcome(store: &mut ChatStore, outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Skipped => println!("{}", style::dim("Nothing to send.")),
        SendOutcome::Empty => println!("{}", style::dim("(the model returned no reply)")),
        SendOutcome::Reply(message) | SendOutcome::Error(message) => {
            println!("{}\n", view::message(message));
        }
    }
    print_notices(store);
}

pub fn print_notices(store: &mut ChatStore) {
    for notice in store.take_notices() {
        eprintln!("{}", view::notice(&notice));
    }
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{} ", style::cyan(">")).context("Failed to write prompt")?;
    stdout.flush().context("Failed to flush stdout")
}

/// Prints a hint if the request is still in flight after a short delay.
fn typing_indicator(loading: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(TYPING_DELAY).await;
        if loading.load(Ordering::SeqCst) {
            eprintln!("{}", style::dim("assistant is typing..."));
        }
    })
}
