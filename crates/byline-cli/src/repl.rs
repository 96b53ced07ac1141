//! Interactive ask loop.

use crate::app::App;
use anyhow::Result;
use byline_core::timer::{PollerConfig, StatusPoller};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Runs the interactive session.
///
/// Enter submits the line through the same entry point the one-shot
/// `ask` command uses. The status poller runs for the lifetime of the
/// loop and is shut down with it.
pub async fn run(app: &App) -> Result<()> {
    if !app.sessions.is_authenticated().await {
        println!("Not signed in; run `byline login <token>` first.");
        return Ok(());
    }

    let mut poller = StatusPoller::start(app.timer_gateway(), PollerConfig::default());
    let mut rl = DefaultEditor::new()?;
    println!("Ask away. Ctrl-D exits.");

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                app.ask(&line).await?;

                let display = poller.current();
                if display.query_secs > 0.0 || display.response_secs > 0.0 {
                    println!(
                        "{}",
                        format!(
                            "Query timer: {:.2}s  Response timer: {:.2}s",
                            display.query_secs, display.response_secs
                        )
                        .bright_blue()
                    );
                }

                if !app.sessions.is_authenticated().await {
                    // The session was torn down; back to the login screen
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        }
    }

    poller.shutdown();
    Ok(())
}
