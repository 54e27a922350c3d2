mod render;
mod repl;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chat_core::ChatConfig;
use chat_session::{ChatSession, EchoResponder, ResponseSource};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::render::render_view;
use crate::repl::{execute, Command, Flow};

#[derive(Parser)]
#[command(name = "chat-cli")]
#[command(about = "Branching chat in the terminal")]
#[command(version)]
struct Cli {
    /// Tracing filter used when RUST_LOG is unset
    #[arg(long)]
    log_filter: Option<String>,

    /// Also print the rows of non-selected branches
    #[arg(long, default_value = "false")]
    show_inactive: bool,

    /// Messages handed to the responder (0 = all)
    #[arg(long)]
    history_limit: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat (default)
    Chat,
    /// Run commands from a file, one per line, then print the conversation
    Run {
        /// Script path
        script: PathBuf,
    },
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ChatConfig::load();
    if let Some(filter) = cli.log_filter {
        config.log_filter = filter;
    }
    if let Some(limit) = cli.history_limit {
        config.history_limit = limit;
    }
    if cli.show_inactive {
        config.show_inactive_branches = true;
    }
    init_tracing(&config.log_filter);

    let responder = EchoResponder::new(config.assistant_prefix.clone());
    let mut session = ChatSession::new(responder, config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_interactive_chat(&mut session).await,
        Commands::Run { script } => run_script(&mut session, &script).await,
    }
}

async fn run_interactive_chat<R: ResponseSource>(session: &mut ChatSession<R>) -> anyhow::Result<()> {
    println!("{}", "Branching Chat".cyan().bold());
    println!("{}", format!("Session ID: {}", session.id()).dimmed());
    println!("{}", "Type /help for commands, /quit to leave".dimmed());
    println!();

    let stdin = io::stdin();
    loop {
        print!("{} ", "you:".cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        if input.trim().is_empty() {
            continue;
        }

        let outcome = match Command::parse(&input) {
            Ok(command) => execute(session, command).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::warn!(session_id = %session.id(), error = %e, "Command failed");
                println!("{}", format!("error: {e}").red());
            }
        }
    }

    println!("{}", "bye".cyan());
    Ok(())
}

async fn run_script<R: ResponseSource>(session: &mut ChatSession<R>, script: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(script)?;
    run_lines(session, text.lines()).await?;
    println!();
    println!("{}", render_view(&session.view()));
    Ok(())
}

/// Execute each non-blank line, stopping at the first failure or `/quit`.
async fn run_lines<'a, R: ResponseSource>(
    session: &mut ChatSession<R>,
    lines: impl Iterator<Item = &'a str>,
) -> anyhow::Result<()> {
    for (number, line) in lines.enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        println!("{} {}", "you:".cyan().bold(), line.trim());
        let outcome = match Command::parse(line) {
            Ok(command) => execute(session, command).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::warn!(line = number + 1, error = %e, "Script stopped");
                anyhow::bail!("line {}: {e}", number + 1);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_stops_at_quit() {
        let mut session = ChatSession::new(EchoResponder::default(), ChatConfig::default());
        let script = "hello\n\n# comment\nsecond\n/quit\nnever sent\n";

        run_lines(&mut session, script.lines()).await.unwrap();

        assert_eq!(session.tree().message_count(), 4);
    }

    #[tokio::test]
    async fn test_script_reports_failing_line() {
        let mut session = ChatSession::new(EchoResponder::default(), ChatConfig::default());
        let err = run_lines(&mut session, "hi\n/jump ffffffff".lines())
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("line 2:"));
    }

    #[tokio::test]
    async fn test_script_reports_unparseable_line() {
        let mut session = ChatSession::new(EchoResponder::default(), ChatConfig::default());
        let err = run_lines(&mut session, "hi\n\n/frobnicate".lines())
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("line 3:"));
        assert_eq!(session.tree().message_count(), 2);
    }

    #[tokio::test]
    async fn test_run_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let mut session = ChatSession::new(EchoResponder::default(), ChatConfig::default());
        run_script(&mut session, &path).await.unwrap();

        assert_eq!(session.view().len(), 4);
    }
}
