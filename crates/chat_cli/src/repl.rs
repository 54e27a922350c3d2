use anyhow::{anyhow, bail};
use branch_tree::{MessageId, PathResolver};
use chat_session::{ChatSession, Direction, ResponseSource, SessionEvent, SessionOutcome};
use colored::Colorize;

use crate::render::{render_path, render_view};

pub const HELP: &str = "\
  <text>              send a message
  /edit <id> <text>   rewrite a message on a new branch
  /prev <id>          show the previous branch at a fork
  /next <id>          show the next branch at a fork
  /jump <id>          show the branch holding a message
  /new                start a new conversation
  /path               print the active branch path
  /ghosts             toggle inactive branch rows
  /help               show this help
  /quit               leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Edit { id: String, text: String },
    Prev(String),
    Next(String),
    Jump(String),
    New,
    Path,
    Ghosts,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Say(line.to_string()));
        };

        let (name, args) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, args)| (name, args.trim()));

        let id_arg = |args: &str| -> anyhow::Result<String> {
            match args.split_whitespace().next() {
                Some(id) => Ok(id.to_string()),
                None => bail!("/{name} needs a message id"),
            }
        };

        match name {
            "edit" => {
                let (id, text) = args
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: /edit <id> <text>"))?;
                Ok(Self::Edit {
                    id: id.to_string(),
                    text: text.trim().to_string(),
                })
            }
            "prev" => Ok(Self::Prev(id_arg(args)?)),
            "next" => Ok(Self::Next(id_arg(args)?)),
            "jump" => Ok(Self::Jump(id_arg(args)?)),
            "new" => Ok(Self::New),
            "path" => Ok(Self::Path),
            "ghosts" => Ok(Self::Ghosts),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => bail!("unknown command /{other}, try /help"),
        }
    }
}

pub enum Flow {
    Continue,
    Quit,
}

fn resolve<R: ResponseSource>(session: &ChatSession<R>, query: &str) -> anyhow::Result<MessageId> {
    Ok(PathResolver::resolve_short(session.tree(), query)?)
}

/// Run one command against the session and print its effect.
pub async fn execute<R: ResponseSource>(
    session: &mut ChatSession<R>,
    command: Command,
) -> anyhow::Result<Flow> {
    let event = match command {
        Command::Say(text) => SessionEvent::Submit { text },
        Command::Edit { id, text } => SessionEvent::Edit {
            message_id: resolve(session, &id)?,
            text,
        },
        Command::Prev(id) => SessionEvent::Navigate {
            message_id: resolve(session, &id)?,
            direction: Direction::Prev,
        },
        Command::Next(id) => SessionEvent::Navigate {
            message_id: resolve(session, &id)?,
            direction: Direction::Next,
        },
        Command::Jump(id) => SessionEvent::Jump {
            message_id: resolve(session, &id)?,
        },
        Command::New => SessionEvent::NewSession,
        Command::Path => {
            println!("{}", render_path(&session.tree().current_path()).yellow());
            return Ok(Flow::Continue);
        }
        Command::Ghosts => {
            let show = !session.config().show_inactive_branches;
            session.set_show_inactive(show);
            println!("{}", render_view(&session.view()));
            return Ok(Flow::Continue);
        }
        Command::Help => {
            println!("{}", HELP.dimmed());
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };

    match session.handle(event).await? {
        SessionOutcome::Appended { reply, .. } => {
            println!("{} {}", "assistant:".green().bold(), reply.content);
        }
        SessionOutcome::Forked { fork, .. } => {
            println!("{}", format!("branch {} created", fork.locator()).dimmed());
            println!("{}", render_view(&session.view()));
        }
        SessionOutcome::Switched { .. } | SessionOutcome::Jumped { .. } => {
            println!("{}", render_view(&session.view()));
        }
        SessionOutcome::Reset => println!("{}", "started a new conversation".dimmed()),
    }
    Ok(Flow::Continue)
}
