//! Chat session service

use branch_tree::{
    ActiveViewProjector, BranchLocator, ChatTree, ForkResult, Message, MessageId,
    ProjectionEntry, ProjectionOptions, Sender,
};
use chat_core::ChatConfig;
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::events::{Direction, SessionEvent, SessionOutcome};
use crate::responder::ResponseSource;

/// Chat session - one branching conversation and its reply source
pub struct ChatSession<R: ResponseSource> {
    id: Uuid,
    tree: ChatTree,
    config: ChatConfig,
    responder: R,
}

impl<R: ResponseSource> ChatSession<R> {
    pub fn new(responder: R, config: ChatConfig) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "ChatSession: Started");
        Self {
            id,
            tree: ChatTree::new(),
            config,
            responder,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tree(&self) -> &ChatTree {
        &self.tree
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn set_show_inactive(&mut self, show: bool) {
        self.config.show_inactive_branches = show;
    }

    /// Render-ready view of the active chain.
    pub fn view(&self) -> Vec<ProjectionEntry> {
        ActiveViewProjector::project_with(
            &self.tree,
            ProjectionOptions {
                include_inactive: self.config.show_inactive_branches,
            },
        )
    }

    /// Dispatch one UI event.
    pub async fn handle(&mut self, event: SessionEvent) -> Result<SessionOutcome> {
        match event {
            SessionEvent::Submit { text } => {
                let (message, reply) = self.submit(&text).await?;
                Ok(SessionOutcome::Appended { message, reply })
            }
            SessionEvent::Edit { message_id, text } => {
                let (fork, reply) = self.edit(message_id, &text).await?;
                Ok(SessionOutcome::Forked { fork, reply })
            }
            SessionEvent::Navigate {
                message_id,
                direction,
            } => {
                let (origin, branch_index) = self.navigate(message_id, direction)?;
                Ok(SessionOutcome::Switched {
                    origin,
                    branch_index,
                })
            }
            SessionEvent::Jump { message_id } => {
                let path = self.jump(message_id)?;
                Ok(SessionOutcome::Jumped { path })
            }
            SessionEvent::NewSession => {
                self.new_session();
                Ok(SessionOutcome::Reset)
            }
        }
    }

    /// Append a user message and the assistant's reply to it.
    ///
    /// The user message stays in the tree when the response source fails.
    pub async fn submit(&mut self, text: &str) -> Result<(Message, Message)> {
        ensure_content(text)?;
        let message = self.tree.add_message(text, Sender::User);
        let reply = self.request_reply().await?;
        Ok((message, reply))
    }

    /// Fork at `message_id`. Editing a user message asks for a fresh reply on
    /// the new branch.
    ///
    /// The new branch stays selected when the response source fails.
    pub async fn edit(
        &mut self,
        message_id: MessageId,
        text: &str,
    ) -> Result<(ForkResult, Option<Message>)> {
        ensure_content(text)?;
        let fork = self.tree.edit_message(message_id, text)?;
        tracing::info!(
            session_id = %self.id,
            origin = %fork.origin.short(),
            branch_index = fork.branch_index,
            "ChatSession: Forked"
        );

        let reply = if fork.message.is_user() {
            Some(self.request_reply().await?)
        } else {
            None
        };
        Ok((fork, reply))
    }

    /// Step to the neighbouring sibling branch of the fork `message_id`
    /// belongs to. Returns the fork origin and the newly selected index.
    pub fn navigate(
        &mut self,
        message_id: MessageId,
        direction: Direction,
    ) -> Result<(MessageId, u32)> {
        let siblings = self
            .tree
            .siblings_of(message_id)
            .ok_or(SessionError::NoAlternatives(message_id))?;
        let target = match direction {
            Direction::Prev => siblings.previous(),
            Direction::Next => siblings.next(),
        }
        .ok_or(SessionError::NoSiblingBranch {
            origin: siblings.origin,
            direction,
        })?;

        self.tree.switch_branch(siblings.origin, target)?;
        Ok((siblings.origin, target))
    }

    /// Make the branch holding `message_id` visible.
    pub fn jump(&mut self, message_id: MessageId) -> Result<Vec<BranchLocator>> {
        Ok(self.tree.jump_to(message_id)?)
    }

    pub fn new_session(&mut self) {
        tracing::info!(session_id = %self.id, "ChatSession: Reset");
        self.tree.start_new();
    }

    /// Tail of the active chain handed to the response source.
    fn history_window(&self) -> Vec<Message> {
        let active = self.tree.active_messages();
        let skip = match self.config.history_limit {
            0 => 0,
            limit => active.len().saturating_sub(limit),
        };
        active.into_iter().skip(skip).cloned().collect()
    }

    async fn request_reply(&mut self) -> Result<Message> {
        let history = self.history_window();
        let content = self
            .responder
            .respond(&history)
            .await
            .inspect_err(|e| {
                tracing::warn!(session_id = %self.id, error = %e, "ChatSession: Responder failed")
            })?;
        Ok(self.tree.add_message(content, Sender::Assistant))
    }
}

fn ensure_content(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(SessionError::EmptyContent);
    }
    Ok(())
}
