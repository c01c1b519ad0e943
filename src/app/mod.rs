//! Pane session: command loop, operation dispatch and state updates
//!
//! Suspending work (body coercion, summarization, sync) runs on spawned tasks and
//! reports back over an mpsc channel. Results are applied to [`PaneState`] on the
//! session loop only.

mod editor;
mod render;
mod state;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::ai::{CompletionBackend, Summarizer};
use crate::command::{CommandResult, ParsedCommand, available_commands, parse_command};
use crate::config::Config;
use crate::constants::{EVENT_CHANNEL_CAPACITY, SYNC_FAILURE_MESSAGE, SYNC_SUCCESS_MESSAGE};
use crate::mail::{EmailData, MailItem, read_email};
use crate::sync::{SyncError, SyncRecord, SyncSubmitter, SyncTransport};

pub use state::{Operation, PaneState};

/// Results of spawned operations
#[derive(Debug)]
pub enum PaneEvent {
    /// `None` when the open item is not a message
    Summarized(Option<EmailData>),
    Synced {
        /// Email read for this sync when nothing had been extracted before
        extracted: Option<EmailData>,
        subject: String,
        result: Result<Value, SyncError>,
    },
    /// The open item is not a message; nothing was sent
    SyncSkipped,
    /// The operation's task ended without producing a result
    Failed(Operation),
}

pub struct App<I, C, T> {
    config: Config,
    item: Arc<I>,
    summarizer: Arc<Summarizer<C>>,
    submitter: Arc<SyncSubmitter<T>>,
    pub state: PaneState,
    event_tx: mpsc::Sender<PaneEvent>,
    event_rx: mpsc::Receiver<PaneEvent>,
}

impl<I, C, T> App<I, C, T>
where
    I: MailItem + 'static,
    C: CompletionBackend + 'static,
    T: SyncTransport + 'static,
{
    pub fn new(
        config: Config,
        item: I,
        summarizer: Summarizer<C>,
        submitter: SyncSubmitter<T>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            item: Arc::new(item),
            summarizer: Arc::new(summarizer),
            submitter: Arc::new(submitter),
            state: PaneState::default(),
            event_tx,
            event_rx,
        }
    }

    /// Read commands from stdin until `quit`, EOF or Ctrl-C
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", render::render_item_header(self.item.as_ref()));
        println!("Type 'summarize' to extract actions, 'help' for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_command(&line) {
                        Some(ParsedCommand::Quit) => break,
                        Some(cmd) => print_result(self.handle_command(cmd)),
                        None => print_result(CommandResult::Error(format!(
                            "Unknown command: {} (type 'help')",
                            line.trim()
                        ))),
                    }
                }
                Some(event) = self.event_rx.recv() => {
                    print_result(self.handle_event(event));
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        if let Some(op) = self.state.in_flight.current() {
            tracing::info!("Closing pane while {} is still running", op);
        }
        Ok(())
    }

    pub fn handle_command(&mut self, cmd: ParsedCommand) -> CommandResult {
        match cmd {
            ParsedCommand::Summarize => self.start_summarize(),
            ParsedCommand::Sync => self.start_sync(),
            ParsedCommand::Show => CommandResult::Success(render::render_pane(&self.state)),
            ParsedCommand::Edit { row, title } => match self.state.editor.set_title(row, title) {
                Ok(()) => CommandResult::Success(format!("Action {} updated", row + 1)),
                Err(e) => CommandResult::Error(e.to_string()),
            },
            ParsedCommand::Assign { row, address } => {
                let address = address.unwrap_or_default();
                match self.state.editor.assign(row, &address) {
                    Ok(()) if address.is_empty() => {
                        CommandResult::Success(format!("Action {} unassigned", row + 1))
                    }
                    Ok(()) => {
                        CommandResult::Success(format!("Action {} assigned to {}", row + 1, address))
                    }
                    Err(e) => CommandResult::Error(e.to_string()),
                }
            }
            ParsedCommand::Help => CommandResult::ShowHelp(available_commands()),
            ParsedCommand::Quit => CommandResult::Success(String::new()),
        }
    }

    /// Extract the item and summarize it on a background task
    fn start_summarize(&mut self) -> CommandResult {
        if let Err(running) = self.state.in_flight.try_begin(Operation::Summarize) {
            return CommandResult::Error(format!("{} is already in progress", running));
        }

        let item = Arc::clone(&self.item);
        let summarizer = Arc::clone(&self.summarizer);

        self.spawn_operation(Operation::Summarize, async move {
            let email = match read_email(item.as_ref()).await {
                Some(mut email) => {
                    email.actions = summarizer.summarize(&email.summary_input()).await;
                    Some(email)
                }
                None => None,
            };
            PaneEvent::Summarized(email)
        });

        CommandResult::Success("Summarizing...".to_string())
    }

    /// Assemble a record from the current rows and submit it on a background task
    fn start_sync(&mut self) -> CommandResult {
        if let Err(running) = self.state.in_flight.try_begin(Operation::Sync) {
            return CommandResult::Error(format!("{} is already in progress", running));
        }

        let known = self.state.email.clone();
        let tasks = self.state.tasks();
        let item = Arc::clone(&self.item);
        let submitter = Arc::clone(&self.submitter);

        self.spawn_operation(Operation::Sync, async move {
            let (email, extracted) = match known {
                Some(email) => (Some(email), false),
                None => (read_email(item.as_ref()).await, true),
            };

            match email {
                Some(email) => {
                    let record = SyncRecord::assemble(&email, &tasks, Utc::now());
                    let result = submitter.submit(&record).await;
                    PaneEvent::Synced {
                        extracted: extracted.then_some(email),
                        subject: record.title,
                        result,
                    }
                }
                None => PaneEvent::SyncSkipped,
            }
        });

        CommandResult::Success("Syncing...".to_string())
    }

    /// Run `work` on its own task and always deliver exactly one event for `op`, even
    /// when the task panics, so the in-flight guard is released.
    fn spawn_operation<F>(&self, op: Operation, work: F)
    where
        F: Future<Output = PaneEvent> + Send + 'static,
    {
        let event_tx = self.event_tx.clone();
        let handle = tokio::spawn(work);

        tokio::spawn(async move {
            let event = match handle.await {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("{} task failed: {}", op, e);
                    PaneEvent::Failed(op)
                }
            };
            if event_tx.send(event).await.is_err() {
                tracing::warn!("Pane closed before {} result was delivered", op);
            }
        });
    }

    pub fn handle_event(&mut self, event: PaneEvent) -> CommandResult {
        match event {
            PaneEvent::Summarized(Some(email)) => {
                self.state.in_flight.finish(Operation::Summarize);
                let count = email.actions.len();
                self.state.apply_summary(email);
                tracing::info!("Summary ready with {} action(s)", count);
                CommandResult::Success(render::render_pane(&self.state))
            }
            PaneEvent::Summarized(None) => {
                self.state.in_flight.finish(Operation::Summarize);
                CommandResult::Error("The open item is not a mail message".to_string())
            }
            PaneEvent::Synced {
                extracted,
                subject,
                result,
            } => {
                self.state.in_flight.finish(Operation::Sync);
                if self.state.email.is_none() {
                    self.state.email = extracted;
                }

                let success = result.is_ok();
                #[cfg(feature = "notifications")]
                crate::notification::notify_sync_result(&self.config, &subject, success);
                #[cfg(not(feature = "notifications"))]
                let _ = (&self.config, &subject);

                if success {
                    CommandResult::Success(SYNC_SUCCESS_MESSAGE.to_string())
                } else {
                    CommandResult::Error(SYNC_FAILURE_MESSAGE.to_string())
                }
            }
            PaneEvent::SyncSkipped => {
                self.state.in_flight.finish(Operation::Sync);
                CommandResult::Error("The open item is not a mail message".to_string())
            }
            PaneEvent::Failed(op) => {
                self.state.in_flight.finish(op);
                CommandResult::Error(format!("{} failed unexpectedly. Please try again.", op))
            }
        }
    }

    #[cfg(test)]
    async fn next_event(&mut self) -> PaneEvent {
        self.event_rx.recv().await.unwrap()
    }
}

fn print_result(result: CommandResult) {
    match result {
        CommandResult::Success(msg) => {
            if !msg.is_empty() {
                println!("{}", msg.trim_end());
            }
        }
        CommandResult::Error(msg) => eprintln!("{}", msg),
        CommandResult::ShowHelp(commands) => println!("{}", render::render_help(&commands)),
    }
}
