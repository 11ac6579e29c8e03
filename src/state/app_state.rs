//! Shared handle used by the HTTP API to reach the dispatcher

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, warn};

use super::Snapshot;
use crate::{
    config::DisplayHints,
    error::{AnswerError, DispatchError},
    events::{Command, ConfirmOption, ConfirmationToken, Event},
    services::{PendingPrompt, PromptBroker},
};

/// Everything request handlers need. Never touches the timer state directly:
/// commands go through the dispatcher queue and reads come from the latest
/// published snapshot.
pub struct AppState {
    /// Queue into the dispatcher
    pub events_tx: mpsc::UnboundedSender<Event>,
    /// Latest snapshot published by the dispatcher
    pub snapshot_rx: watch::Receiver<Snapshot>,
    /// Outstanding confirmation prompts
    pub confirmations: PromptBroker,
    pub hints: DisplayHints,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Arc<Mutex<Option<(String, DateTime<Utc>)>>>,
}

impl AppState {
    pub fn new(
        events_tx: mpsc::UnboundedSender<Event>,
        snapshot_rx: watch::Receiver<Snapshot>,
        confirmations: PromptBroker,
        hints: DisplayHints,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            events_tx,
            snapshot_rx,
            confirmations,
            hints,
            start_time: Instant::now(),
            port,
            host,
            last_action: Default::default(),
        }
    }

    /// Run a command on the dispatcher and wait for its outcome.
    pub async fn send_command(&self, command: Command) -> Result<Snapshot, DispatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events_tx
            .send(Event::Command { command, reply: Some(reply_tx) })
            .map_err(|_| DispatchError::Closed)?;

        let snapshot = reply_rx.await.map_err(|_| DispatchError::Closed)??;
        self.record_action(command.name());
        Ok(snapshot)
    }

    /// Submit the user's explicit answer to an outstanding prompt.
    pub fn answer(&self, token: ConfirmationToken, option: ConfirmOption) -> Result<(), AnswerError> {
        self.confirmations.answer(token, option)?;
        info!(%token, %option, "Confirmation answered");
        self.record_action(&format!("confirm-{}", option));
        Ok(())
    }

    pub fn pending_confirmations(&self) -> Vec<PendingPrompt> {
        self.confirmations.pending()
    }

    /// Get the latest timer snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Ask the dispatcher to stop.
    pub fn shutdown(&self) {
        if self.events_tx.send(Event::Shutdown).is_err() {
            warn!("Dispatcher already stopped");
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }
    }
}
