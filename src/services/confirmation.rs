//! Confirmation prompts with a timeout-driven default answer
//!
//! Each outstanding prompt lives in the broker's map until something resolves
//! it. An explicit answer (from the HTTP API or a desktop notification action)
//! and the timeout race for the same entry; the first one to remove it wins
//! and is forwarded to the dispatcher as an [`Event::Answer`]. Anything that
//! arrives later finds no entry and is refused.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{
    process::Command,
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{sleep, Instant},
};
use tracing::{debug, info, warn};

use super::notifier::APP_NAME;
use crate::{
    error::AnswerError,
    events::{
        ConfirmOption, ConfirmationAnswer, ConfirmationRequest, ConfirmationToken, Event,
        PromptKind, Resolution,
    },
};

/// Delivers exactly one answer per issued confirmation request.
pub trait ConfirmationService: Send + Sync {
    fn issue(&self, request: ConfirmationRequest);
    /// Forget a token without answering it.
    fn retire(&self, token: ConfirmationToken);
    /// Freeze the token's timeout.
    fn hold(&self, token: ConfirmationToken);
    /// Let the token's timeout continue from where it was held.
    fn release(&self, token: ConfirmationToken);
}

/// An outstanding prompt as shown to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct PendingPrompt {
    pub token: ConfirmationToken,
    pub kind: PromptKind,
    pub title: String,
    pub body: String,
    pub options: Vec<ConfirmOption>,
    pub default: ConfirmOption,
    pub remaining_seconds: u64,
    pub held: bool,
    pub issued_at: DateTime<Utc>,
}

struct Outstanding {
    request: ConfirmationRequest,
    issued_at: DateTime<Utc>,
    /// Timeout left as of `running_since`, or as of the hold.
    budget: Duration,
    running_since: Option<Instant>,
    hold_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Outstanding {
    fn remaining(&self) -> Duration {
        match self.running_since {
            Some(since) => self.budget.saturating_sub(since.elapsed()),
            None => self.budget,
        }
    }

    fn view(&self) -> PendingPrompt {
        PendingPrompt {
            token: self.request.token,
            kind: self.request.kind,
            title: self.request.title.clone(),
            body: self.request.body.clone(),
            options: self.request.options.clone(),
            default: self.request.default,
            remaining_seconds: self.remaining().as_secs(),
            held: self.running_since.is_none(),
            issued_at: self.issued_at,
        }
    }

    fn cancel(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

struct BrokerInner {
    events: mpsc::UnboundedSender<Event>,
    pending: Mutex<HashMap<ConfirmationToken, Outstanding>>,
    desktop: bool,
}

impl BrokerInner {
    fn lock(&self) -> MutexGuard<'_, HashMap<ConfirmationToken, Outstanding>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(
        &self,
        token: ConfirmationToken,
        option: ConfirmOption,
        resolution: Resolution,
    ) -> Result<(), AnswerError> {
        let entry = {
            let mut pending = self.lock();
            let offered = match pending.get(&token) {
                Some(entry) => entry.request.offers(option),
                None => return Err(AnswerError::UnknownToken(token.0)),
            };
            if !offered {
                return Err(AnswerError::InvalidOption {
                    token: token.0,
                    option: option.to_string(),
                });
            }
            pending.remove(&token)
        };
        if let Some(entry) = entry {
            entry.cancel();
        }

        debug!(%token, %option, ?resolution, "Forwarding confirmation answer");
        self.events
            .send(Event::Answer(ConfirmationAnswer { token, option, resolution }))
            .map_err(|_| AnswerError::DispatcherClosed)
    }
}

/// In-process confirmation service. Cheap to clone; clones share prompts.
#[derive(Clone)]
pub struct PromptBroker {
    inner: Arc<BrokerInner>,
}

impl PromptBroker {
    /// `desktop` additionally mirrors every prompt as a `notify-send` action prompt.
    pub fn new(events: mpsc::UnboundedSender<Event>, desktop: bool) -> Self {
        Self {
            inner: Arc::new(BrokerInner {
                events,
                pending: Mutex::new(HashMap::new()),
                desktop,
            }),
        }
    }

    /// Submit an explicit answer on behalf of the user.
    pub fn answer(&self, token: ConfirmationToken, option: ConfirmOption) -> Result<(), AnswerError> {
        self.inner.resolve(token, option, Resolution::Explicit)
    }

    pub fn pending(&self) -> Vec<PendingPrompt> {
        let mut prompts: Vec<_> = self.inner.lock().values().map(Outstanding::view).collect();
        prompts.sort_by_key(|p| p.token);
        prompts
    }
}

impl ConfirmationService for PromptBroker {
    fn issue(&self, request: ConfirmationRequest) {
        info!(token = %request.token, title = %request.title, "Issuing confirmation");
        let (hold_tx, hold_rx) = watch::channel(false);
        let token = request.token;

        let mut pending = self.inner.lock();
        let mut tasks = vec![tokio::spawn(expire(
            Arc::clone(&self.inner),
            token,
            request.default,
            request.timeout,
            hold_rx,
        ))];
        if self.inner.desktop {
            tasks.push(tokio::spawn(desktop_prompt(Arc::clone(&self.inner), request.clone())));
        }
        let outstanding = Outstanding {
            budget: request.timeout,
            request,
            issued_at: Utc::now(),
            running_since: Some(Instant::now()),
            hold_tx,
            tasks,
        };
        if let Some(previous) = pending.insert(token, outstanding) {
            warn!(%token, "Confirmation token issued twice, dropping the older prompt");
            previous.cancel();
        }
    }

    fn retire(&self, token: ConfirmationToken) {
        if let Some(entry) = self.inner.lock().remove(&token) {
            debug!(%token, "Confirmation retired");
            entry.cancel();
        }
    }

    fn hold(&self, token: ConfirmationToken) {
        if let Some(entry) = self.inner.lock().get_mut(&token) {
            if let Some(since) = entry.running_since.take() {
                entry.budget = entry.budget.saturating_sub(since.elapsed());
                entry.hold_tx.send_replace(true);
                debug!(%token, left = ?entry.budget, "Confirmation timeout held");
            }
        }
    }

    fn release(&self, token: ConfirmationToken) {
        if let Some(entry) = self.inner.lock().get_mut(&token) {
            if entry.running_since.is_none() {
                entry.running_since = Some(Instant::now());
                entry.hold_tx.send_replace(false);
                debug!(%token, left = ?entry.budget, "Confirmation timeout released");
            }
        }
    }
}

/// Count the timeout down, pausing while held, then apply the default answer.
async fn expire(
    inner: Arc<BrokerInner>,
    token: ConfirmationToken,
    default: ConfirmOption,
    timeout: Duration,
    mut hold: watch::Receiver<bool>,
) {
    let mut remaining = timeout;
    loop {
        if *hold.borrow_and_update() {
            if hold.changed().await.is_err() {
                return;
            }
            continue;
        }
        let started = Instant::now();
        tokio::select! {
            _ = sleep(remaining) => break,
            changed = hold.changed() => {
                if changed.is_err() {
                    return;
                }
                remaining = remaining.saturating_sub(started.elapsed());
            }
        }
    }

    info!(%token, option = %default, "Confirmation timed out, applying default");
    if let Err(e) = inner.resolve(token, default, Resolution::Timeout) {
        debug!(%token, "Timeout lost the race: {}", e);
    }
}

/// Show the prompt as a desktop notification with one action per option.
async fn desktop_prompt(inner: Arc<BrokerInner>, request: ConfirmationRequest) {
    let mut command = Command::new("notify-send");
    command
        .arg("--app-name")
        .arg(APP_NAME)
        .arg("--expire-time")
        .arg(request.timeout.as_millis().to_string())
        .arg("--wait");
    for option in &request.options {
        command.arg(format!("--action={}={}", option.as_str(), option.label()));
    }
    command.arg(&request.title).arg(&request.body).kill_on_drop(true);

    let output = match command.output().await {
        Ok(output) => output,
        Err(e) => {
            warn!(token = %request.token, "Failed to show desktop prompt: {}", e);
            return;
        }
    };
    if !output.status.success() {
        warn!(
            token = %request.token,
            "notify-send failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return;
    }

    let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if choice.is_empty() {
        debug!(token = %request.token, "Desktop prompt closed without a choice");
        return;
    }
    match choice.parse::<ConfirmOption>() {
        Ok(option) => {
            if let Err(e) = inner.resolve(request.token, option, Resolution::Explicit) {
                debug!(token = %request.token, "Desktop answer ignored: {}", e);
            }
        }
        Err(e) => warn!(token = %request.token, "Unexpected desktop prompt output: {}", e),
    }
}
