//! Display sinks that receive a snapshot after every state change

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{Mode, Snapshot};

/// Something that renders timer snapshots. Rendering is best-effort.
pub trait DisplaySink: Send {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;
}

/// Writes snapshots to the log: mode changes at info, every frame at debug.
#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<(Mode, bool, usize, usize)>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for LogDisplay {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let key = (snapshot.mode, snapshot.paused, snapshot.session, snapshot.work_phase);
        if self.last != Some(key) {
            info!(
                "[{}] session {}/{} phase {}/{} - {} left, {} worked",
                snapshot.label,
                snapshot.session + 1,
                snapshot.daily_sessions,
                snapshot.work_phase + 1,
                snapshot.phase_count,
                snapshot.phase_remaining,
                snapshot.total_work
            );
            self.last = Some(key);
        } else {
            debug!("[{}] {} left", snapshot.label, snapshot.phase_remaining);
        }
        Ok(())
    }
}

/// Publishes the latest snapshot on a watch channel for readers like `/status`.
#[derive(Debug)]
pub struct WatchDisplay {
    tx: watch::Sender<Snapshot>,
}

impl WatchDisplay {
    pub fn new(initial: Snapshot) -> (Self, watch::Receiver<Snapshot>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, rx)
    }
}

impl DisplaySink for WatchDisplay {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.tx.send_replace(snapshot.clone());
        Ok(())
    }
}
