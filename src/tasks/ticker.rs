//! One-second ticker feeding the dispatcher queue

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::events::Event;

/// Sends `Event::Tick(generation)` once per period while running.
///
/// Each start gets a new generation, so ticks still queued from an earlier
/// run can be recognised and dropped.
#[derive(Debug)]
pub struct Ticker {
    events: mpsc::UnboundedSender<Event>,
    period: Duration,
    generation: u64,
    epoch: Option<u64>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(events: mpsc::UnboundedSender<Event>, period: Duration) -> Self {
        Self {
            events,
            period,
            generation: 0,
            epoch: None,
            handle: None,
        }
    }

    /// Start ticking for the countdown `epoch`, replacing any running ticker.
    pub fn start(&mut self, epoch: u64) {
        self.stop();
        self.generation += 1;
        let generation = self.generation;
        let events = self.events.clone();
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events.send(Event::Tick(generation)).is_err() {
                    break;
                }
            }
        }));
        self.epoch = Some(epoch);
        debug!(generation, epoch, "Ticker started");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(generation = self.generation, "Ticker stopped");
        }
        self.epoch = None;
    }

    /// Bring the ticker in line with the countdown that should be running.
    pub fn sync(&mut self, wanted: Option<u64>) {
        match wanted {
            Some(epoch) if self.epoch != Some(epoch) => self.start(epoch),
            None if self.epoch.is_some() => self.stop(),
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether a tick of `generation` comes from the ticker running right now.
    pub fn is_current(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
