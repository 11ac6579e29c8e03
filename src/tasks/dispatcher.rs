//! The dispatcher task: sole owner of the progression machine

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::ticker::Ticker;
use crate::{
    events::{Effect, Event},
    services::{ConfirmationService, DisplaySink, Notifier},
    state::Machine,
};

/// Serialises ticks, commands and confirmation answers onto one machine.
pub struct Dispatcher {
    machine: Machine,
    events: mpsc::UnboundedReceiver<Event>,
    ticker: Ticker,
    confirmations: Arc<dyn ConfirmationService>,
    notifier: Arc<dyn Notifier>,
    displays: Vec<Box<dyn DisplaySink>>,
}

impl Dispatcher {
    /// `events_tx` must feed `events_rx`; the ticker sends through it.
    pub fn new(
        machine: Machine,
        events_tx: mpsc::UnboundedSender<Event>,
        events_rx: mpsc::UnboundedReceiver<Event>,
        confirmations: Arc<dyn ConfirmationService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            machine,
            events: events_rx,
            ticker: Ticker::new(events_tx, Duration::from_secs(1)),
            confirmations,
            notifier,
            displays: Vec::new(),
        }
    }

    pub fn with_display(mut self, display: impl DisplaySink + 'static) -> Self {
        self.displays.push(Box::new(display));
        self
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Process events until `Event::Shutdown` arrives or every sender is gone.
    pub async fn run(mut self) {
        info!("Starting dispatcher");
        self.render();

        while let Some(event) = self.events.recv().await {
            if matches!(event, Event::Shutdown) {
                info!("Dispatcher shutting down");
                break;
            }
            self.handle(event);
        }

        self.ticker.stop();
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Tick(generation) => {
                if !self.ticker.is_current(generation) {
                    debug!(generation, "Dropping stale tick");
                    return;
                }
                let effects = self.machine.tick();
                self.settle(effects);
            }
            Event::Command { command, reply } => {
                let outcome = match self.machine.apply(command) {
                    Ok(effects) => {
                        debug!(command = command.name(), "Command applied");
                        self.settle(effects);
                        Ok(self.machine.snapshot())
                    }
                    Err(e) => {
                        warn!(command = command.name(), "Command rejected: {}", e);
                        Err(e)
                    }
                };
                if let Some(reply) = reply {
                    if reply.send(outcome).is_err() {
                        debug!(command = command.name(), "Caller stopped waiting for the reply");
                    }
                }
            }
            Event::Answer(answer) => {
                let effects = self.machine.answer(answer);
                self.settle(effects);
            }
            Event::Shutdown => {}
        }
    }

    /// Carry out effects, line the ticker up with the machine, then render.
    fn settle(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.perform(effect);
        }
        self.ticker.sync(self.machine.ticking());
        self.render();
    }

    fn perform(&self, effect: Effect) {
        match effect {
            Effect::PlayTone(tone) => {
                if let Err(e) = self.notifier.play_tone(tone) {
                    warn!("Failed to play {:?}: {:#}", tone, e);
                }
            }
            Effect::Banner(banner) => {
                if let Err(e) = self.notifier.show_banner(&banner) {
                    warn!("Failed to show banner '{}': {:#}", banner.title, e);
                }
            }
            Effect::Confirm(request) => self.confirmations.issue(request),
            Effect::Retire(token) => self.confirmations.retire(token),
            Effect::HoldConfirmation(token) => self.confirmations.hold(token),
            Effect::ReleaseConfirmation(token) => self.confirmations.release(token),
        }
    }

    fn render(&mut self) {
        let snapshot = self.machine.snapshot();
        for display in &mut self.displays {
            if let Err(e) = display.render(&snapshot) {
                warn!("Display update failed: {:#}", e);
            }
        }
    }
}
