//! Tones and informational banners

use std::path::PathBuf;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::events::{Banner, Tone};

pub const APP_NAME: &str = "Dynamic Pomodoro Timer";

/// Fire-and-forget audio and banner output.
pub trait Notifier: Send + Sync {
    fn play_tone(&self, tone: Tone) -> anyhow::Result<()>;
    fn show_banner(&self, banner: &Banner) -> anyhow::Result<()>;
}

/// Plays tones through an audio player and shows banners with `notify-send`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    sound_dir: PathBuf,
    player: String,
}

impl DesktopNotifier {
    pub fn new(sound_dir: PathBuf, player: String) -> Self {
        Self { sound_dir, player }
    }

    fn tone_path(&self, tone: Tone) -> PathBuf {
        let file = match tone {
            Tone::Chime => "pling.wav",
            Tone::Gong => "gong.wav",
        };
        self.sound_dir.join(file)
    }
}

impl Notifier for DesktopNotifier {
    fn play_tone(&self, tone: Tone) -> anyhow::Result<()> {
        let path = self.tone_path(tone);
        debug!("Playing {:?} from {}", tone, path.display());
        let child = Command::new(&self.player)
            .arg(&path)
            .spawn()
            .with_context(|| format!("failed to run {}", self.player))?;
        reap(child, format!("{} {}", self.player, path.display()));
        Ok(())
    }

    fn show_banner(&self, banner: &Banner) -> anyhow::Result<()> {
        debug!("Showing banner: {} - {}", banner.title, banner.body);
        let child = Command::new("notify-send")
            .arg("--app-name")
            .arg(APP_NAME)
            .arg("--expire-time")
            .arg(banner.timeout.as_millis().to_string())
            .arg(&banner.title)
            .arg(&banner.body)
            .spawn()
            .context("failed to run notify-send")?;
        reap(child, "notify-send".to_string());
        Ok(())
    }
}

/// Wait for a spawned helper in the background and log a failing exit.
fn reap(mut child: tokio::process::Child, what: String) {
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("{} exited with {}", what, status),
            Err(e) => warn!("Failed to wait for {}: {}", what, e),
        }
    });
}

/// Writes tones and banners to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn play_tone(&self, tone: Tone) -> anyhow::Result<()> {
        info!("Tone: {:?}", tone);
        Ok(())
    }

    fn show_banner(&self, banner: &Banner) -> anyhow::Result<()> {
        info!("{}: {}", banner.title, banner.body);
        Ok(())
    }
}
