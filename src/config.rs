//! Configuration: CLI arguments and the timer configuration document

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "dynamic-pomodoro")]
#[command(about = "A work/break interval timer with confirmation-gated phases and snoozes")]
#[command(version)]
pub struct Cli {
    /// Path to the timer configuration file
    #[arg(short, long, default_value = "pomodoro_config.json")]
    pub config: PathBuf,

    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Log sounds and banners instead of using desktop tools
    #[arg(long)]
    pub headless: bool,

    /// Directory holding pling.wav and gong.wav
    #[arg(long, default_value = ".")]
    pub sound_dir: PathBuf,

    /// Command used to play tones
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Start the first work phase immediately
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

fn default_focus_timeout() -> u64 {
    10
}

fn default_snooze_timeout() -> u64 {
    15
}

fn default_autoconfirm_hint() -> u64 {
    30
}

fn default_warning_hint() -> u64 {
    5
}

/// Timer parameters, loaded once at startup and never modified afterwards.
///
/// Durations are given in minutes and may be fractional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_phases: Vec<f64>,
    pub breaks: Vec<f64>,
    pub snooze_interval: f64,
    pub max_snoozes: u32,
    pub daily_sessions: usize,
    #[serde(default = "default_focus_timeout")]
    pub focus_check_timeout_seconds: u64,
    #[serde(default = "default_snooze_timeout")]
    pub snooze_prompt_timeout_seconds: u64,
    #[serde(default = "default_autoconfirm_hint")]
    pub popup_autoconfirm_seconds: u64,
    #[serde(default = "default_warning_hint")]
    pub popup_warning_seconds: u64,
}

/// Display-only timing hints, passed through to clients as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayHints {
    pub popup_autoconfirm_seconds: u64,
    pub popup_warning_seconds: u64,
}

impl TimerConfig {
    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration document held in memory.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_phases.is_empty() {
            return Err(ConfigError::Invalid("work_phases must not be empty".into()));
        }
        if self.breaks.is_empty() {
            return Err(ConfigError::Invalid("breaks must not be empty".into()));
        }
        for (idx, minutes) in self.work_phases.iter().enumerate() {
            check_minutes(&format!("work_phases[{idx}]"), *minutes)?;
        }
        for (idx, minutes) in self.breaks.iter().enumerate() {
            check_minutes(&format!("breaks[{idx}]"), *minutes)?;
        }
        check_minutes("snooze_interval", self.snooze_interval)?;
        if self.daily_sessions == 0 {
            return Err(ConfigError::Invalid("daily_sessions must be at least 1".into()));
        }
        if self.focus_check_timeout_seconds == 0 || self.snooze_prompt_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("confirmation timeouts must be at least 1 second".into()));
        }
        Ok(())
    }

    pub fn phase_count(&self) -> usize {
        self.work_phases.len()
    }

    /// Length of work phase `idx` in seconds.
    pub fn phase_secs(&self, idx: usize) -> u64 {
        minutes_to_secs(self.work_phases[idx])
    }

    /// Length of the break that follows `session`, in seconds. Breaks cycle.
    pub fn break_secs(&self, session: usize) -> u64 {
        minutes_to_secs(self.breaks[session % self.breaks.len()])
    }

    pub fn snooze_secs(&self) -> u64 {
        minutes_to_secs(self.snooze_interval)
    }

    pub fn focus_check_timeout(&self) -> Duration {
        Duration::from_secs(self.focus_check_timeout_seconds)
    }

    pub fn snooze_prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.snooze_prompt_timeout_seconds)
    }

    pub fn hints(&self) -> DisplayHints {
        DisplayHints {
            popup_autoconfirm_seconds: self.popup_autoconfirm_seconds,
            popup_warning_seconds: self.popup_warning_seconds,
        }
    }
}

fn minutes_to_secs(minutes: f64) -> u64 {
    (minutes * 60.0) as u64
}

fn check_minutes(name: &str, minutes: f64) -> Result<(), ConfigError> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(ConfigError::Invalid(format!("{name} must be a positive number of minutes")));
    }
    if minutes_to_secs(minutes) == 0 {
        return Err(ConfigError::Invalid(format!("{name} is shorter than one second")));
    }
    Ok(())
}
