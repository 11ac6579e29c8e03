//! Probes for the desktop helpers used by the notifier and prompts

use tokio::process::Command;
use tracing::info;

/// Check that `program` can be executed, probing it with `--version`.
pub async fn check_command_available(program: &str) -> Result<(), String> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("{} is not available: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} --version failed: {}", program, stderr.trim()));
    }

    info!("{} is available", program);
    Ok(())
}

/// Check the tools needed for desktop banners, prompts and tones.
pub async fn check_desktop_tools(player: &str) -> Result<(), String> {
    check_command_available("notify-send").await?;
    check_command_available(player).await
}
