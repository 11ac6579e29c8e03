//! Dynamic Pomodoro - a work/break interval timer with confirmation-gated phases
//!
//! This is the main entry point for the dynamic-pomodoro application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::{info, warn};

use dynamic_pomodoro::{
    api::create_router,
    config::{Cli, TimerConfig},
    events::Command,
    services::{
        check_desktop_tools, DesktopNotifier, LogDisplay, LogNotifier, Notifier, PromptBroker,
        WatchDisplay,
    },
    state::{AppState, Machine},
    tasks::Dispatcher,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dynamic_pomodoro={},tower_http=info", cli.log_level()))
        .init();

    info!("Starting dynamic-pomodoro v{}", env!("CARGO_PKG_VERSION"));

    let timer_config = match TimerConfig::load(&cli.config) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Configuration: phases={:?}min, breaks={:?}min, snooze={}min x{}, sessions={}",
        timer_config.work_phases,
        timer_config.breaks,
        timer_config.snooze_interval,
        timer_config.max_snoozes,
        timer_config.daily_sessions
    );

    // Desktop helpers are optional; without them everything goes to the log
    let desktop = if cli.headless {
        false
    } else if let Err(e) = check_desktop_tools(&cli.player).await {
        warn!("{}, falling back to log output", e);
        false
    } else {
        true
    };

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let machine = Machine::new(Arc::clone(&timer_config));
    let broker = PromptBroker::new(events_tx.clone(), desktop);
    let notifier: Arc<dyn Notifier> = if desktop {
        Arc::new(DesktopNotifier::new(cli.sound_dir.clone(), cli.player.clone()))
    } else {
        Arc::new(LogNotifier)
    };
    let (watch_display, snapshot_rx) = WatchDisplay::new(machine.snapshot());

    // Start the dispatcher that owns the timer
    let dispatcher = Dispatcher::new(
        machine,
        events_tx.clone(),
        events_rx,
        Arc::new(broker.clone()),
        notifier,
    )
    .with_display(LogDisplay::new())
    .with_display(watch_display);
    let dispatcher_task = tokio::spawn(dispatcher.run());

    let state = Arc::new(AppState::new(
        events_tx,
        snapshot_rx,
        broker,
        timer_config.hints(),
        cli.port,
        cli.host.clone(),
    ));

    if cli.autostart {
        if let Err(e) = state.send_command(Command::Start).await {
            warn!("Autostart failed: {}", e);
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = cli.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control API running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start | /pause | /resume | /toggle | /stop");
    info!("  POST /session/:idx     - Jump to a session");
    info!("  POST /phase/:idx       - Jump to a work phase");
    info!("  GET  /confirmations    - Outstanding prompts");
    info!("  POST /confirmations/:token {{\"option\":\"yes\"|\"no\"}}");
    info!("  GET  /status           - Current timer state");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handling failed: {}", e),
            }
        }
    }

    state.shutdown();
    if let Err(e) = dispatcher_task.await {
        warn!("Dispatcher task ended abnormally: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}
