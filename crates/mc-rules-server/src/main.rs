mod config;
mod host;

use std::time::Duration;

use config::RulesConfig;
use host::RulesHost;
use tokio::io::AsyncBufReadExt;
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "rules.toml".into());
    let config = match RulesConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("MC-Rules host v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Tick: {}ms, destroy modifier: {}, smelt step: {}",
        config.server.tick_millis,
        config.gameplay.destroy_modifier,
        config.smelting.progress_per_tick
    );

    let mut host = RulesHost::new(&config);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Handle Ctrl+C
    let shutdown_tx_ctrlc = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx_ctrlc.send(true);
    });

    // Console REPL: read lines from stdin
    let (console_tx, mut console_rx) = tokio::sync::mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let tick_period = Duration::from_millis(config.server.tick_millis.max(1));
    let mut tick_interval = tokio::time::interval(tick_period);
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                host.game_tick();
                for packet in host.take_outbox() {
                    debug!("Outbound packet 0x{:02X} ({} bytes)", packet[0], packet.len());
                }
            }
            Some(line) = console_rx.recv() => {
                if line == "quit" {
                    let _ = shutdown_tx.send(true);
                    continue;
                }
                let reply = host.handle_console_command(&line);
                if !reply.is_empty() {
                    println!("{}", reply.trim_end());
                }
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("Host shut down after {} ticks.", host.current_tick());
}
