/**
 * Bio ID Fingerprint Bridge Server
 * Hosts the `bioid_fingerprint` channel for the application layer
 *
 * Handles:
 * - Method calls (discovery, connect, open/close, detect, capture, info)
 * - USB hotplug events forwarded by the platform
 */

use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use bioid_fingerprint_bridge::{server, BridgeConfig, FingerprintBridge, SimulatedScanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = BridgeConfig::from_env();
    info!("Starting Bio ID fingerprint bridge ({:?})", config);

    let mut bridge = FingerprintBridge::new(SimulatedScanner::new(config.connect_delay));
    bridge.attach()?;
    let bridge = Arc::new(Mutex::new(bridge));

    let app = server::router(Arc::clone(&bridge), &config.channel);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        "Listening on {} for channel {}",
        config.bind_addr, config.channel
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the scanner before the process exits.
    bridge.lock().await.detach().await?;
    info!("Bio ID fingerprint bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
