use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::shutdown::ConnectionTracker;

/// How long shutdown waits for in-flight requests before giving up.
const DRAIN_GRACE: Duration = Duration::from_secs(10);

/// Runs the accept loop until the shutdown signal fires, then drains
/// in-flight connections within a bounded grace period.
pub async fn run(cfg: Arc<Config>, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.listen.to_string()).await?;
    info!("Listening on {}", cfg.listen);

    let tracker = ConnectionTracker::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (socket, peer) = accepted?;
                tracing::debug!("Accepted connection from {}", peer);

                let config = Arc::clone(&cfg);
                let guard = tracker.track();

                tokio::spawn(async move {
                    let _guard = guard;
                    let mut conn = Connection::new(socket, config);
                    if let Err(e) = conn.run().await {
                        tracing::error!("Connection error from {}: {}", peer, e);
                    }
                });
            }

            _ = shutdown.changed() => {
                break;
            }
        }
    }

    // Stop accepting, let in-flight requests finish.
    drop(listener);

    if timeout(DRAIN_GRACE, tracker.wait_idle()).await.is_err() {
        warn!(
            active = tracker.active(),
            "Drain grace period elapsed, closing remaining connections"
        );
    }

    Ok(())
}
