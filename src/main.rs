use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;

use quickserve::cli::Args;
use quickserve::config::Config;
use quickserve::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();
    let cfg = Arc::new(Config::from_args(args)?);

    println!("\nServer started at \x1b[4m{}\x1b[0m\n", browse_url(&cfg));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(server::listener::run(Arc::clone(&cfg), shutdown_rx));

    tokio::select! {
        res = &mut server => {
            // Listener stopped on its own (bind failure, accept error)
            res??;
        }

        _ = tokio::signal::ctrl_c() => {
            println!("\n\nShutting down...\n");
            let _ = shutdown_tx.send(true);
            server.await??;
        }
    }

    Ok(())
}

/// URL printed in the startup banner. When binding the wildcard address, a
/// discovered non-loopback IPv4 address is substituted so the link works
/// from other devices.
fn browse_url(cfg: &Config) -> String {
    let host = if cfg.listen.host == "0.0.0.0" {
        server::net::local_ipv4()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| cfg.listen.host.clone())
    } else {
        cfg.listen.host.clone()
    };

    format!("http://{}:{}", host, cfg.listen.port)
}
