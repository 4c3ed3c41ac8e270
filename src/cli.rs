use std::path::PathBuf;

use clap::Parser;

use crate::config::ListenAddr;

/// Serve a directory of static files for local preview.
#[derive(Parser, Debug)]
#[command(name = "quickserve", version)]
pub struct Args {
    /// Host to listen on
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Listen address as host:port or a bare port (overrides --host/--port)
    #[arg(short, long)]
    pub listen: Option<ListenAddr>,

    /// Serve hidden (dot-prefixed) files and directories
    #[arg(long)]
    pub hidden: bool,

    /// Enable directory listings for directories without an index.html
    #[arg(short = 'd', long)]
    pub listings: bool,

    /// Disable request logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Send "Cache-Control: no-cache" on every response
    #[arg(long)]
    pub no_cache: bool,

    /// Directory to serve
    #[arg(default_value = ".")]
    pub root: PathBuf,
}
