use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Args;

/// Address the server binds to.
///
/// Parses `host:port`, `:port`, or a bare port. A bare or host-less port
/// binds to localhost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddr {
    pub host: String,
    pub port: u16,
}

impl FromStr for ListenAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) => (host, port),
            None => ("", s),
        };

        let port: u16 = port
            .parse()
            .map_err(|_| format!("invalid listen address: {s}"))?;

        let host = if host.is_empty() {
            "localhost".to_string()
        } else {
            host.to_string()
        };

        Ok(Self { host, port })
    }
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Immutable runtime configuration, built once at startup.
///
/// Every request observes the same values; there is no per-request override.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: ListenAddr,
    pub root: PathBuf,
    pub hidden_files: bool,
    pub listings: bool,
    pub logging: bool,
    pub no_cache: bool,
}

impl Config {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        if !args.root.is_dir() {
            anyhow::bail!("provided directory could not be found");
        }

        let listen = args.listen.unwrap_or(ListenAddr {
            host: args.host,
            port: args.port,
        });

        Ok(Self {
            listen,
            root: args.root,
            hidden_files: args.hidden,
            listings: args.listings,
            logging: !args.quiet,
            no_cache: args.no_cache,
        })
    }
}
