//! Request-path resolution
//!
//! Maps a logical request path onto a concrete file under the served root.
//! Resolution is a pure function of the root, the configuration, and the
//! on-disk state at call time; nothing is cached between requests.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::Config;
use crate::fs::visibility;

/// File a directory must contain to be servable when listings are disabled.
pub const INDEX_FILE: &str = "index.html";

/// A resolution failure, classified for the HTTP status mapping.
#[derive(Debug)]
pub enum ResolveError {
    /// A hidden path was requested while hidden files are disallowed (403).
    Forbidden,
    /// No such file, no `.html` fallback, or a directory lacking an index
    /// while listings are disabled (404).
    NotFound,
    /// Any other filesystem failure (500).
    Io(io::Error),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Forbidden => write!(f, "hidden path access denied"),
            ResolveError::NotFound => write!(f, "not found"),
            ResolveError::Io(e) => write!(f, "filesystem error: {e}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A regular file ready to be served.
///
/// The handle is owned exclusively by the request that resolved it and is
/// released when dropped, on every exit path.
#[derive(Debug)]
pub struct ResolvedFile {
    pub file: File,
    pub len: u64,
    pub modified: Option<SystemTime>,
    pub path: PathBuf,
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub enum Resolved {
    File(ResolvedFile),
    /// A directory to be enumerated; only produced when listings are enabled.
    Directory(PathBuf),
}

/// Resolves a request path under `root`.
///
/// In order: the hidden-path gate (skipped entirely when hidden files are
/// allowed), a root-jailed open, the `.html` fallback for extensionless
/// paths, then the directory-index policy.
pub fn resolve(root: &Path, config: &Config, request_path: &str) -> Result<Resolved, ResolveError> {
    if !config.hidden_files && visibility::path_contains_hidden(request_path) {
        return Err(ResolveError::Forbidden);
    }

    let target = jail(root, request_path);

    let (file, path) = match File::open(&target) {
        Ok(file) => (file, target),
        Err(e) if e.kind() == io::ErrorKind::NotFound && html_fallback_applies(request_path) => {
            let mut fallback = target.into_os_string();
            fallback.push(".html");
            let fallback = PathBuf::from(fallback);
            let file = File::open(&fallback).map_err(classify)?;
            (file, fallback)
        }
        Err(e) => return Err(classify(e)),
    };

    let meta = file.metadata().map_err(ResolveError::Io)?;

    if !meta.is_dir() {
        return Ok(Resolved::File(ResolvedFile {
            len: meta.len(),
            modified: meta.modified().ok(),
            file,
            path,
        }));
    }

    if config.listings {
        return Ok(Resolved::Directory(path));
    }

    // Listings disabled: the directory is only servable through its index
    // document. The directory itself is never sent as a body.
    let index = path.join(INDEX_FILE);
    let file = File::open(&index).map_err(classify)?;
    let meta = file.metadata().map_err(ResolveError::Io)?;

    if meta.is_dir() {
        return Err(ResolveError::NotFound);
    }

    Ok(Resolved::File(ResolvedFile {
        len: meta.len(),
        modified: meta.modified().ok(),
        file,
        path: index,
    }))
}

fn classify(e: io::Error) -> ResolveError {
    match e.kind() {
        io::ErrorKind::NotFound => ResolveError::NotFound,
        _ => ResolveError::Io(e),
    }
}

/// Joins a request path onto the root without ever escaping above it:
/// `.` segments are skipped and `..` pops at most back to the root.
fn jail(root: &Path, request_path: &str) -> PathBuf {
    let mut out = root.to_path_buf();

    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if out.as_path() != root {
                    out.pop();
                }
            }
            _ => out.push(segment),
        }
    }

    out
}

/// Whether the `.html` fallback applies: the final segment must be
/// non-empty (no trailing slash) and carry no file extension.
fn html_fallback_applies(request_path: &str) -> bool {
    request_path
        .rsplit('/')
        .next()
        .is_some_and(|segment| !segment.is_empty() && !segment.contains('.'))
}
