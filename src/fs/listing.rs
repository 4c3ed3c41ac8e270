//! Directory enumeration and the HTML index page.

use std::io;
use std::path::Path;

use crate::config::Config;
use crate::fs::visibility;

/// A single directory entry produced during listing; transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Enumerates a directory, filtering out hidden entries when hidden files
/// are disallowed.
///
/// Entries keep the underlying enumeration order; callers needing sorted
/// output must sort explicitly. Every call re-reads from disk.
pub fn list_dir(path: &Path, config: &Config) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(path)? {
        let entry = entry?;

        // Non-UTF-8 names cannot appear in a request path, so a listing
        // link for them would always dangle.
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };

        if !config.hidden_files && visibility::is_hidden(&name) {
            continue;
        }

        let is_dir = entry.file_type()?.is_dir();
        entries.push(DirEntry { name, is_dir });
    }

    Ok(entries)
}

/// Renders the listing page for a directory.
pub fn render_index(request_path: &str, entries: &[DirEntry]) -> String {
    let title = escape(request_path);
    let mut page = String::new();

    page.push_str("<!doctype html>\n<html>\n<head><meta charset=\"utf-8\">");
    page.push_str(&format!("<title>Index of {title}</title></head>\n"));
    page.push_str(&format!("<body>\n<h1>Index of {title}</h1>\n<ul>\n"));

    let base = if request_path.ends_with('/') {
        request_path.to_string()
    } else {
        format!("{request_path}/")
    };
    let base: String = base
        .split('/')
        .map(percent_encode)
        .collect::<Vec<_>>()
        .join("/");

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let name = escape(&entry.name);
        let href = escape(&format!("{base}{}{suffix}", percent_encode(&entry.name)));
        page.push_str(&format!("<li><a href=\"{href}\">{name}{suffix}</a></li>\n"));
    }

    page.push_str("</ul>\n</body>\n</html>\n");
    page
}

/// Percent-encodes everything outside the RFC 3986 unreserved set, so
/// names containing `?`, `#`, `%`, or spaces stay valid link targets.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }

    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
