//! Filesystem resolution layer
//!
//! This module decides, for an incoming request path, which file under the
//! served root (if any) is handed to the HTTP layer:
//!
//! - **`visibility`**: the dot-prefix hidden-name rule
//! - **`resolve`**: request path → file or directory, with `.html` fallback
//!   and the directory-index policy
//! - **`listing`**: directory enumeration and the HTML index page

pub mod listing;
pub mod resolve;
pub mod visibility;

pub use listing::{DirEntry, list_dir};
pub use resolve::{Resolved, ResolveError, resolve};
