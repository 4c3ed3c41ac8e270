//! quickserve - Local static-file preview server
//!
//! Core library for path resolution and HTTP serving.

pub mod cli;
pub mod config;
pub mod fs;
pub mod http;
pub mod server;
