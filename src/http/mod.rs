//! HTTP protocol implementation.
//!
//! A minimal HTTP/1.1 server layer with keep-alive support:
//!
//! - **`connection`**: the per-connection request-response state machine
//! - **`parser`**: parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes and streams HTTP responses to the client
//! - **`mime`**: content-type detection based on file extensions
//! - **`access_log`**: the colorized per-request log line

pub mod access_log;
pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
