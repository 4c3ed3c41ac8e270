//! Listener lifecycle
//!
//! Binding, the accept loop, and the graceful drain on shutdown.

pub mod listener;
pub mod net;
pub mod shutdown;

pub use shutdown::ConnectionTracker;
