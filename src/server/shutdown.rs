use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// Counts in-flight connections so shutdown can drain them.
///
/// Each accepted connection holds a [`ConnectionGuard`]; `wait_idle`
/// resolves once every guard has been dropped.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    count: AtomicUsize,
    idle: Notify,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self) -> ConnectionGuard {
        self.inner.count.fetch_add(1, Ordering::AcqRel);
        ConnectionGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn active(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();

            if self.inner.count.load(Ordering::Acquire) == 0 {
                return;
            }

            notified.await;
        }
    }
}

pub struct ConnectionGuard {
    inner: Arc<Inner>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.inner.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}
