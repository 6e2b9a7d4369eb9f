//! Teardown-linked subscription scope
//!
//! Long-lived watcher loops register their join handles against a
//! scope; closing (or dropping) the scope aborts them all. In-flight
//! HTTP calls are not cancelled at the transport, only delivery into
//! the disposed scope stops.

use std::future::Future;
use std::sync::Mutex;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Default)]
pub struct SubscriptionScope {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl SubscriptionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a watcher loop owned by this scope
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        if let Ok(mut handles) = self.handles.lock() {
            handles.push(handle);
        }
    }

    /// Abort every registered watcher
    pub fn close(&self) {
        if let Ok(mut handles) = self.handles.lock() {
            debug!(count = handles.len(), "closing subscription scope");
            for handle in handles.drain(..) {
                handle.abort();
            }
        }
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_close_aborts_watchers() {
        let fired = Arc::new(AtomicBool::new(false));
        let scope = SubscriptionScope::new();

        let flag = Arc::clone(&fired);
        scope.spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            flag.store(true, Ordering::SeqCst);
        });

        scope.close();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_aborts_watchers() {
        let fired = Arc::new(AtomicBool::new(false));
        {
            let scope = SubscriptionScope::new();
            let flag = Arc::clone(&fired);
            scope.spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                flag.store(true, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_watcher_runs_until_closed() {
        let fired = Arc::new(AtomicBool::new(false));
        let scope = SubscriptionScope::new();

        let flag = Arc::clone(&fired);
        scope.spawn(async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(fired.load(Ordering::SeqCst));
        scope.close();
    }
}
