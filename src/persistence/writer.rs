use super::{PersistedWindow, PersistenceAdapter, Persister};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Non-blocking persister backed by a single write worker.
///
/// `submit` replaces the pending snapshot, so a burst of changes collapses into one write and
/// the newest snapshot always wins. The worker writes at most once per `debounce` and never
/// runs two writes at the same time. Dropping the writer flushes the pending snapshot and
/// lets the worker finish.
pub struct PersistWriter {
    tx: watch::Sender<Option<Vec<PersistedWindow>>>,
}

impl PersistWriter {
    /// Returns the writer and the worker future. The worker must run on a tokio runtime, since
    /// each write happens on the blocking pool.
    pub fn new(
        adapter: Arc<PersistenceAdapter>,
        debounce: Duration,
    ) -> (Self, impl Future<Output = ()> + Send + 'static) {
        let (tx, mut rx) = watch::channel::<Option<Vec<PersistedWindow>>>(None);

        let worker = async move {
            while rx.changed().await.is_ok() {
                if !debounce.is_zero() {
                    tokio::time::sleep(debounce).await;
                }

                let pending = rx.borrow_and_update().clone();
                if let Some(projection) = pending {
                    // Slot writes are blocking file I/O; keep them off the async workers
                    let adapter = adapter.clone();
                    let write =
                        tokio::task::spawn_blocking(move || adapter.save_projection(&projection));
                    if let Err(e) = write.await {
                        warn!("Window state write task failed: {}", e);
                    }
                }
            }
            debug!(key = %adapter.key(), "Window state writer stopped");
        };

        (Self { tx }, worker)
    }

    pub fn submit(&self, projection: Vec<PersistedWindow>) {
        self.tx.send_replace(Some(projection));
    }
}

impl Persister for PersistWriter {
    fn persist(&self, projection: Vec<PersistedWindow>) {
        self.submit(projection);
    }
}
