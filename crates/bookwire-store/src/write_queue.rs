//! Background task that serializes store writes.
//!
//! Naive write-through persistence has a race: two near-simultaneous
//! mutations issue two whole-file writes, and the one that completes last
//! wins even if it snapshots the older state. The queue removes that race
//! by funneling every snapshot through one unbounded channel consumed by a
//! single writer task. Callers enqueue while still holding the registry
//! write lock, so queue order always matches mutation order and the file
//! converges to the latest mutation.

use bookwire_types::Book;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::file_store::FileStore;

/// Sender half of the serialized write queue.
///
/// Cheap to clone. Enqueueing never blocks and never fails the mutation
/// that triggered it; if the writer task is gone the snapshot is dropped
/// with a warning, matching the fail-soft persistence contract.
#[derive(Debug, Clone)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<Vec<Book>>,
}

impl WriteQueue {
    /// Spawn the writer task and return the queue handle alongside it.
    ///
    /// The task runs until every queue handle is dropped, then drains any
    /// remaining snapshots and exits. The returned [`JoinHandle`] lets the
    /// caller await that drain during shutdown.
    pub fn spawn(store: FileStore) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Book>>();

        let handle = tokio::spawn(async move {
            while let Some(books) = rx.recv().await {
                store.save(&books).await;
            }
            debug!("write queue drained, writer task exiting");
        });

        (Self { tx }, handle)
    }

    /// Enqueue a full-collection snapshot for persistence.
    ///
    /// Call this while holding the registry write lock so snapshots are
    /// queued in mutation order.
    pub fn enqueue(&self, books: Vec<Book>) {
        if self.tx.send(books).is_err() {
            warn!("write queue closed, dropping snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use bookwire_types::BookId;

    fn book(id: u64, title: &str) -> Book {
        Book {
            id: BookId(id),
            title: title.to_owned(),
            author: String::from("author"),
            return_date_time: None,
            reader_name: None,
            favorites: Vec::new(),
        }
    }

    #[tokio::test]
    async fn snapshots_are_written_in_enqueue_order() {
        let path = std::env::temp_dir().join(format!("bookwire-queue-{}.json", uuid::Uuid::new_v4()));
        let store = FileStore::new(path.clone());
        let (queue, handle) = WriteQueue::spawn(store.clone());

        // Enqueue three snapshots back to back; the last one must win.
        queue.enqueue(vec![book(1, "Dune")]);
        queue.enqueue(vec![book(1, "Dune"), book(2, "Emma")]);
        queue.enqueue(vec![book(2, "Emma")]);

        drop(queue);
        handle.await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.first().unwrap().title, "Emma");
        tokio::fs::remove_file(path).await.unwrap();
    }
}
