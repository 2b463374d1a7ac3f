//! Shared, observable repository state.
//!
//! [`SharedState`] is the single mutable cell behind every streamed
//! repository value. It has one producer (the owning repository) and any
//! number of observers. Observers hold [`watch::Receiver`]s: they see only the
//! latest value, can never mutate it, and never slow the producer down.
//!
//! [`CachedSlot`] pairs a [`SharedState`] with a [`LocalStore`] so every
//! update is persisted before it is published.

use std::sync::Arc;

use model::{Failure, LocalStore, Outcome, OutcomeStream, STORAGE_FAILURE_CODE};
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Latest-value broadcast cell plus the most recent refresh failure.
pub struct SharedState<T> {
    value: Arc<watch::Sender<Option<T>>>,
    failure: Arc<watch::Sender<Option<Failure>>>,
}

impl<T> Clone for SharedState<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            failure: Arc::clone(&self.failure),
        }
    }
}

impl<T> SharedState<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: Option<T>) -> Self {
        let (value, _) = watch::channel(initial);
        let (failure, _) = watch::channel(None);
        Self {
            value: Arc::new(value),
            failure: Arc::new(failure),
        }
    }

    /// Returns a copy of the current value.
    pub fn current(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.value.subscribe()
    }

    /// Most recent refresh failure, kept until another failure replaces it.
    pub fn last_failure(&self) -> Option<Failure> {
        self.failure.borrow().clone()
    }

    pub fn subscribe_failures(&self) -> watch::Receiver<Option<Failure>> {
        self.failure.subscribe()
    }

    /// Publishes a new value to every observer.
    pub(crate) fn publish(&self, value: T) {
        self.value.send_replace(Some(value));
    }

    pub(crate) fn clear(&self) {
        self.value.send_replace(None);
    }

    pub(crate) fn record_failure(&self, failure: Failure) {
        self.failure.send_replace(Some(failure));
    }

    /// Observes the cell as outcomes: the current value (if any) right away,
    /// then each published value as `Success` and each newly recorded failure
    /// as `Failure`.
    ///
    /// Failures recorded before the call are not replayed.
    pub fn outcomes(&self) -> OutcomeStream<T> {
        let values = WatchStream::new(self.value.subscribe())
            .filter_map(|value: Option<T>| value.map(Outcome::Success));
        let failures = WatchStream::from_changes(self.failure.subscribe())
            .filter_map(|failure: Option<Failure>| failure.map(Outcome::from));
        Box::pin(values.merge(failures))
    }
}

// ---------------------------------------------------------------------------
// CachedSlot
// ---------------------------------------------------------------------------

/// A [`SharedState`] backed by a [`LocalStore`].
///
/// Writes are serialised and applied in two steps: persist, then publish. A
/// write that is cancelled or fails while persisting is never published.
pub struct CachedSlot<T>
where
    T: Send + Sync + 'static,
{
    state: SharedState<T>,
    store: Arc<dyn LocalStore<T>>,
    writes: Arc<Mutex<()>>,
}

impl<T> Clone for CachedSlot<T>
where
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            store: Arc::clone(&self.store),
            writes: Arc::clone(&self.writes),
        }
    }
}

impl<T> CachedSlot<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Seeds the slot from `store`. An unreadable store counts as empty.
    pub async fn load(store: Arc<dyn LocalStore<T>>) -> Self {
        let initial = match store.read().await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(error = %error, "cached value unreadable, starting empty");
                None
            }
        };
        Self {
            state: SharedState::new(initial),
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn state(&self) -> &SharedState<T> {
        &self.state
    }

    pub fn current(&self) -> Option<T> {
        self.state.current()
    }

    /// Persists and publishes `value`.
    pub async fn replace(&self, value: T) -> Result<(), Failure> {
        self.modify(move |_| value).await.map(|_| ())
    }

    /// Computes the next value from the current one, then persists and
    /// publishes it. Returns the value that was published.
    pub async fn modify<F>(&self, next: F) -> Result<T, Failure>
    where
        F: FnOnce(Option<T>) -> T + Send,
    {
        let _guard = self.writes.lock().await;
        let value = next(self.state.current());
        self.store.write(&value).await.map_err(storage_failure)?;
        self.state.publish(value.clone());
        Ok(value)
    }

    /// Removes the persisted value, then clears the cell.
    pub async fn clear(&self) -> Result<(), Failure> {
        let _guard = self.writes.lock().await;
        self.store.clear().await.map_err(storage_failure)?;
        self.state.clear();
        Ok(())
    }
}

fn storage_failure(error: model::StoreError) -> Failure {
    tracing::warn!(error = %error, "local store write failed");
    Failure::new(error.to_string(), STORAGE_FAILURE_CODE)
}
