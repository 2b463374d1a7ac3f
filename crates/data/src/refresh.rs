//! Cache-then-refresh stream building blocks shared by the repositories.

use std::future::Future;

use futures::stream::{self, StreamExt};
use model::{Failure, Outcome, OutcomeStream};

use crate::shared_state::CachedSlot;

/// Emits `cached` as a `Success` when present, then the outcome of `refresh`.
pub(crate) fn cached_then<T, F>(cached: Option<T>, refresh: F) -> OutcomeStream<T>
where
    T: Send + 'static,
    F: Future<Output = Outcome<T>> + Send + 'static,
{
    Box::pin(stream::iter(cached.map(Outcome::Success)).chain(stream::once(refresh)))
}

/// Awaits `fetch` and folds a successful result into `slot` with `merge`.
///
/// - `Success`: merged, persisted, published, and passed through. A storage
///   failure replaces it.
/// - `Empty`: passed through; the slot is left alone.
/// - `Failure`: recorded on the slot's failure channel and passed through; the
///   cached value is kept.
pub(crate) async fn refresh_into<T, R, Fut, M>(slot: &CachedSlot<T>, fetch: Fut, merge: M) -> Outcome<R>
where
    T: Clone + Send + Sync + 'static,
    R: Clone + Send,
    Fut: Future<Output = Outcome<R>>,
    M: FnOnce(Option<T>, R) -> T + Send,
{
    match fetch.await {
        Outcome::Success(value) => {
            let fresh = value.clone();
            match slot.modify(move |current| merge(current, fresh)).await {
                Ok(_) => Outcome::Success(value),
                Err(failure) => {
                    slot.state().record_failure(failure.clone());
                    failure.into()
                }
            }
        }
        Outcome::Empty => Outcome::Empty,
        Outcome::Failure { message, code } => {
            slot.state()
                .record_failure(Failure::new(message.clone(), code));
            Outcome::Failure { message, code }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn cached_value_comes_first() {
        let outcomes: Vec<_> = cached_then(Some(1), async { Outcome::Success(2) })
            .collect()
            .await;
        assert_eq!(outcomes, vec![Outcome::Success(1), Outcome::Success(2)]);
    }

    #[tokio::test]
    async fn nothing_cached_emits_only_the_refresh() {
        let outcomes: Vec<Outcome<i32>> = cached_then(None, async { Outcome::failure("down", 503) })
            .collect()
            .await;
        assert_eq!(outcomes, vec![Outcome::failure("down", 503)]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_cached_value_and_records_the_failure() {
        let slot = CachedSlot::<Vec<i32>>::load(Arc::new(MemoryStore::with_value(vec![1, 2]))).await;

        let outcome: Outcome<Vec<i32>> = refresh_into(
            &slot,
            async { Outcome::failure("server error", 500) },
            |_, fresh| fresh,
        )
        .await;

        assert_eq!(outcome, Outcome::failure("server error", 500));
        assert_eq!(slot.current(), Some(vec![1, 2]));
        assert_eq!(slot.state().last_failure(), Some(Failure::new("server error", 500)));
    }

    #[tokio::test]
    async fn empty_refresh_leaves_the_slot_alone() {
        let slot = CachedSlot::<i32>::load(Arc::new(MemoryStore::with_value(3))).await;

        let outcome: Outcome<i32> = refresh_into(&slot, async { Outcome::Empty }, |_, fresh| fresh).await;

        assert_eq!(outcome, Outcome::Empty);
        assert_eq!(slot.current(), Some(3));
        assert_eq!(slot.state().last_failure(), None);
    }

    #[tokio::test]
    async fn successful_refresh_is_merged_into_the_slot() {
        let slot = CachedSlot::<(i32, i32)>::load(Arc::new(MemoryStore::with_value((1, 1)))).await;

        let outcome = refresh_into(
            &slot,
            async { Outcome::Success(9) },
            |current: Option<(i32, i32)>, fresh| (current.unwrap_or_default().0, fresh),
        )
        .await;

        assert_eq!(outcome, Outcome::Success(9));
        assert_eq!(slot.current(), Some((1, 9)));
    }
}
