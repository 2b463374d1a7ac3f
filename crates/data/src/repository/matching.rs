use std::sync::Arc;

use async_trait::async_trait;
use model::{MatchDataSource, MatchDecision, MatchRepository, MatchStatus, Outcome, RunningDistance};

/// Matching queue operations. Nothing here is cached: a match is only
/// meaningful while the server holds it.
pub struct MatchRepositoryImpl {
    data_source: Arc<dyn MatchDataSource>,
}

impl MatchRepositoryImpl {
    pub fn new(data_source: Arc<dyn MatchDataSource>) -> Self {
        Self { data_source }
    }
}

#[async_trait]
impl MatchRepository for MatchRepositoryImpl {
    async fn register_match(&self, distance: RunningDistance) -> Outcome<MatchStatus> {
        tracing::debug!(meters = distance.meters(), "joining the matching queue");
        self.data_source.register(distance).await
    }

    async fn accept_match(&self, decision: MatchDecision) -> Outcome<MatchStatus> {
        tracing::debug!(is_joined = decision.is_joined, "answering the match proposal");
        self.data_source.decide(decision).await
    }

    async fn cancel_match(&self) -> Outcome<MatchStatus> {
        self.data_source.cancel().await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use model::MockMatchDataSource;

    use super::*;

    fn status(message: &str) -> MatchStatus {
        MatchStatus {
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn registration_forwards_the_distance() {
        let distance = RunningDistance::new(5_000).unwrap();
        let mut data_source = MockMatchDataSource::new();
        data_source
            .expect_register()
            .with(eq(distance))
            .times(1)
            .returning(|_| Outcome::Success(status("waiting")));
        let repository = MatchRepositoryImpl::new(Arc::new(data_source));

        assert_eq!(
            repository.register_match(distance).await,
            Outcome::Success(status("waiting"))
        );
    }

    #[tokio::test]
    async fn decisions_are_forwarded_verbatim() {
        let mut data_source = MockMatchDataSource::new();
        data_source
            .expect_decide()
            .with(eq(MatchDecision::decline()))
            .times(1)
            .returning(|_| Outcome::Empty);
        let repository = MatchRepositoryImpl::new(Arc::new(data_source));

        assert_eq!(
            repository.accept_match(MatchDecision::decline()).await,
            Outcome::Empty
        );
    }

    #[tokio::test]
    async fn cancellation_failure_is_passed_through() {
        let mut data_source = MockMatchDataSource::new();
        data_source
            .expect_cancel()
            .returning(|| Outcome::failure("not waiting", 404));
        let repository = MatchRepositoryImpl::new(Arc::new(data_source));

        assert_eq!(
            repository.cancel_match().await,
            Outcome::failure("not waiting", 404)
        );
    }
}
