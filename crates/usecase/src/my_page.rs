//! "My page" use cases: lifetime totals and running history.

use std::sync::Arc;

use model::{
    BattleRunningRecord, CombinedRunningHistory, ComprehensiveRunRecord, MyPageRepository,
    Outcome, OutcomeStream, SingleRunningRecord,
};

pub struct GetComprehensiveRunRecordUseCase {
    repository: Arc<dyn MyPageRepository>,
}

impl GetComprehensiveRunRecordUseCase {
    pub fn new(repository: Arc<dyn MyPageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Outcome<ComprehensiveRunRecord> {
        self.repository.get_comprehensive_run_record().await
    }
}

pub struct UpdateSingleRunningHistoryUseCase {
    repository: Arc<dyn MyPageRepository>,
}

impl UpdateSingleRunningHistoryUseCase {
    pub fn new(repository: Arc<dyn MyPageRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> OutcomeStream<Vec<SingleRunningRecord>> {
        self.repository.update_single_history()
    }
}

pub struct UpdateBattleRunningHistoryUseCase {
    repository: Arc<dyn MyPageRepository>,
}

impl UpdateBattleRunningHistoryUseCase {
    pub fn new(repository: Arc<dyn MyPageRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> OutcomeStream<Vec<BattleRunningRecord>> {
        self.repository.update_battle_history()
    }
}

/// Observes the combined history. The stream does not end on its own.
pub struct GetRunningHistoryUseCase {
    repository: Arc<dyn MyPageRepository>,
}

impl GetRunningHistoryUseCase {
    pub fn new(repository: Arc<dyn MyPageRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> OutcomeStream<CombinedRunningHistory> {
        self.repository.running_history()
    }

    /// Last known good aggregate, without subscribing.
    pub fn snapshot(&self) -> Option<CombinedRunningHistory> {
        self.repository.current_history()
    }
}

#[cfg(test)]
mod tests {
    use futures::{stream, StreamExt};
    use model::MockMyPageRepository;

    use super::*;

    #[tokio::test]
    async fn comprehensive_record_is_delegated() {
        let mut repository = MockMyPageRepository::new();
        repository
            .expect_get_comprehensive_run_record()
            .times(1)
            .returning(|| Outcome::failure("unauthorized", 401));

        let outcome = GetComprehensiveRunRecordUseCase::new(Arc::new(repository))
            .execute()
            .await;

        assert_eq!(outcome, Outcome::failure("unauthorized", 401));
    }

    #[tokio::test]
    async fn history_streams_are_passed_through() {
        let mut repository = MockMyPageRepository::new();
        repository
            .expect_update_single_history()
            .returning(|| Box::pin(stream::iter(vec![Outcome::failure("server error", 500)])));
        repository
            .expect_update_battle_history()
            .returning(|| Box::pin(stream::iter(vec![Outcome::Empty])));
        repository.expect_running_history().returning(|| {
            Box::pin(stream::iter(vec![Outcome::Success(CombinedRunningHistory::default())]))
        });
        let repository: Arc<dyn MyPageRepository> = Arc::new(repository);

        let (single, battle) = futures::join!(
            UpdateSingleRunningHistoryUseCase::new(Arc::clone(&repository))
                .execute()
                .collect::<Vec<_>>(),
            UpdateBattleRunningHistoryUseCase::new(Arc::clone(&repository))
                .execute()
                .collect::<Vec<_>>(),
        );
        let history: Vec<_> = GetRunningHistoryUseCase::new(repository)
            .execute()
            .collect()
            .await;

        assert_eq!(single, vec![Outcome::failure("server error", 500)]);
        assert_eq!(battle, vec![Outcome::Empty]);
        assert_eq!(history, vec![Outcome::Success(CombinedRunningHistory::default())]);
    }

    #[test]
    fn snapshot_reads_the_current_aggregate() {
        let mut repository = MockMyPageRepository::new();
        repository
            .expect_current_history()
            .returning(|| Some(CombinedRunningHistory::default()));

        let snapshot = GetRunningHistoryUseCase::new(Arc::new(repository)).snapshot();

        assert!(snapshot.is_some_and(|history| history.is_empty()));
    }
}
