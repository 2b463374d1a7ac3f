//! Matching queue use cases.

use std::sync::Arc;

use model::{MatchDecision, MatchRepository, MatchStatus, Outcome, RunningDistance};

pub struct RegisterMatchUseCase {
    repository: Arc<dyn MatchRepository>,
}

impl RegisterMatchUseCase {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, distance: RunningDistance) -> Outcome<MatchStatus> {
        self.repository.register_match(distance).await
    }
}

/// Answers a match proposal, accepting or declining it.
pub struct SendAcceptMatchUseCase {
    repository: Arc<dyn MatchRepository>,
}

impl SendAcceptMatchUseCase {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, decision: MatchDecision) -> Outcome<MatchStatus> {
        self.repository.accept_match(decision).await
    }
}

pub struct CancelMatchUseCase {
    repository: Arc<dyn MatchRepository>,
}

impl CancelMatchUseCase {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Outcome<MatchStatus> {
        self.repository.cancel_match().await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use model::MockMatchRepository;

    use super::*;

    fn status(message: &str) -> Outcome<MatchStatus> {
        Outcome::Success(MatchStatus {
            message: message.into(),
        })
    }

    #[tokio::test]
    async fn match_flow_delegates_each_step() {
        let distance = RunningDistance::new(3_000).unwrap();
        let mut repository = MockMatchRepository::new();
        repository
            .expect_register_match()
            .with(eq(distance))
            .times(1)
            .returning(|_| status("waiting"));
        repository
            .expect_accept_match()
            .with(eq(MatchDecision::accept()))
            .times(1)
            .returning(|_| status("joined"));
        repository
            .expect_cancel_match()
            .times(1)
            .returning(|| Outcome::failure("no pending match", 404));
        let repository: Arc<dyn MatchRepository> = Arc::new(repository);

        assert_eq!(
            RegisterMatchUseCase::new(Arc::clone(&repository))
                .execute(distance)
                .await,
            status("waiting")
        );
        assert_eq!(
            SendAcceptMatchUseCase::new(Arc::clone(&repository))
                .execute(MatchDecision::accept())
                .await,
            status("joined")
        );
        assert_eq!(
            CancelMatchUseCase::new(repository).execute().await,
            Outcome::failure("no pending match", 404)
        );
    }
}
