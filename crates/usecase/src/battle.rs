//! Battle and solo run selection use cases.

use std::sync::Arc;

use model::{BattleId, BattleRepository, Outcome, SingleId, SingleRepository};

pub struct GetBattleIdUseCase {
    repository: Arc<dyn BattleRepository>,
}

impl GetBattleIdUseCase {
    pub fn new(repository: Arc<dyn BattleRepository>) -> Self {
        Self { repository }
    }

    /// Asks the server for the battle the member is currently running in.
    pub async fn execute(&self) -> Outcome<BattleId> {
        self.repository.get_battle_id().await
    }
}

pub struct SaveBattleIdUseCase {
    repository: Arc<dyn BattleRepository>,
}

impl SaveBattleIdUseCase {
    pub fn new(repository: Arc<dyn BattleRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, battle_id: &str) -> Outcome<()> {
        match BattleId::new(battle_id) {
            Some(battle_id) => self.repository.save_battle_id(battle_id).await,
            None => Outcome::invalid_input("battle id must not be blank"),
        }
    }
}

pub struct SaveSingleIdUseCase {
    repository: Arc<dyn SingleRepository>,
}

impl SaveSingleIdUseCase {
    pub fn new(repository: Arc<dyn SingleRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, single_id: &str) -> Outcome<()> {
        match SingleId::new(single_id) {
            Some(single_id) => self.repository.save_single_id(single_id).await,
            None => Outcome::invalid_input("single id must not be blank"),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use model::{MockBattleRepository, MockSingleRepository, INVALID_INPUT_CODE};
    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn running_battle_is_fetched() {
        let mut repository = MockBattleRepository::new();
        repository
            .expect_get_battle_id()
            .returning(|| Outcome::Success(BattleId::new("battle-1").unwrap()));

        assert_eq!(
            GetBattleIdUseCase::new(Arc::new(repository)).execute().await,
            Outcome::Success(BattleId::new("battle-1").unwrap())
        );
    }

    #[tokio::test]
    async fn battle_id_is_saved() {
        let mut repository = MockBattleRepository::new();
        repository
            .expect_save_battle_id()
            .with(eq(BattleId::new("battle-2").unwrap()))
            .times(1)
            .returning(|_| Outcome::Empty);

        assert_eq!(
            SaveBattleIdUseCase::new(Arc::new(repository))
                .execute("battle-2")
                .await,
            Outcome::Empty
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("  \t")]
    #[tokio::test]
    async fn blank_ids_are_rejected_before_the_repository(#[case] raw: &str) {
        let mut battles = MockBattleRepository::new();
        battles.expect_save_battle_id().never();
        let mut singles = MockSingleRepository::new();
        singles.expect_save_single_id().never();

        let battle = SaveBattleIdUseCase::new(Arc::new(battles)).execute(raw).await;
        let single = SaveSingleIdUseCase::new(Arc::new(singles)).execute(raw).await;

        assert_eq!(battle.failure_code(), Some(INVALID_INPUT_CODE));
        assert_eq!(single.failure_code(), Some(INVALID_INPUT_CODE));
    }

    #[tokio::test]
    async fn storage_failure_is_returned_unchanged() {
        let mut repository = MockSingleRepository::new();
        repository
            .expect_save_single_id()
            .returning(|_| Outcome::failure("disk full", -2));

        assert_eq!(
            SaveSingleIdUseCase::new(Arc::new(repository))
                .execute("single-1")
                .await,
            Outcome::failure("disk full", -2)
        );
    }
}
