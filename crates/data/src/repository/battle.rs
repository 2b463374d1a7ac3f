use std::sync::Arc;

use async_trait::async_trait;
use model::{BattleDataSource, BattleId, BattleRepository, LocalStore, Outcome};

use crate::shared_state::CachedSlot;

pub struct BattleRepositoryImpl {
    data_source: Arc<dyn BattleDataSource>,
    selected: CachedSlot<BattleId>,
}

impl BattleRepositoryImpl {
    pub async fn load(
        data_source: Arc<dyn BattleDataSource>,
        store: Arc<dyn LocalStore<BattleId>>,
    ) -> Self {
        Self {
            data_source,
            selected: CachedSlot::load(store).await,
        }
    }
}

#[async_trait]
impl BattleRepository for BattleRepositoryImpl {
    async fn get_battle_id(&self) -> Outcome<BattleId> {
        self.data_source.running_battle_id().await
    }

    async fn save_battle_id(&self, battle_id: BattleId) -> Outcome<()> {
        match self.selected.replace(battle_id).await {
            Ok(()) => Outcome::Empty,
            Err(failure) => failure.into(),
        }
    }

    fn saved_battle_id(&self) -> Option<BattleId> {
        self.selected.current()
    }
}
