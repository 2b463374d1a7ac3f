use std::sync::Arc;

use async_trait::async_trait;
use model::{LocalStore, Outcome, SingleId, SingleRepository};

use crate::shared_state::CachedSlot;

/// Remembers which solo run the member last selected.
pub struct SingleRepositoryImpl {
    selected: CachedSlot<SingleId>,
}

impl SingleRepositoryImpl {
    pub async fn load(store: Arc<dyn LocalStore<SingleId>>) -> Self {
        Self {
            selected: CachedSlot::load(store).await,
        }
    }
}

#[async_trait]
impl SingleRepository for SingleRepositoryImpl {
    async fn save_single_id(&self, single_id: SingleId) -> Outcome<()> {
        match self.selected.replace(single_id).await {
            Ok(()) => Outcome::Empty,
            Err(failure) => failure.into(),
        }
    }

    fn saved_single_id(&self) -> Option<SingleId> {
        self.selected.current()
    }
}
