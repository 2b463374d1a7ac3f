use async_trait::async_trait;
use model::{BattleDataSource, BattleId, Outcome};
use serde::Deserialize;

use crate::{ApiClient, ApiRequest};

const RUNNING_BATTLE_PATH: &str = "/api/battles/running";

#[derive(Deserialize)]
struct RunningBattleResponse {
    id: BattleId,
}

pub struct BattleDataSourceImpl {
    client: ApiClient,
}

impl BattleDataSourceImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BattleDataSource for BattleDataSourceImpl {
    async fn running_battle_id(&self) -> Outcome<BattleId> {
        self.client
            .call::<RunningBattleResponse>(ApiRequest::get(RUNNING_BATTLE_PATH))
            .await
            .map(|response| response.id)
    }
}
