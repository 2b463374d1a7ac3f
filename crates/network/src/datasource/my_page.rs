use async_trait::async_trait;
use model::{
    BattleRunningRecord, ComprehensiveRunRecord, MyPageDataSource, Outcome, SingleRunningRecord,
};
use serde::Deserialize;

use crate::{ApiClient, ApiRequest};

const TOTAL_PATH: &str = "/api/mypage/total";
const SINGLES_PATH: &str = "/api/mypage/singles";
const BATTLES_PATH: &str = "/api/mypage/battles";

/// History endpoints wrap their records in a `history` array.
#[derive(Deserialize)]
struct HistoryResponse<T> {
    history: Vec<T>,
}

pub struct MyPageDataSourceImpl {
    client: ApiClient,
}

impl MyPageDataSourceImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MyPageDataSource for MyPageDataSourceImpl {
    async fn comprehensive_record(&self) -> Outcome<ComprehensiveRunRecord> {
        self.client.call(ApiRequest::get(TOTAL_PATH)).await
    }

    async fn single_history(&self) -> Outcome<Vec<SingleRunningRecord>> {
        self.client
            .call::<HistoryResponse<SingleRunningRecord>>(ApiRequest::get(SINGLES_PATH))
            .await
            .map(|response| response.history)
    }

    async fn battle_history(&self) -> Outcome<Vec<BattleRunningRecord>> {
        self.client
            .call::<HistoryResponse<BattleRunningRecord>>(ApiRequest::get(BATTLES_PATH))
            .await
            .map(|response| response.history)
    }
}
