use std::sync::Arc;

use async_trait::async_trait;
use model::{
    BattleRunningRecord, CombinedRunningHistory, ComprehensiveRunRecord, Failure, LocalStore,
    MyPageDataSource, MyPageRepository, Outcome, OutcomeStream, SingleRunningRecord,
};
use tokio::sync::watch;

use crate::refresh::{cached_then, refresh_into};
use crate::shared_state::CachedSlot;

/// "My page" repository.
///
/// Both history refreshes fold their half into one cached
/// [`CombinedRunningHistory`]. The slot serialises writes and each refresh
/// merges against the aggregate current at write time, so concurrent single
/// and battle refreshes never overwrite each other's half. A half that was
/// never fetched stays `None` and is not emitted as a cached value.
pub struct MyPageRepositoryImpl {
    data_source: Arc<dyn MyPageDataSource>,
    history: CachedSlot<CombinedRunningHistory>,
}

impl MyPageRepositoryImpl {
    pub async fn load(
        data_source: Arc<dyn MyPageDataSource>,
        store: Arc<dyn LocalStore<CombinedRunningHistory>>,
    ) -> Self {
        Self {
            data_source,
            history: CachedSlot::load(store).await,
        }
    }
}

#[async_trait]
impl MyPageRepository for MyPageRepositoryImpl {
    async fn get_comprehensive_run_record(&self) -> Outcome<ComprehensiveRunRecord> {
        self.data_source.comprehensive_record().await
    }

    fn update_single_history(&self) -> OutcomeStream<Vec<SingleRunningRecord>> {
        let data_source = Arc::clone(&self.data_source);
        let history = self.history.clone();
        let cached = self.history.current().and_then(|aggregate| aggregate.single);
        cached_then(cached, async move {
            refresh_into(&history, data_source.single_history(), |current, single| {
                CombinedRunningHistory {
                    single: Some(single),
                    ..current.unwrap_or_default()
                }
            })
            .await
        })
    }

    fn update_battle_history(&self) -> OutcomeStream<Vec<BattleRunningRecord>> {
        let data_source = Arc::clone(&self.data_source);
        let history = self.history.clone();
        let cached = self.history.current().and_then(|aggregate| aggregate.battle);
        cached_then(cached, async move {
            refresh_into(&history, data_source.battle_history(), |current, battle| {
                CombinedRunningHistory {
                    battle: Some(battle),
                    ..current.unwrap_or_default()
                }
            })
            .await
        })
    }

    fn running_history(&self) -> OutcomeStream<CombinedRunningHistory> {
        self.history.state().outcomes()
    }

    fn current_history(&self) -> Option<CombinedRunningHistory> {
        self.history.current()
    }

    fn last_history_failure(&self) -> Option<Failure> {
        self.history.state().last_failure()
    }

    fn subscribe_history_failures(&self) -> watch::Receiver<Option<Failure>> {
        self.history.state().subscribe_failures()
    }
}
