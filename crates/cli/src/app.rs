//! Composition root: builds every concrete adapter and hands the repositories
//! to the use cases.

use std::path::Path;
use std::sync::Arc;

use data::{
    slots, BattleRepositoryImpl, JsonFileStore, MatchRepositoryImpl, MemberRepositoryImpl,
    MyPageRepositoryImpl, SessionStore, SignInRepositoryImpl, SingleRepositoryImpl,
};
use model::LocalStore;
use network::{
    ApiClient, BattleDataSourceImpl, HttpTransport, MatchDataSourceImpl, MemberDataSourceImpl,
    MyPageDataSourceImpl, SignInDataSourceImpl,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use usecase::{Repositories, UseCases};

use crate::config::ClientConfig;

pub struct App {
    pub use_cases: UseCases,
}

impl App {
    pub async fn build(config: &ClientConfig) -> anyhow::Result<Self> {
        let data_dir = config.data_dir.as_path();

        let session = Arc::new(SessionStore::load(slot(data_dir, slots::SESSION)).await);
        let transport = HttpTransport::new(&config.base_url, config.request_timeout())?
            .with_credentials(session.clone());
        let client = ApiClient::new(Arc::new(transport));

        let repositories = Repositories {
            sign_in: Arc::new(SignInRepositoryImpl::new(
                Arc::new(SignInDataSourceImpl::new(client.clone())),
                session,
            )),
            member: Arc::new(
                MemberRepositoryImpl::load(
                    Arc::new(MemberDataSourceImpl::new(client.clone())),
                    slot(data_dir, slots::USER),
                )
                .await,
            ),
            matching: Arc::new(MatchRepositoryImpl::new(Arc::new(MatchDataSourceImpl::new(
                client.clone(),
            )))),
            battle: Arc::new(
                BattleRepositoryImpl::load(
                    Arc::new(BattleDataSourceImpl::new(client.clone())),
                    slot(data_dir, slots::BATTLE_ID),
                )
                .await,
            ),
            single: Arc::new(SingleRepositoryImpl::load(slot(data_dir, slots::SINGLE_ID)).await),
            my_page: Arc::new(
                MyPageRepositoryImpl::load(
                    Arc::new(MyPageDataSourceImpl::new(client)),
                    slot(data_dir, slots::RUNNING_HISTORY),
                )
                .await,
            ),
        };

        tracing::debug!(base_url = %config.base_url, "client assembled");
        Ok(Self {
            use_cases: UseCases::new(repositories),
        })
    }
}

fn slot<T>(data_dir: &Path, file_name: &str) -> Arc<dyn LocalStore<T>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    Arc::new(JsonFileStore::in_dir(data_dir, file_name))
}

#[cfg(test)]
mod tests {
    use model::Outcome;
    use tempfile::TempDir;

    use super::*;
    use crate::config::LogFormat;

    fn config(data_dir: &Path) -> ClientConfig {
        ClientConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            request_timeout_secs: 1,
            data_dir: data_dir.to_owned(),
            log_format: LogFormat::Pretty,
            log_filter: "off".to_owned(),
        }
    }

    #[tokio::test]
    async fn saved_selection_is_written_to_the_data_dir() {
        let dir = TempDir::new().unwrap();

        let first = App::build(&config(dir.path())).await.unwrap();
        assert_eq!(
            first.use_cases.save_single_id.execute("single-4").await,
            Outcome::Empty
        );

        assert!(dir.path().join(slots::SINGLE_ID).exists());
    }

    #[tokio::test]
    async fn signing_in_without_a_token_never_leaves_the_machine() {
        let dir = TempDir::new().unwrap();
        let app = App::build(&config(dir.path())).await.unwrap();

        let outcome = app.use_cases.sign_in_with_google.execute(None).await;

        assert_eq!(outcome.failure_code(), Some(model::INVALID_INPUT_CODE));
        assert!(!dir.path().join(slots::SESSION).exists());
    }

    #[tokio::test]
    async fn invalid_base_url_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = config(dir.path());
        config.base_url = "http://exa mple.com".to_owned();

        assert!(App::build(&config).await.is_err());
    }
}
