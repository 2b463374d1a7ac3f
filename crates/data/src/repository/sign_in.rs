use std::sync::Arc;

use async_trait::async_trait;
use model::{GoogleIdToken, Outcome, SignInDataSource, SignInRepository, SignInToken};

use crate::session::SessionStore;

pub struct SignInRepositoryImpl {
    data_source: Arc<dyn SignInDataSource>,
    session: Arc<SessionStore>,
}

impl SignInRepositoryImpl {
    pub fn new(data_source: Arc<dyn SignInDataSource>, session: Arc<SessionStore>) -> Self {
        Self {
            data_source,
            session,
        }
    }
}

#[async_trait]
impl SignInRepository for SignInRepositoryImpl {
    async fn sign_in_with_google_token(&self, id_token: &GoogleIdToken) -> Outcome<SignInToken> {
        if id_token.usable_token().is_none() {
            tracing::warn!("sign-in attempted without a Google ID token");
            return Outcome::invalid_input("Google ID token is missing");
        }

        let outcome = self.data_source.sign_in(id_token).await;
        if let Outcome::Success(token) = &outcome {
            if let Err(failure) = self.session.save(token.clone()).await {
                tracing::warn!(code = failure.code, reason = %failure.message, "issued tokens not stored");
                return failure.into();
            }
            tracing::info!("signed in");
        }
        outcome
    }

    async fn sign_out(&self) -> Outcome<()> {
        match self.session.clear().await {
            Ok(()) => {
                tracing::info!("signed out");
                Outcome::Empty
            }
            Err(failure) => failure.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use model::{
        CredentialSource, LocalStore, MockSignInDataSource, StoreError, INVALID_INPUT_CODE,
        STORAGE_FAILURE_CODE,
    };
    use rstest::rstest;

    use super::*;
    use crate::MemoryStore;

    fn token() -> SignInToken {
        SignInToken {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        }
    }

    async fn session() -> Arc<SessionStore> {
        Arc::new(SessionStore::load(Arc::new(MemoryStore::<SignInToken>::new())).await)
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::blank(Some("   "))]
    #[tokio::test]
    async fn unusable_token_fails_without_a_remote_call(#[case] raw: Option<&str>) {
        let mut data_source = MockSignInDataSource::new();
        data_source.expect_sign_in().never();
        let repository = SignInRepositoryImpl::new(Arc::new(data_source), session().await);

        let outcome = repository
            .sign_in_with_google_token(&GoogleIdToken::new(raw.map(str::to_owned)))
            .await;

        assert_eq!(outcome.failure_code(), Some(INVALID_INPUT_CODE));
    }

    #[tokio::test]
    async fn successful_sign_in_starts_a_session() {
        let mut data_source = MockSignInDataSource::new();
        data_source
            .expect_sign_in()
            .times(1)
            .returning(|_| Outcome::Success(token()));
        let session = session().await;
        let repository = SignInRepositoryImpl::new(Arc::new(data_source), Arc::clone(&session));

        let outcome = repository
            .sign_in_with_google_token(&GoogleIdToken::new(Some("google".into())))
            .await;

        assert_eq!(outcome, Outcome::Success(token()));
        assert_eq!(session.access_token(), Some("access".to_owned()));
    }

    #[tokio::test]
    async fn rejected_sign_in_keeps_the_session_empty() {
        let mut data_source = MockSignInDataSource::new();
        data_source
            .expect_sign_in()
            .returning(|_| Outcome::failure("invalid token", 401));
        let session = session().await;
        let repository = SignInRepositoryImpl::new(Arc::new(data_source), Arc::clone(&session));

        let outcome = repository
            .sign_in_with_google_token(&GoogleIdToken::new(Some("stale".into())))
            .await;

        assert_eq!(outcome, Outcome::failure("invalid token", 401));
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let session = Arc::new(SessionStore::load(Arc::new(MemoryStore::with_value(token()))).await);
        let repository =
            SignInRepositoryImpl::new(Arc::new(MockSignInDataSource::new()), Arc::clone(&session));

        assert_eq!(repository.sign_out().await, Outcome::Empty);
        assert!(!session.is_signed_in());
    }

    struct ReadOnlyStore;

    #[async_trait]
    impl LocalStore<SignInToken> for ReadOnlyStore {
        async fn read(&self) -> Result<Option<SignInToken>, StoreError> {
            Ok(None)
        }

        async fn write(&self, _value: &SignInToken) -> Result<(), StoreError> {
            Err(StoreError::io(
                "session.json",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        async fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn unsaved_session_is_a_storage_failure() {
        let mut data_source = MockSignInDataSource::new();
        data_source
            .expect_sign_in()
            .times(1)
            .returning(|_| Outcome::Success(token()));
        let session = Arc::new(SessionStore::load(Arc::new(ReadOnlyStore)).await);
        let repository = SignInRepositoryImpl::new(Arc::new(data_source), Arc::clone(&session));

        let outcome = repository
            .sign_in_with_google_token(&GoogleIdToken::new(Some("google".into())))
            .await;

        assert_eq!(outcome.failure_code(), Some(STORAGE_FAILURE_CODE));
        assert!(!session.is_signed_in());
    }
}
