//! Sign-in use cases.

use std::sync::Arc;

use model::{GoogleIdToken, Outcome, SignInRepository, SignInToken};

/// Exchanges the Google identity token obtained on the device for a session.
pub struct SignInWithGoogleUseCase {
    repository: Arc<dyn SignInRepository>,
}

impl SignInWithGoogleUseCase {
    pub fn new(repository: Arc<dyn SignInRepository>) -> Self {
        Self { repository }
    }

    /// `id_token` is `None` when the identity provider returned no token;
    /// the repository rejects that without contacting the server.
    pub async fn execute(&self, id_token: Option<String>) -> Outcome<SignInToken> {
        self.repository
            .sign_in_with_google_token(&GoogleIdToken::new(id_token))
            .await
    }
}

pub struct SignOutUseCase {
    repository: Arc<dyn SignInRepository>,
}

impl SignOutUseCase {
    pub fn new(repository: Arc<dyn SignInRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Outcome<()> {
        self.repository.sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;
    use model::MockSignInRepository;

    use super::*;

    #[tokio::test]
    async fn wraps_the_raw_token() {
        let token = SignInToken {
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        let returned = token.clone();
        let mut repository = MockSignInRepository::new();
        repository
            .expect_sign_in_with_google_token()
            .with(eq(GoogleIdToken::new(Some("google".into()))))
            .times(1)
            .returning(move |_| Outcome::Success(returned.clone()));

        let outcome = SignInWithGoogleUseCase::new(Arc::new(repository))
            .execute(Some("google".into()))
            .await;

        assert_eq!(outcome, Outcome::Success(token));
    }

    #[tokio::test]
    async fn repository_failure_is_returned_unchanged() {
        let mut repository = MockSignInRepository::new();
        repository
            .expect_sign_in_with_google_token()
            .returning(|_| Outcome::failure("Google ID token is missing", 400));

        let outcome = SignInWithGoogleUseCase::new(Arc::new(repository))
            .execute(None)
            .await;

        assert_eq!(outcome, Outcome::failure("Google ID token is missing", 400));
    }

    #[tokio::test]
    async fn sign_out_delegates() {
        let mut repository = MockSignInRepository::new();
        repository.expect_sign_out().times(1).returning(|| Outcome::Empty);

        assert_eq!(
            SignOutUseCase::new(Arc::new(repository)).execute().await,
            Outcome::Empty
        );
    }
}
