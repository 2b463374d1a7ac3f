use std::sync::Arc;

use async_trait::async_trait;
use model::{
    LocalStore, MemberDataSource, MemberRepository, Nickname, Outcome, OutcomeStream,
    ProfileImage, User,
};
use tokio::sync::watch;

use crate::refresh::{cached_then, refresh_into};
use crate::shared_state::CachedSlot;

/// Member profile repository backed by the cached `User` slot.
pub struct MemberRepositoryImpl {
    data_source: Arc<dyn MemberDataSource>,
    user: CachedSlot<User>,
}

impl MemberRepositoryImpl {
    /// Builds the repository with the profile cached by a previous run.
    pub async fn load(data_source: Arc<dyn MemberDataSource>, store: Arc<dyn LocalStore<User>>) -> Self {
        Self {
            data_source,
            user: CachedSlot::load(store).await,
        }
    }
}

#[async_trait]
impl MemberRepository for MemberRepositoryImpl {
    fn user_data(&self) -> watch::Receiver<Option<User>> {
        self.user.state().subscribe()
    }

    async fn get_user_data(&self) -> Outcome<User> {
        self.data_source.get_user().await
    }

    fn refresh_user_data(&self) -> OutcomeStream<User> {
        let data_source = Arc::clone(&self.data_source);
        let user = self.user.clone();
        cached_then(self.user.current(), async move {
            refresh_into(&user, data_source.get_user(), |_, fresh| fresh).await
        })
    }

    async fn save_user_data(&self, user: User) -> Outcome<()> {
        match self.user.replace(user).await {
            Ok(()) => Outcome::Empty,
            Err(failure) => failure.into(),
        }
    }

    async fn update_user_data(&self, user: User) -> Outcome<()> {
        let nickname = match Nickname::new(user.nick_name.as_str()) {
            Ok(nickname) => nickname,
            Err(error) => return Outcome::invalid_input(error.to_string()),
        };

        match self.data_source.update_nickname(&nickname).await {
            Outcome::Success(()) | Outcome::Empty => match self.user.replace(user).await {
                Ok(()) => Outcome::Empty,
                Err(failure) => failure.into(),
            },
            Outcome::Failure { message, code } => Outcome::Failure { message, code },
        }
    }

    async fn update_profile_image(&self, image: ProfileImage) -> Outcome<()> {
        let outcome = self.data_source.update_profile_image(&image).await;
        if outcome.is_failure() {
            return outcome;
        }

        // The new image URL is only known to the server; pick it up. A failed
        // follow-up fetch is recorded but does not undo the upload.
        let refreshed = refresh_into(&self.user, self.data_source.get_user(), |_, fresh| fresh).await;
        if let Outcome::Failure { message, code } = &refreshed {
            tracing::warn!(code, reason = %message, "profile refresh after image upload failed");
        }
        Outcome::Empty
    }

    async fn delete_account(&self) -> Outcome<()> {
        let outcome = self.data_source.delete_account().await;
        if outcome.is_failure() {
            return outcome;
        }

        if let Err(failure) = self.user.clear().await {
            tracing::warn!(code = failure.code, reason = %failure.message, "cached profile not removed");
        }
        tracing::info!("account deleted");
        Outcome::Empty
    }
}
