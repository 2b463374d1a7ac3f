//! Member profile use cases.

use std::sync::Arc;

use model::{MemberRepository, Nickname, Outcome, OutcomeStream, ProfileImage, User};

pub struct GetUserDataUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl GetUserDataUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Outcome<User> {
        self.repository.get_user_data().await
    }
}

pub struct SaveUserDataUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl SaveUserDataUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, user: User) -> Outcome<()> {
        self.repository.save_user_data(user).await
    }
}

pub struct RefreshUserDataUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl RefreshUserDataUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> OutcomeStream<User> {
        self.repository.refresh_user_data()
    }
}

/// Renames the signed-in member.
///
/// The nickname is validated locally and combined with the cached profile;
/// nothing is sent when either step fails.
pub struct UpdateUserDataUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl UpdateUserDataUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, nickname: &str) -> Outcome<()> {
        let nickname = match Nickname::new(nickname) {
            Ok(nickname) => nickname,
            Err(error) => {
                tracing::debug!(error = %error, "nickname rejected");
                return Outcome::invalid_input(error.to_string());
            }
        };
        let cached = self.repository.user_data().borrow().clone();
        let Some(current) = cached else {
            return Outcome::invalid_input("no signed-in user");
        };

        let edited = User {
            nick_name: nickname.into(),
            ..current
        };
        self.repository.update_user_data(edited).await
    }
}

pub struct UpdateProfileImageUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl UpdateProfileImageUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, bytes: Vec<u8>, file_name: Option<String>) -> Outcome<()> {
        self.repository
            .update_profile_image(ProfileImage::new(bytes, file_name))
            .await
    }
}

pub struct DeleteAccountUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl DeleteAccountUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Outcome<()> {
        self.repository.delete_account().await
    }
}

/// Reads the profile shown on the "my page" screen from the cache.
pub struct GetMyPageDataUseCase {
    repository: Arc<dyn MemberRepository>,
}

impl GetMyPageDataUseCase {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    /// `Empty` when no profile has been cached yet.
    pub fn execute(&self) -> Outcome<User> {
        match self.repository.user_data().borrow().clone() {
            Some(user) => Outcome::Success(user),
            None => Outcome::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::{stream, StreamExt};
    use model::{MemberId, MockMemberRepository, INVALID_INPUT_CODE};
    use rstest::rstest;
    use tokio::sync::watch;

    use super::*;

    fn user(nick_name: &str) -> User {
        User {
            id: MemberId::new("member-1").unwrap(),
            nick_name: nick_name.into(),
            profile_image: "https://cdn.partyrun.online/p/1.png".into(),
        }
    }

    /// Repository whose cache holds `cached`. The sender is returned so the
    /// channel stays open for the duration of the test.
    fn repository_with_cache(
        cached: Option<User>,
    ) -> (MockMemberRepository, watch::Sender<Option<User>>) {
        let (sender, receiver) = watch::channel(cached);
        let mut repository = MockMemberRepository::new();
        repository
            .expect_user_data()
            .returning(move || receiver.clone());
        (repository, sender)
    }

    #[tokio::test]
    async fn rename_keeps_id_and_image_of_the_cached_profile() {
        let (mut repository, _cache) = repository_with_cache(Some(user("old")));
        repository
            .expect_update_user_data()
            .withf(|edited| *edited == user("new"))
            .times(1)
            .returning(|_| Outcome::Empty);

        let outcome = UpdateUserDataUseCase::new(Arc::new(repository))
            .execute("new")
            .await;

        assert_eq!(outcome, Outcome::Empty);
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_long("sevenchars")]
    #[tokio::test]
    async fn invalid_nickname_never_reaches_the_repository(#[case] nickname: &str) {
        let (mut repository, _cache) = repository_with_cache(Some(user("old")));
        repository.expect_update_user_data().never();

        let outcome = UpdateUserDataUseCase::new(Arc::new(repository))
            .execute(nickname)
            .await;

        assert_eq!(outcome.failure_code(), Some(INVALID_INPUT_CODE));
    }

    #[tokio::test]
    async fn rename_without_a_cached_profile_fails() {
        let (mut repository, _cache) = repository_with_cache(None);
        repository.expect_update_user_data().never();

        let outcome = UpdateUserDataUseCase::new(Arc::new(repository))
            .execute("runner")
            .await;

        assert_eq!(outcome, Outcome::invalid_input("no signed-in user"));
    }

    #[tokio::test]
    async fn server_rejection_is_returned_unchanged() {
        let (mut repository, _cache) = repository_with_cache(Some(user("old")));
        repository
            .expect_update_user_data()
            .returning(|_| Outcome::failure("duplicate name", 409));

        let outcome = UpdateUserDataUseCase::new(Arc::new(repository))
            .execute("taken")
            .await;

        assert_eq!(outcome, Outcome::failure("duplicate name", 409));
    }

    #[rstest]
    #[case::cached(Some(user("me")), Outcome::Success(user("me")))]
    #[case::nothing_cached(None, Outcome::Empty)]
    fn my_page_reads_the_cache(#[case] cached: Option<User>, #[case] expected: Outcome<User>) {
        let (repository, _cache) = repository_with_cache(cached);

        assert_eq!(GetMyPageDataUseCase::new(Arc::new(repository)).execute(), expected);
    }

    #[tokio::test]
    async fn image_upload_builds_the_profile_image() {
        let mut repository = MockMemberRepository::new();
        repository
            .expect_update_profile_image()
            .withf(|image| {
                image.bytes == [1, 2, 3]
                    && image.file_name.as_deref() == Some("me.png")
                    && image.content_type == ProfileImage::DEFAULT_CONTENT_TYPE
            })
            .times(1)
            .returning(|_| Outcome::Empty);

        let outcome = UpdateProfileImageUseCase::new(Arc::new(repository))
            .execute(vec![1, 2, 3], Some("me.png".into()))
            .await;

        assert_eq!(outcome, Outcome::Empty);
    }

    #[tokio::test]
    async fn refresh_passes_the_stream_through() {
        let mut repository = MockMemberRepository::new();
        repository.expect_refresh_user_data().times(1).returning(|| {
            Box::pin(stream::iter(vec![
                Outcome::Success(user("cached")),
                Outcome::failure("offline", -1),
            ]))
        });

        let outcomes: Vec<_> = RefreshUserDataUseCase::new(Arc::new(repository))
            .execute()
            .collect()
            .await;

        assert_eq!(
            outcomes,
            vec![Outcome::Success(user("cached")), Outcome::failure("offline", -1)]
        );
    }

    #[tokio::test]
    async fn remaining_operations_delegate() {
        let mut repository = MockMemberRepository::new();
        repository
            .expect_get_user_data()
            .returning(|| Outcome::Success(user("remote")));
        repository
            .expect_save_user_data()
            .withf(|saved| *saved == user("remote"))
            .returning(|_| Outcome::Empty);
        repository
            .expect_delete_account()
            .returning(|| Outcome::failure("server error", 500));
        let repository: Arc<dyn MemberRepository> = Arc::new(repository);

        assert_eq!(
            GetUserDataUseCase::new(Arc::clone(&repository)).execute().await,
            Outcome::Success(user("remote"))
        );
        assert_eq!(
            SaveUserDataUseCase::new(Arc::clone(&repository))
                .execute(user("remote"))
                .await,
            Outcome::Empty
        );
        assert_eq!(
            DeleteAccountUseCase::new(repository).execute().await,
            Outcome::failure("server error", 500)
        );
    }
}
