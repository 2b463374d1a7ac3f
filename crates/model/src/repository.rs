//! Repository ports consumed by use-cases.
//!
//! A repository owns one domain area. Operations come in two shapes:
//!
//! - **request/response**: `async fn` returning one [`Outcome`];
//! - **streamed**: a plain `fn` returning an [`OutcomeStream`] (cached value
//!   first when one exists, then the result of a remote refresh) or a
//!   [`watch::Receiver`] of already-validated cached values.
//!
//! Implementations live in the `data` crate.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::{
    BattleId, BattleRunningRecord, CombinedRunningHistory, ComprehensiveRunRecord, Failure,
    GoogleIdToken, MatchDecision, MatchStatus, Outcome, OutcomeStream, ProfileImage,
    RunningDistance, SignInToken, SingleId, SingleRunningRecord, User,
};

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SignInRepository: Send + Sync {
    /// Signs in with a Google identity token and keeps the issued tokens as the
    /// current session.
    ///
    /// A missing or blank token fails with [`crate::INVALID_INPUT_CODE`]
    /// without contacting the server.
    ///
    /// Signing in succeeds only once the session is stored. When the server
    /// issues tokens but saving them fails, the result is a
    /// [`crate::STORAGE_FAILURE_CODE`] failure, the tokens are dropped and the
    /// previous session is left as it was.
    async fn sign_in_with_google_token(&self, id_token: &GoogleIdToken) -> Outcome<SignInToken>;

    /// Forgets the current session. Succeeds with [`Outcome::Empty`].
    async fn sign_out(&self) -> Outcome<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Observes the cached profile. `None` until a profile has been saved.
    fn user_data(&self) -> watch::Receiver<Option<User>>;

    /// Fetches the profile from the server without touching the cache.
    async fn get_user_data(&self) -> Outcome<User>;

    /// Emits the cached profile (if any), then the refreshed one or the
    /// refresh failure.
    fn refresh_user_data(&self) -> OutcomeStream<User>;

    /// Replaces the cached profile. Succeeds with [`Outcome::Empty`].
    async fn save_user_data(&self, user: User) -> Outcome<()>;

    /// Sends the edited profile to the server and, on success, caches it.
    async fn update_user_data(&self, user: User) -> Outcome<()>;

    async fn update_profile_image(&self, image: ProfileImage) -> Outcome<()>;

    /// Deletes the account and, on success, clears the cached profile.
    async fn delete_account(&self) -> Outcome<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn register_match(&self, distance: RunningDistance) -> Outcome<MatchStatus>;
    async fn accept_match(&self, decision: MatchDecision) -> Outcome<MatchStatus>;
    async fn cancel_match(&self) -> Outcome<MatchStatus>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BattleRepository: Send + Sync {
    /// Asks the server which battle is currently running.
    async fn get_battle_id(&self) -> Outcome<BattleId>;

    /// Remembers the battle whose details should be shown next.
    async fn save_battle_id(&self, battle_id: BattleId) -> Outcome<()>;

    fn saved_battle_id(&self) -> Option<BattleId>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SingleRepository: Send + Sync {
    /// Remembers the solo run whose details should be shown next.
    async fn save_single_id(&self, single_id: SingleId) -> Outcome<()>;

    fn saved_single_id(&self) -> Option<SingleId>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MyPageRepository: Send + Sync {
    async fn get_comprehensive_run_record(&self) -> Outcome<ComprehensiveRunRecord>;

    /// Refreshes the single-mode half of the running history.
    ///
    /// Emits the cached half first when the history has been loaded before.
    /// A failure leaves the battle half untouched.
    fn update_single_history(&self) -> OutcomeStream<Vec<SingleRunningRecord>>;

    /// Refreshes the battle-mode half of the running history.
    fn update_battle_history(&self) -> OutcomeStream<Vec<BattleRunningRecord>>;

    /// Observes the aggregated history: the cached aggregate immediately, then
    /// every later update as [`Outcome::Success`] and every later refresh
    /// failure as [`Outcome::Failure`]. Never ends on its own.
    fn running_history(&self) -> OutcomeStream<CombinedRunningHistory>;

    /// Last known good aggregate, if any half has ever been loaded.
    fn current_history(&self) -> Option<CombinedRunningHistory>;

    /// Most recent refresh failure, kept until a later failure replaces it.
    fn last_history_failure(&self) -> Option<Failure>;

    fn subscribe_history_failures(&self) -> watch::Receiver<Option<Failure>>;
}
