//! Data source ports: one trait per remote capability group.
//!
//! Implementations live in the `network` crate. Each method issues exactly one
//! remote call and returns whatever the response adapter produced; no failure
//! is caught or reinterpreted at this level.

use async_trait::async_trait;

use crate::{
    BattleId, BattleRunningRecord, ComprehensiveRunRecord, GoogleIdToken, MatchDecision,
    MatchStatus, Nickname, Outcome, ProfileImage, RunningDistance, SignInToken,
    SingleRunningRecord, User,
};

/// Exchanges a Google identity token for a PartyRun token pair.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SignInDataSource: Send + Sync {
    async fn sign_in(&self, id_token: &GoogleIdToken) -> Outcome<SignInToken>;
}

/// Reads and edits the signed-in member's profile.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MemberDataSource: Send + Sync {
    async fn get_user(&self) -> Outcome<User>;

    /// Succeeds with [`Outcome::Empty`].
    async fn update_nickname(&self, nickname: &Nickname) -> Outcome<()>;

    /// Uploads a pre-encoded image. Succeeds with [`Outcome::Empty`].
    async fn update_profile_image(&self, image: &ProfileImage) -> Outcome<()>;

    /// Succeeds with [`Outcome::Empty`].
    async fn delete_account(&self) -> Outcome<()>;
}

/// Battle matchmaking queue.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MatchDataSource: Send + Sync {
    async fn register(&self, distance: RunningDistance) -> Outcome<MatchStatus>;
    async fn decide(&self, decision: MatchDecision) -> Outcome<MatchStatus>;
    async fn cancel(&self) -> Outcome<MatchStatus>;
}

/// Battles currently in progress.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BattleDataSource: Send + Sync {
    /// Returns the battle the member is currently running in.
    async fn running_battle_id(&self) -> Outcome<BattleId>;
}

/// Aggregated history and totals for the "my page" screen.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MyPageDataSource: Send + Sync {
    async fn comprehensive_record(&self) -> Outcome<ComprehensiveRunRecord>;
    async fn single_history(&self) -> Outcome<Vec<SingleRunningRecord>>;
    async fn battle_history(&self) -> Outcome<Vec<BattleRunningRecord>>;
}
