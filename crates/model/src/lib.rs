//! Core domain for the PartyRun client.
//!
//! This crate contains the [`Outcome`] type every layer speaks, the domain
//! values carried inside it, and the port traits that the infrastructure and
//! data crates implement. It performs no I/O.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** `network` implements the data source ports
//! over HTTP, `data` implements the repository ports on top of them, and
//! `usecase` consumes the repository ports.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`outcome`] | `Outcome`, `Failure`, reserved failure codes |
//! | [`identifiers`] | Newtype identifiers (`MemberId`, `BattleId`, ...) |
//! | [`types`] | Domain values (`User`, `SignInToken`, running records, ...) |
//! | [`errors`] | Local (non-remote) error types |
//! | [`remote`] | Data source ports |
//! | [`repository`] | Repository ports |
//! | [`storage`] | Local store and credential ports |

pub mod errors;
pub mod identifiers;
pub mod outcome;
pub mod remote;
pub mod repository;
pub mod storage;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{BlankIdentifierError, NicknameError, StoreError};
pub use identifiers::{BattleId, MemberId, RequestId, SingleId};
pub use outcome::{
    Failure, Outcome, OutcomeStream, INVALID_INPUT_CODE, STORAGE_FAILURE_CODE,
    TRANSPORT_FAILURE_CODE,
};
pub use remote::{
    BattleDataSource, MatchDataSource, MemberDataSource, MyPageDataSource, SignInDataSource,
};
pub use repository::{
    BattleRepository, MatchRepository, MemberRepository, MyPageRepository, SignInRepository,
    SingleRepository,
};
pub use storage::{CredentialSource, LocalStore};
pub use types::{
    BattleRunningRecord, CombinedRunningHistory, ComprehensiveRunRecord, GoogleIdToken,
    MatchDecision, MatchStatus, Nickname, ProfileImage, RunningDistance, RunningTime,
    SignInToken, SingleRunningRecord, User,
};

#[cfg(any(test, feature = "testing"))]
pub use remote::{
    MockBattleDataSource, MockMatchDataSource, MockMemberDataSource, MockMyPageDataSource,
    MockSignInDataSource,
};
#[cfg(any(test, feature = "testing"))]
pub use repository::{
    MockBattleRepository, MockMatchRepository, MockMemberRepository, MockMyPageRepository,
    MockSignInRepository, MockSingleRepository,
};
#[cfg(any(test, feature = "testing"))]
pub use storage::MockCredentialSource;
