//! PartyRun client use-cases.
//!
//! Each use case performs exactly one operation: it shapes its parameters,
//! calls one repository, and returns the repository's [`model::Outcome`] (or
//! outcome stream) unchanged. Local validation failures are reported as
//! [`model::INVALID_INPUT_CODE`] failures before any repository call.
//!
//! ## Architectural Layer
//!
//! **Domain.** Depends only on the repository ports in [`model`]; concrete
//! repositories are injected as `Arc<dyn …>` by the composition root.
//!
//! ## Module Layout
//!
//! | Module | Use cases |
//! |--------|-----------|
//! | [`sign_in`] | sign in with Google, sign out |
//! | [`member`] | profile read, refresh, save, rename, image upload, account deletion, my-page profile |
//! | [`matching`] | register, accept/decline, cancel |
//! | [`battle`] | running battle id, battle and solo run selection |
//! | [`my_page`] | lifetime totals, history refreshes, combined history |

use std::sync::Arc;

use model::{
    BattleRepository, MatchRepository, MemberRepository, MyPageRepository, SignInRepository,
    SingleRepository,
};

pub mod battle;
pub mod matching;
pub mod member;
pub mod my_page;
pub mod sign_in;

pub use battle::{GetBattleIdUseCase, SaveBattleIdUseCase, SaveSingleIdUseCase};
pub use matching::{CancelMatchUseCase, RegisterMatchUseCase, SendAcceptMatchUseCase};
pub use member::{
    DeleteAccountUseCase, GetMyPageDataUseCase, GetUserDataUseCase, RefreshUserDataUseCase,
    SaveUserDataUseCase, UpdateProfileImageUseCase, UpdateUserDataUseCase,
};
pub use my_page::{
    GetComprehensiveRunRecordUseCase, GetRunningHistoryUseCase, UpdateBattleRunningHistoryUseCase,
    UpdateSingleRunningHistoryUseCase,
};
pub use sign_in::{SignInWithGoogleUseCase, SignOutUseCase};

/// Repository handles the use cases are built from.
#[derive(Clone)]
pub struct Repositories {
    pub sign_in: Arc<dyn SignInRepository>,
    pub member: Arc<dyn MemberRepository>,
    pub matching: Arc<dyn MatchRepository>,
    pub battle: Arc<dyn BattleRepository>,
    pub single: Arc<dyn SingleRepository>,
    pub my_page: Arc<dyn MyPageRepository>,
}

/// Every use case, wired to one set of repositories.
pub struct UseCases {
    pub sign_in_with_google: SignInWithGoogleUseCase,
    pub sign_out: SignOutUseCase,
    pub get_user_data: GetUserDataUseCase,
    pub save_user_data: SaveUserDataUseCase,
    pub refresh_user_data: RefreshUserDataUseCase,
    pub update_user_data: UpdateUserDataUseCase,
    pub update_profile_image: UpdateProfileImageUseCase,
    pub delete_account: DeleteAccountUseCase,
    pub get_my_page_data: GetMyPageDataUseCase,
    pub register_match: RegisterMatchUseCase,
    pub send_accept_match: SendAcceptMatchUseCase,
    pub cancel_match: CancelMatchUseCase,
    pub get_battle_id: GetBattleIdUseCase,
    pub save_battle_id: SaveBattleIdUseCase,
    pub save_single_id: SaveSingleIdUseCase,
    pub get_comprehensive_run_record: GetComprehensiveRunRecordUseCase,
    pub update_single_running_history: UpdateSingleRunningHistoryUseCase,
    pub update_battle_running_history: UpdateBattleRunningHistoryUseCase,
    pub get_running_history: GetRunningHistoryUseCase,
}

impl UseCases {
    pub fn new(repositories: Repositories) -> Self {
        let Repositories {
            sign_in,
            member,
            matching,
            battle,
            single,
            my_page,
        } = repositories;

        Self {
            sign_in_with_google: SignInWithGoogleUseCase::new(Arc::clone(&sign_in)),
            sign_out: SignOutUseCase::new(sign_in),
            get_user_data: GetUserDataUseCase::new(Arc::clone(&member)),
            save_user_data: SaveUserDataUseCase::new(Arc::clone(&member)),
            refresh_user_data: RefreshUserDataUseCase::new(Arc::clone(&member)),
            update_user_data: UpdateUserDataUseCase::new(Arc::clone(&member)),
            update_profile_image: UpdateProfileImageUseCase::new(Arc::clone(&member)),
            delete_account: DeleteAccountUseCase::new(Arc::clone(&member)),
            get_my_page_data: GetMyPageDataUseCase::new(member),
            register_match: RegisterMatchUseCase::new(Arc::clone(&matching)),
            send_accept_match: SendAcceptMatchUseCase::new(Arc::clone(&matching)),
            cancel_match: CancelMatchUseCase::new(matching),
            get_battle_id: GetBattleIdUseCase::new(Arc::clone(&battle)),
            save_battle_id: SaveBattleIdUseCase::new(battle),
            save_single_id: SaveSingleIdUseCase::new(single),
            get_comprehensive_run_record: GetComprehensiveRunRecordUseCase::new(Arc::clone(
                &my_page,
            )),
            update_single_running_history: UpdateSingleRunningHistoryUseCase::new(Arc::clone(
                &my_page,
            )),
            update_battle_running_history: UpdateBattleRunningHistoryUseCase::new(Arc::clone(
                &my_page,
            )),
            get_running_history: GetRunningHistoryUseCase::new(my_page),
        }
    }
}
