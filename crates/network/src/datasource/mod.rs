//! Data source implementations: one per remote capability group.
//!
//! Each method shapes one request, sends it through the [`ApiClient`]
//! response adapter, and at most remaps the success payload from its wire
//! shape. Failures are returned exactly as the adapter produced them.
//!
//! [`ApiClient`]: crate::ApiClient

mod battle;
mod matching;
mod member;
mod my_page;
mod sign_in;

pub use battle::BattleDataSourceImpl;
pub use matching::MatchDataSourceImpl;
pub use member::MemberDataSourceImpl;
pub use my_page::MyPageDataSourceImpl;
pub use sign_in::SignInDataSourceImpl;
