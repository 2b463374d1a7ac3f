//! Repository implementations, one per domain area.

mod battle;
mod matching;
mod member;
mod my_page;
mod sign_in;
mod single;

pub use battle::BattleRepositoryImpl;
pub use matching::MatchRepositoryImpl;
pub use member::MemberRepositoryImpl;
pub use my_page::MyPageRepositoryImpl;
pub use sign_in::SignInRepositoryImpl;
pub use single::SingleRepositoryImpl;
