//! PartyRun client repositories.
//!
//! Implements the repository ports of the [`model`] crate on top of its data
//! source ports, adding local caching and observable state.
//!
//! ## Architectural Layer
//!
//! **Data.** Depends on [`model`] only; it never sees HTTP. Each repository
//! owns its cached state exclusively. Observers receive read-only
//! `watch` receivers or outcome streams, never a handle they could write
//! through.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`shared_state`] | `SharedState` broadcast cell, `CachedSlot` persisted cell |
//! | [`store`] | `MemoryStore`, `JsonFileStore` |
//! | [`session`] | `SessionStore`: persisted tokens, the transport's credential source |
//! | [`repository`] | one repository implementation per domain area |
//!
//! ## Persisted slots
//!
//! [`slots`] names the file each cached value lives in when backed by
//! [`JsonFileStore`].

mod refresh;
pub mod repository;
pub mod session;
pub mod shared_state;
pub mod store;

pub use repository::{
    BattleRepositoryImpl, MatchRepositoryImpl, MemberRepositoryImpl, MyPageRepositoryImpl,
    SignInRepositoryImpl, SingleRepositoryImpl,
};
pub use session::SessionStore;
pub use shared_state::{CachedSlot, SharedState};
pub use store::{JsonFileStore, MemoryStore};

/// File names of the persisted slots inside the data directory.
pub mod slots {
    pub const SESSION: &str = "session.json";
    pub const USER: &str = "user.json";
    pub const RUNNING_HISTORY: &str = "running_history.json";
    pub const BATTLE_ID: &str = "battle_id.json";
    pub const SINGLE_ID: &str = "single_id.json";
}
