//! The signed-in session: the token pair issued at sign-in.
//!
//! [`SessionStore`] is the [`CredentialSource`] handed to the HTTP transport,
//! so every request made after sign-in carries the current access token.

use std::sync::Arc;

use model::{CredentialSource, Failure, LocalStore, SignInToken};

use crate::shared_state::CachedSlot;

pub struct SessionStore {
    slot: CachedSlot<SignInToken>,
}

impl SessionStore {
    /// Restores the session persisted by a previous run, if any.
    pub async fn load(store: Arc<dyn LocalStore<SignInToken>>) -> Self {
        Self {
            slot: CachedSlot::load(store).await,
        }
    }

    pub fn current(&self) -> Option<SignInToken> {
        self.slot.current()
    }

    pub fn is_signed_in(&self) -> bool {
        self.slot.current().is_some()
    }

    pub async fn save(&self, token: SignInToken) -> Result<(), Failure> {
        self.slot.replace(token).await
    }

    pub async fn clear(&self) -> Result<(), Failure> {
        self.slot.clear().await
    }
}

impl CredentialSource for SessionStore {
    fn access_token(&self) -> Option<String> {
        self.slot.current().map(|token| token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn token() -> SignInToken {
        SignInToken {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        }
    }

    #[tokio::test]
    async fn restored_session_supplies_the_access_token() {
        let session = SessionStore::load(Arc::new(MemoryStore::with_value(token()))).await;

        assert!(session.is_signed_in());
        assert_eq!(session.access_token(), Some("access".to_owned()));
    }

    #[tokio::test]
    async fn clearing_signs_out() {
        let store = Arc::new(MemoryStore::<SignInToken>::new());
        let session = SessionStore::load(store.clone()).await;

        session.save(token()).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(token()));

        session.clear().await.unwrap();
        assert_eq!(session.access_token(), None);
        assert_eq!(store.read().await.unwrap(), None);
    }
}
