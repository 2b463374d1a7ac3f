//! Local persistence and credential ports.

use async_trait::async_trait;

use crate::StoreError;

/// A single persisted slot holding at most one `T`.
///
/// Implementations must make [`LocalStore::write`] all-or-nothing: a reader
/// sees either the previous value or the new one, never a partial write.
#[async_trait]
pub trait LocalStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Returns the stored value, or `None` if the slot has never been written
    /// (or was cleared).
    async fn read(&self) -> Result<Option<T>, StoreError>;

    async fn write(&self, value: &T) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

/// Supplies the bearer token attached to authenticated requests.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CredentialSource: Send + Sync {
    /// Returns the current access token, or `None` when signed out.
    fn access_token(&self) -> Option<String>;
}
