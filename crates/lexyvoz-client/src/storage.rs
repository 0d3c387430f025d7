//! Persisted credential boundary.
//!
//! The platform supplies a secure key-value store (keychain, encrypted
//! preferences). This module defines the async trait the rest of the
//! system programs against, plus helpers that pack and unpack the two
//! well-known entries: the raw token and the JSON user blob.
//!
//! Implementations must tolerate underlying storage unavailability by
//! returning errors rather than panicking; callers treat any failure on
//! the bootstrap path as "no session".

use async_trait::async_trait;
use lexyvoz_core::{AuthError, UserProfile};

/// Key under which the credential token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Key under which the user profile blob is persisted.
pub const USER_KEY: &str = "user";

/// Asynchronous secure key-value store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Delete a value. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), AuthError>;
}

/// Credentials as read back from the store. Optimistic and unverified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Persisted token, if any.
    pub token: Option<String>,
    /// Persisted user profile, if any.
    pub user: Option<UserProfile>,
}

/// Read token and user blob from the store.
///
/// A corrupt user blob degrades to `None` rather than failing the load;
/// the token alone is enough to attempt verification.
pub async fn load_credentials(
    store: &dyn CredentialStore,
) -> Result<StoredCredentials, AuthError> {
    let token = store.get(TOKEN_KEY).await?;
    let user = store
        .get(USER_KEY)
        .await?
        .and_then(|blob| serde_json::from_str::<UserProfile>(&blob).ok());
    Ok(StoredCredentials { token, user })
}

/// Persist token and user profile.
pub async fn save_credentials(
    store: &dyn CredentialStore,
    token: &str,
    user: &UserProfile,
) -> Result<(), AuthError> {
    let blob = serde_json::to_string(user)
        .map_err(|e| AuthError::Storage { reason: format!("user blob encode: {e}") })?;
    store.set(TOKEN_KEY, token).await?;
    store.set(USER_KEY, &blob).await?;
    Ok(())
}

/// Delete both persisted entries (best-effort; first failure wins).
pub async fn clear_credentials(store: &dyn CredentialStore) -> Result<(), AuthError> {
    store.delete(TOKEN_KEY).await?;
    store.delete(USER_KEY).await?;
    Ok(())
}
