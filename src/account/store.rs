//! Account store contract

use async_trait::async_trait;
use std::collections::HashMap;

use super::types::{Account, CreateAccountResult, PasswordResult, UpdateResult};
use crate::error::StoreError;

/// The five account operations, polymorphic over the backend.
///
/// Expected outcomes (login taken, wrong password, record missing) are
/// values inside the `Ok` variants; `Err(StoreError)` means the backend
/// call itself failed and carries no domain meaning.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert `account` only if no record with its login exists. Either the
    /// full record is written or nothing is.
    async fn create_account(&self, account: Account)
        -> Result<CreateAccountResult, StoreError>;

    /// Look up by login and compare the stored hash for exact equality.
    /// No side effect.
    async fn verify_password(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<PasswordResult, StoreError>;

    /// Atomically replace the password hash, gated on the current stored
    /// hash equalling `old_hash`.
    async fn change_password(
        &self,
        login: &str,
        old_hash: &str,
        new_hash: &str,
    ) -> Result<PasswordResult, StoreError>;

    /// Atomically replace the password hash, gated on existence only.
    async fn reset_password(
        &self,
        login: &str,
        new_hash: &str,
    ) -> Result<UpdateResult, StoreError>;

    /// Atomically replace the entire tag map, gated on existence only.
    /// A full replace, not a merge.
    async fn update_tags(
        &self,
        login: &str,
        tags: HashMap<String, String>,
    ) -> Result<UpdateResult, StoreError>;
}
