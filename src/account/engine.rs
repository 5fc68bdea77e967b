//! Conditional write engine.
//!
//! Every operation is exactly one backend call carrying a server-evaluated
//! precondition, awaited inside the configured timeout bound. The backend's
//! precondition-failure signal is the expected failure path and maps to the
//! operation's domain variant; every other failure is fatal and propagates
//! untouched.

use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, warn};

use super::codec::{self, PASSWORD_HASH_ATTR, TAGS_ATTR};
use super::store::AccountStore;
use super::types::{Account, CreateAccountResult, PasswordResult, UpdateResult};
use crate::backend::{AttributeValue, Condition, ConditionalKv, KvError};
use crate::config::StoreConfig;
use crate::error::StoreError;

/// `AccountStore` over any conditional key-value backend.
///
/// Stateless across calls: no cache, no locks, no retries. Atomicity per
/// login key comes entirely from the backend's conditional primitive.
pub struct KvAccountStore<B> {
    backend: B,
    config: StoreConfig,
}

/// A backend response with the precondition signal already separated out.
/// Getting this split right is what keeps domain outcomes and infrastructure
/// failures disjoint.
enum Outcome<T> {
    Done(T),
    PreconditionFailed,
}

impl<B: ConditionalKv> KvAccountStore<B> {
    pub fn new(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    /// Await one backend call inside the timeout bound and classify the
    /// response. On expiry the in-flight future is dropped, cancelling the
    /// call, and the operation fails with `StoreError::Timeout`.
    async fn run<T>(
        &self,
        fut: impl Future<Output = Result<T, KvError>> + Send,
    ) -> Result<Outcome<T>, StoreError> {
        let bound = self.config.op_timeout();
        match tokio::time::timeout(bound, fut).await {
            Err(_) => {
                warn!(table = %self.config.table, ?bound, "backend call timed out");
                Err(StoreError::Timeout(bound))
            }
            Ok(Ok(value)) => Ok(Outcome::Done(value)),
            Ok(Err(KvError::ConditionFailed)) => Ok(Outcome::PreconditionFailed),
            Ok(Err(err)) => Err(StoreError::Backend(err)),
        }
    }

    fn hash_attr(hash: &str) -> AttributeValue {
        AttributeValue::S(hash.to_string())
    }
}

#[async_trait]
impl<B: ConditionalKv> AccountStore for KvAccountStore<B> {
    async fn create_account(
        &self,
        account: Account,
    ) -> Result<CreateAccountResult, StoreError> {
        debug!(login = %account.login, "create_account");
        let item = codec::encode(&account, &self.config.key_attribute);
        let call = self.backend.insert(
            &self.config.table,
            &self.config.key_attribute,
            item,
            Condition::KeyAbsent,
        );
        match self.run(call).await? {
            Outcome::Done(()) => Ok(CreateAccountResult::Created(account)),
            Outcome::PreconditionFailed => {
                debug!(login = %account.login, "create_account: login already exists");
                Ok(CreateAccountResult::LoginAlreadyExists)
            }
        }
    }

    async fn verify_password(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<PasswordResult, StoreError> {
        debug!(login, "verify_password");
        // Conditional read: the server filters on login AND hash equality,
        // so a missing login and a wrong hash both come back as zero rows.
        let filter = Self::hash_attr(password_hash);
        let call = self.backend.query_eq(
            &self.config.table,
            &self.config.key_attribute,
            login,
            PASSWORD_HASH_ATTR,
            &filter,
        );
        let rows = match self.run(call).await? {
            Outcome::Done(rows) => rows,
            // Reads carry no precondition, so this signal is an
            // out-of-contract backend response, not a domain outcome.
            Outcome::PreconditionFailed => {
                return Err(StoreError::Backend(KvError::ConditionFailed))
            }
        };
        // A unique key yields at most one row; take the first if a backend
        // ever returns more.
        match rows.into_iter().next() {
            Some(item) => Ok(PasswordResult::Verified(codec::decode(
                item,
                &self.config.key_attribute,
            )?)),
            None => Ok(PasswordResult::PasswordInvalid),
        }
    }

    async fn change_password(
        &self,
        login: &str,
        old_hash: &str,
        new_hash: &str,
    ) -> Result<PasswordResult, StoreError> {
        debug!(login, "change_password");
        let mut changes = HashMap::new();
        changes.insert(PASSWORD_HASH_ATTR.to_string(), Self::hash_attr(new_hash));
        // Equality on the stored hash implies existence, so one condition
        // gates both "record missing" and "hash differs".
        let condition = Condition::AttributeEquals {
            attribute: PASSWORD_HASH_ATTR.to_string(),
            value: Self::hash_attr(old_hash),
        };
        let call = self.backend.update(
            &self.config.table,
            &self.config.key_attribute,
            login,
            changes,
            condition,
        );
        match self.run(call).await? {
            Outcome::Done(item) => Ok(PasswordResult::Verified(codec::decode(
                item,
                &self.config.key_attribute,
            )?)),
            Outcome::PreconditionFailed => Ok(PasswordResult::PasswordInvalid),
        }
    }

    async fn reset_password(
        &self,
        login: &str,
        new_hash: &str,
    ) -> Result<UpdateResult, StoreError> {
        debug!(login, "reset_password");
        let mut changes = HashMap::new();
        changes.insert(PASSWORD_HASH_ATTR.to_string(), Self::hash_attr(new_hash));
        let call = self.backend.update(
            &self.config.table,
            &self.config.key_attribute,
            login,
            changes,
            Condition::KeyExists,
        );
        match self.run(call).await? {
            Outcome::Done(item) => Ok(UpdateResult::Updated(codec::decode(
                item,
                &self.config.key_attribute,
            )?)),
            Outcome::PreconditionFailed => Ok(UpdateResult::AccountNotFound),
        }
    }

    async fn update_tags(
        &self,
        login: &str,
        tags: HashMap<String, String>,
    ) -> Result<UpdateResult, StoreError> {
        debug!(login, "update_tags");
        let mut changes = HashMap::new();
        // The M attribute replaces the stored one wholesale: full replace,
        // not a merge.
        changes.insert(TAGS_ATTR.to_string(), AttributeValue::M(tags));
        let call = self.backend.update(
            &self.config.table,
            &self.config.key_attribute,
            login,
            changes,
            Condition::KeyExists,
        );
        match self.run(call).await? {
            Outcome::Done(item) => Ok(UpdateResult::Updated(codec::decode(
                item,
                &self.config.key_attribute,
            )?)),
            Outcome::PreconditionFailed => Ok(UpdateResult::AccountNotFound),
        }
    }
}
