//! Account record and operation result variants

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored account record.
///
/// `login` is the unique key and never changes after creation.
/// `password_hash` is opaque: the store compares it for exact equality and
/// computes nothing from it. `tags` is replaced wholesale by `update_tags`,
/// never merged. Empty tag maps and empty-string hashes are valid and
/// round-trip exactly as supplied.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Account {
    pub login: String,
    pub password_hash: String,
    pub tags: HashMap<String, String>,
}

impl Account {
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password_hash: password_hash.into(),
            tags: HashMap::new(),
        }
    }
}

/// Outcome of `create_account`.
#[derive(Clone, Debug, PartialEq)]
pub enum CreateAccountResult {
    Created(Account),
    LoginAlreadyExists,
}

/// Outcome of `verify_password` and `change_password`.
///
/// `PasswordInvalid` covers both a missing login and a hash mismatch;
/// callers cannot tell the two apart.
#[derive(Clone, Debug, PartialEq)]
pub enum PasswordResult {
    Verified(Account),
    PasswordInvalid,
}

/// Outcome of `reset_password` and `update_tags`.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateResult {
    Updated(Account),
    AccountNotFound,
}
