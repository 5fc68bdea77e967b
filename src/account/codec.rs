//! Account record <-> backend attribute map

use super::types::Account;
use crate::backend::{AttributeValue, Item};
use crate::error::StoreError;
use std::collections::HashMap;

pub const PASSWORD_HASH_ATTR: &str = "password_hash";
pub const TAGS_ATTR: &str = "tags";

/// Encode an account under the configured primary-key attribute name.
/// Lossless: `decode` recovers the account exactly.
pub fn encode(account: &Account, key_attribute: &str) -> Item {
    let mut item = HashMap::new();
    item.insert(
        key_attribute.to_string(),
        AttributeValue::S(account.login.clone()),
    );
    item.insert(
        PASSWORD_HASH_ATTR.to_string(),
        AttributeValue::S(account.password_hash.clone()),
    );
    item.insert(TAGS_ATTR.to_string(), AttributeValue::M(account.tags.clone()));
    item
}

/// Decode a stored item. Total for anything `encode` produced; a missing or
/// mistyped required attribute is a schema violation and surfaces as
/// `StoreError::Corrupt`, never as a domain result.
pub fn decode(mut item: Item, key_attribute: &str) -> Result<Account, StoreError> {
    let login = take_string(&mut item, key_attribute)?;
    let password_hash = take_string(&mut item, PASSWORD_HASH_ATTR)?;
    let tags = match item.remove(TAGS_ATTR) {
        Some(AttributeValue::M(map)) => map,
        Some(_) => {
            return Err(StoreError::Corrupt(format!(
                "attribute '{TAGS_ATTR}' is not a map"
            )))
        }
        None => {
            return Err(StoreError::Corrupt(format!(
                "missing attribute '{TAGS_ATTR}'"
            )))
        }
    };
    Ok(Account {
        login,
        password_hash,
        tags,
    })
}

fn take_string(item: &mut Item, attribute: &str) -> Result<String, StoreError> {
    match item.remove(attribute) {
        Some(AttributeValue::S(s)) => Ok(s),
        Some(_) => Err(StoreError::Corrupt(format!(
            "attribute '{attribute}' is not a string"
        ))),
        None => Err(StoreError::Corrupt(format!(
            "missing attribute '{attribute}'"
        ))),
    }
}
