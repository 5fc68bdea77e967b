//! Conditional key-value backend contract.
//!
//! The store sits on top of a single remote table keyed by one unique string
//! attribute. The backend must evaluate write preconditions atomically
//! against current stored state and reject with a distinguishable signal
//! (`KvError::ConditionFailed`) when a precondition is false.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub mod memory;

/// Backend-native attribute value: a plain string or a string-to-string map.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum AttributeValue {
    S(String),
    M(HashMap<String, String>),
}

/// A stored record in the backend's representation.
pub type Item = HashMap<String, AttributeValue>;

/// Server-evaluated precondition attached to a write.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// No record is stored under the key.
    KeyAbsent,
    /// A record is stored under the key.
    KeyExists,
    /// A record exists and its named attribute equals the value exactly.
    AttributeEquals {
        attribute: String,
        value: AttributeValue,
    },
}

#[derive(Error, Debug)]
pub enum KvError {
    /// The server evaluated a write's precondition to false. This is the
    /// one variant the engine maps to a domain outcome; everything else
    /// propagates as a fatal failure.
    #[error("condition evaluated false")]
    ConditionFailed,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed request: {0}")]
    BadRequest(String),
    #[error("not authorized: {0}")]
    Unauthorized(String),
}

/// Point operations against one table. Implementations must be cancel-safe:
/// dropping a returned future abandons the call.
#[async_trait]
pub trait ConditionalKv: Send + Sync {
    /// Insert a full item, gated on `condition`. The item's key is the value
    /// of its `key_attribute` attribute.
    async fn insert(
        &self,
        table: &str,
        key_attribute: &str,
        item: Item,
        condition: Condition,
    ) -> Result<(), KvError>;

    /// Apply attribute changes to the item under `key`, gated on `condition`.
    /// Each changed attribute replaces the stored one wholesale. Returns the
    /// post-update item.
    async fn update(
        &self,
        table: &str,
        key_attribute: &str,
        key: &str,
        changes: Item,
        condition: Condition,
    ) -> Result<Item, KvError>;

    /// Point read by key with an additional attribute-equality filter.
    /// Returns zero or more matching items.
    async fn query_eq(
        &self,
        table: &str,
        key_attribute: &str,
        key: &str,
        filter_attribute: &str,
        filter_value: &AttributeValue,
    ) -> Result<Vec<Item>, KvError>;
}
