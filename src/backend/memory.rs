//! In-process `ConditionalKv` backed by a `HashMap`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{AttributeValue, Condition, ConditionalKv, Item, KvError};

/// Tables keyed by name, items keyed by the primary-key attribute value.
/// Every call takes the lock exactly once, so the precondition check and the
/// write it gates are atomic with respect to all other calls.
#[derive(Default)]
pub struct MemoryKv {
    tables: Mutex<HashMap<String, HashMap<String, Item>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(existing: Option<&Item>, condition: &Condition) -> Result<(), KvError> {
        let holds = match condition {
            Condition::KeyAbsent => existing.is_none(),
            Condition::KeyExists => existing.is_some(),
            Condition::AttributeEquals { attribute, value } => existing
                .and_then(|item| item.get(attribute))
                .map_or(false, |stored| stored == value),
        };
        if holds {
            Ok(())
        } else {
            Err(KvError::ConditionFailed)
        }
    }
}

#[async_trait]
impl ConditionalKv for MemoryKv {
    async fn insert(
        &self,
        table: &str,
        key_attribute: &str,
        item: Item,
        condition: Condition,
    ) -> Result<(), KvError> {
        let key = match item.get(key_attribute) {
            Some(AttributeValue::S(s)) => s.clone(),
            _ => {
                return Err(KvError::BadRequest(format!(
                    "item has no string attribute '{key_attribute}'"
                )))
            }
        };
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        Self::check(rows.get(&key), &condition)?;
        rows.insert(key, item);
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        _key_attribute: &str,
        key: &str,
        changes: Item,
        condition: Condition,
    ) -> Result<Item, KvError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();
        Self::check(rows.get(key), &condition)?;
        let row = rows
            .get_mut(key)
            .ok_or_else(|| KvError::BadRequest("update requires an existing item".to_string()))?;
        for (attribute, value) in changes {
            row.insert(attribute, value);
        }
        Ok(row.clone())
    }

    async fn query_eq(
        &self,
        table: &str,
        _key_attribute: &str,
        key: &str,
        filter_attribute: &str,
        filter_value: &AttributeValue,
    ) -> Result<Vec<Item>, KvError> {
        let tables = self.tables.lock().unwrap();
        let Some(rows) = tables.get(table) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .get(key)
            .filter(|item| item.get(filter_attribute) == Some(filter_value))
            .into_iter()
            .cloned()
            .collect())
    }
}
