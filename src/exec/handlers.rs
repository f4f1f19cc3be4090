//! Per-entity handler contract and the in-memory store
//!
//! Handlers own persistence for one entity's record list. The core assumes
//! nothing about storage beyond uniquely-identified records with a creation
//! timestamp; real adapters live outside this crate. The in-memory
//! implementation backs the REPL binary and the integration tests.

use crate::core::clock::Clock;
use crate::core::error::{HomesteadError, Result};
use crate::core::types::{Entity, RecordId};
use crate::nlu::intent::Payload;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

/// Persistence adapter for one entity
///
/// Failures are ordinary recoverable errors; the dispatcher converts them
/// into user-facing results and they never escape that boundary.
#[async_trait]
pub trait EntityHandler: Send + Sync {
    /// Persist a new record and return it as stored
    async fn create(&self, payload: &Payload) -> Result<Value>;

    /// Apply field changes to an existing record and return it
    async fn update(&self, id: RecordId, changes: &Map<String, Value>) -> Result<Value>;

    /// Remove a record
    async fn delete(&self, id: RecordId) -> Result<()>;
}

/// In-memory record list for one entity
pub struct MemoryHandler {
    entity: Entity,
    records: Mutex<Vec<Value>>,
    clock: Arc<dyn Clock>,
}

impl MemoryHandler {
    pub fn new(entity: Entity, clock: Arc<dyn Clock>) -> Self {
        Self {
            entity,
            records: Mutex::new(Vec::new()),
            clock,
        }
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.lock().expect("record lock poisoned").clone()
    }

    fn storage_error(&self, message: &str) -> HomesteadError {
        HomesteadError::HandlerExecution(format!("{}: {}", self.entity, message))
    }
}

#[async_trait]
impl EntityHandler for MemoryHandler {
    async fn create(&self, payload: &Payload) -> Result<Value> {
        if payload.entity() != self.entity {
            return Err(self.storage_error("payload is for a different entity"));
        }
        let mut record = serde_json::to_value(payload)?;
        let object = record
            .as_object_mut()
            .ok_or_else(|| self.storage_error("payload did not serialize to an object"))?;
        object.remove("entity");
        object.insert("id".into(), json!(RecordId::new().to_string()));
        object.insert("created_at".into(), json!(self.clock.now().to_rfc3339()));

        let mut records = self.records.lock().expect("record lock poisoned");
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: RecordId, changes: &Map<String, Value>) -> Result<Value> {
        let mut records = self.records.lock().expect("record lock poisoned");
        let record = records
            .iter_mut()
            .find(|r| r["id"] == json!(id.to_string()))
            .ok_or_else(|| self.storage_error("no record with that id"))?;
        let object = record
            .as_object_mut()
            .ok_or_else(|| self.storage_error("stored record is not an object"))?;
        for (key, value) in changes {
            object.insert(key.clone(), value.clone());
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: RecordId) -> Result<()> {
        let mut records = self.records.lock().expect("record lock poisoned");
        let before = records.len();
        records.retain(|r| r["id"] != json!(id.to_string()));
        if records.len() == before {
            return Err(self.storage_error("no record with that id"));
        }
        Ok(())
    }
}
