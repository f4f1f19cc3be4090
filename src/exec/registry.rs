//! Executor registry
//!
//! Write-once map from command type to executor, populated at startup and
//! sealed before any dispatch. Sealing is enforced: registration after
//! `seal` fails, and lookups for unregistered types fail loudly instead of
//! returning a no-op.

use crate::command::types::{Command, CommandKind};
use crate::core::error::{HomesteadError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// What an executor reports back on success
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub message: String,
    pub payload: Option<serde_json::Value>,
}

/// Performs the actual state mutation for one command type
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &Command) -> Result<ExecutionOutcome>;
}

impl std::fmt::Debug for dyn CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CommandExecutor")
    }
}

/// Append-only executor map, frozen by [`ExecutorRegistry::seal`]
pub struct ExecutorRegistry {
    executors: HashMap<CommandKind, Arc<dyn CommandExecutor>>,
    sealed: bool,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            executors: HashMap::new(),
            sealed: false,
        }
    }

    /// Register the executor for one command type
    pub fn register(
        &mut self,
        kind: CommandKind,
        executor: Arc<dyn CommandExecutor>,
    ) -> Result<()> {
        if self.sealed {
            return Err(HomesteadError::RegistrySealed);
        }
        if self.executors.contains_key(&kind) {
            return Err(HomesteadError::DuplicateExecutor(kind.name()));
        }
        tracing::debug!(kind = %kind, "executor registered");
        self.executors.insert(kind, executor);
        Ok(())
    }

    /// Freeze the registry for the life of the process
    pub fn seal(&mut self) {
        self.sealed = true;
        tracing::debug!(executors = self.executors.len(), "executor registry sealed");
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn get(&self, kind: CommandKind) -> Result<&Arc<dyn CommandExecutor>> {
        self.executors
            .get(&kind)
            .ok_or_else(|| HomesteadError::UnregisteredExecutor(kind.name()))
    }
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Entity, Operation};

    struct NoopExecutor;

    #[async_trait]
    impl CommandExecutor for NoopExecutor {
        async fn execute(&self, _command: &Command) -> Result<ExecutionOutcome> {
            Ok(ExecutionOutcome {
                message: "ok".into(),
                payload: None,
            })
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ExecutorRegistry::new();
        let kind = CommandKind::new(Entity::Task, Operation::Create);
        registry.register(kind, Arc::new(NoopExecutor)).unwrap();
        let err = registry.register(kind, Arc::new(NoopExecutor)).unwrap_err();
        assert!(matches!(err, HomesteadError::DuplicateExecutor(_)));
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let mut registry = ExecutorRegistry::new();
        registry.seal();
        let kind = CommandKind::new(Entity::Task, Operation::Create);
        let err = registry.register(kind, Arc::new(NoopExecutor)).unwrap_err();
        assert!(matches!(err, HomesteadError::RegistrySealed));
    }

    #[test]
    fn test_unregistered_lookup_fails_loudly() {
        let registry = ExecutorRegistry::new();
        let kind = CommandKind::new(Entity::Pet, Operation::Delete);
        let err = registry.get(kind).unwrap_err();
        assert!(matches!(err, HomesteadError::UnregisteredExecutor(_)));
    }
}
