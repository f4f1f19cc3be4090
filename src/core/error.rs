use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomesteadError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown intent type: {0}")]
    UnknownIntentType(String),

    #[error("Command not found: {0:?}")]
    CommandNotFound(crate::core::types::CommandId),

    #[error("Executor already registered for {0}")]
    DuplicateExecutor(String),

    #[error("No executor registered for {0}")]
    UnregisteredExecutor(String),

    #[error("Executor registry is sealed")]
    RegistrySealed,

    #[error("Handler execution failed: {0}")]
    HandlerExecution(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HomesteadError>;
