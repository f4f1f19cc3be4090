//! Execution: registry, dispatcher and handler contracts
//!
//! Populated once at startup: build handlers, register executors, seal the
//! registry, then hand it to the dispatcher for the life of the process.

pub mod dispatch;
pub mod handlers;
pub mod registry;

pub use dispatch::{register_entity, DispatchResult, Dispatcher, HandlerExecutor};
pub use handlers::{EntityHandler, MemoryHandler};
pub use registry::{CommandExecutor, ExecutionOutcome, ExecutorRegistry};
