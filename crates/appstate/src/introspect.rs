//! Collaborator trait for host task/process introspection.
//!
//! The monitor never talks to the host directly; it goes through this trait,
//! which keeps the resolution logic testable and the platform adapter
//! swappable.

use crate::state::{ProcessInfo, TaskInfo};

#[derive(Debug, thiserror::Error)]
pub enum IntrospectError {
    #[error("introspection unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IntrospectError>;

/// Source of task and process snapshots.
///
/// Both calls may fail; failures surface as recoverable errors and are
/// absorbed by the caller, never propagated to listeners.
pub trait ProcessIntrospector: Send + Sync {
    /// Tasks currently owned by the monitored application.
    fn own_tasks(&self) -> Result<Vec<TaskInfo>>;

    /// All processes the host currently reports.
    fn running_processes(&self) -> Result<Vec<ProcessInfo>>;
}

/// Null implementation: reports an empty world.
///
/// Resolution against it is always `Terminated`.
pub struct NullIntrospector;

impl ProcessIntrospector for NullIntrospector {
    fn own_tasks(&self) -> Result<Vec<TaskInfo>> {
        Ok(Vec::new())
    }

    fn running_processes(&self) -> Result<Vec<ProcessInfo>> {
        Ok(Vec::new())
    }
}

/// Fixed-snapshot implementation for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticIntrospector {
    pub tasks: Vec<TaskInfo>,
    pub processes: Vec<ProcessInfo>,
}

impl StaticIntrospector {
    pub fn new(tasks: Vec<TaskInfo>, processes: Vec<ProcessInfo>) -> Self {
        Self { tasks, processes }
    }
}

impl ProcessIntrospector for StaticIntrospector {
    fn own_tasks(&self) -> Result<Vec<TaskInfo>> {
        Ok(self.tasks.clone())
    }

    fn running_processes(&self) -> Result<Vec<ProcessInfo>> {
        Ok(self.processes.clone())
    }
}
