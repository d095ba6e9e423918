//! Best-effort introspector backed by the host process table.

use crate::introspect::{ProcessIntrospector, Result};
use crate::state::{Identity, Importance, ProcessInfo, TaskInfo};
use appwatch_introspect::{list_processes, ProcessState};

/// Introspector that reads the host process table.
///
/// Generic hosts expose neither a task/surface registry nor a UI-importance
/// signal, so this adapter approximates both: a live process whose name
/// matches the identity counts as one task surface, and a runnable process
/// maps to foreground importance. Good enough for a coarse liveness view;
/// tests of resolution semantics use `StaticIntrospector` instead.
pub struct HostIntrospector {
    identity: Identity,
}

impl HostIntrospector {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

impl ProcessIntrospector for HostIntrospector {
    fn own_tasks(&self) -> Result<Vec<TaskInfo>> {
        let tasks = list_processes()
            .into_iter()
            .filter(|p| p.name == self.identity.as_str())
            .map(|_| TaskInfo {
                owner: self.identity.clone(),
            })
            .collect();
        Ok(tasks)
    }

    fn running_processes(&self) -> Result<Vec<ProcessInfo>> {
        let processes = list_processes()
            .into_iter()
            .map(|p| ProcessInfo {
                name: p.name,
                importance: match p.state {
                    ProcessState::Running => Importance::Foreground,
                    ProcessState::Sleeping => Importance::Background,
                    ProcessState::Other => Importance::Gone,
                },
            })
            .collect();
        Ok(processes)
    }
}
