//! Low-level host process listing.
//!
//! Thin wrapper around `sysinfo` that flattens the host process table into
//! plain DTOs. Higher layers decide what the listing means; this crate only
//! reports what the host shows.

use sysinfo::{ProcessStatus, ProcessesToUpdate, System};

/// Coarse scheduler state of a host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Currently scheduled / runnable.
    Running,
    /// Sleeping or otherwise idle.
    Sleeping,
    /// Anything else the host reports (zombie, stopped, unknown).
    Other,
}

impl From<ProcessStatus> for ProcessState {
    fn from(status: ProcessStatus) -> Self {
        match status {
            ProcessStatus::Run => ProcessState::Running,
            ProcessStatus::Sleep | ProcessStatus::Idle => ProcessState::Sleeping,
            _ => ProcessState::Other,
        }
    }
}

/// One entry of the host process table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SystemProcess {
    pub pid: u32,
    pub name: String,
    pub state: ProcessState,
}

/// List all processes the host currently reports.
///
/// Refreshes the process table on every call; callers trade staleness for
/// cost by deciding how often to invoke it.
pub fn list_processes() -> Vec<SystemProcess> {
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::All, true);

    let processes: Vec<SystemProcess> = sys
        .processes()
        .iter()
        .map(|(pid, process)| SystemProcess {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().into_owned(),
            state: process.status().into(),
        })
        .collect();

    tracing::trace!(count = processes.len(), "listed host processes");
    processes
}
