//! Run-state resolution logic.
//!
//! Pure domain logic - no I/O, no platform dependencies.

use crate::state::{AppState, Identity, ProcessInfo, TaskInfo};

/// True if any task in the snapshot is owned by `identity`.
///
/// Stage one of resolution, exposed separately so callers can skip the
/// process fetch entirely when no task matches.
pub fn owns_visible_task(tasks: &[TaskInfo], identity: &Identity) -> bool {
    tasks.iter().any(|task| &task.owner == identity)
}

/// Resolve the run state from a snapshot pair.
///
/// Two stages, short-circuiting:
/// 1. No task owned by `identity` (including an empty snapshot) -> `Terminated`.
/// 2. Empty process snapshot -> `Background`; a matching task without a live
///    process is degraded, not dead. Otherwise `Foreground` if any process
///    named after the identity is classified foreground, else `Background`.
///
/// Total and deterministic: every snapshot pair maps to exactly one state,
/// and only existence of a match matters, never snapshot order.
pub fn resolve(tasks: &[TaskInfo], processes: &[ProcessInfo], identity: &Identity) -> AppState {
    if !owns_visible_task(tasks, identity) {
        return AppState::Terminated;
    }

    if processes.is_empty() {
        return AppState::Background;
    }

    let foreground = processes
        .iter()
        .any(|p| p.importance.is_foreground() && p.name == identity.as_str());

    if foreground {
        AppState::Foreground
    } else {
        AppState::Background
    }
}
