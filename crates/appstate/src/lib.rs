//! Application run-state derivation and change notification.
//!
//! This crate infers a discrete run state (foreground / background /
//! terminated) for a single application identity from live host signals,
//! and fans every event-driven re-resolution out to registered listeners.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  state.rs      - AppState, snapshot structs (pure)          │
//! │  resolver.rs   - run-state resolution logic (pure)          │
//! │  introspect.rs - collaborator trait for host snapshots      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/host.rs - process-table-backed introspector       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  lifecycle.rs - lifecycle event vocabulary and broadcast    │
//! │  monitor.rs   - async query, subscription, fan-out          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use appwatch_appstate::{AppStateMonitor, HostIntrospector, LifecycleEvent, LifecycleEvents};
//! use std::sync::Arc;
//!
//! let events = LifecycleEvents::default();
//! let identity = "com.example.app".into();
//! let mut monitor = AppStateMonitor::new(Arc::new(HostIntrospector::new(identity)), "com.example.app".into());
//!
//! monitor.subscribe(Arc::new(|state| {
//!     println!("app state: {state}");
//! }));
//! monitor.start(&events);
//!
//! events.emit(LifecycleEvent::Resume);
//! ```
//!
//! Introspection failures never reach listeners: the monitor maps them to
//! `AppState::Terminated`, so consumers see silent degradation to the most
//! conservative state instead of errors.

mod introspect;
mod lifecycle;
mod monitor;
mod resolver;
mod state;

pub mod platform;

// Re-export main types
pub use introspect::{
    IntrospectError, NullIntrospector, ProcessIntrospector, StaticIntrospector,
};
pub use lifecycle::{LifecycleEvent, LifecycleEvents, DEFAULT_EVENT_CAPACITY};
pub use monitor::{AppStateMonitor, StateCallback};
pub use platform::HostIntrospector;
pub use resolver::{owns_visible_task, resolve};
pub use state::{AppState, Identity, Importance, ProcessInfo, StateChange, TaskInfo};
