//! Stateful monitor: on-demand state query, lifecycle subscription, and
//! listener fan-out.

use crate::introspect::{self, ProcessIntrospector};
use crate::lifecycle::LifecycleEvents;
use crate::resolver;
use crate::state::{AppState, Identity, StateChange};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Callback type for state change notifications.
pub type StateCallback = Arc<dyn Fn(AppState) + Send + Sync + 'static>;

/// Monitors the run state of one application identity.
///
/// Owns its subscription and listener set explicitly; construct one per
/// monitored identity and call [`start`](Self::start) to begin observing
/// lifecycle events.
pub struct AppStateMonitor {
    introspector: Arc<dyn ProcessIntrospector>,
    identity: Identity,
    listeners: Arc<Mutex<Vec<StateCallback>>>,
    last_change: Arc<Mutex<StateChange>>,
    loop_handle: Option<JoinHandle<()>>,
}

impl AppStateMonitor {
    pub fn new(introspector: Arc<dyn ProcessIntrospector>, identity: Identity) -> Self {
        Self {
            introspector,
            identity,
            listeners: Arc::new(Mutex::new(Vec::new())),
            last_change: Arc::new(Mutex::new(StateChange::now(AppState::Terminated))),
            loop_handle: None,
        }
    }

    /// Resolve the current run state from fresh snapshots.
    ///
    /// Never fails: introspection errors resolve to `Terminated`, so a
    /// consumer cannot distinguish "confirmed terminated" from "could not
    /// determine state". Does not touch the cached state; only event-driven
    /// resolutions do.
    pub async fn current_state(&self) -> AppState {
        resolve_current(Arc::clone(&self.introspector), self.identity.clone()).await
    }

    /// Register a callback for future event-driven resolutions.
    ///
    /// Registrations are retained independently: subscribing the same
    /// callback twice delivers every notification twice. Fan-out runs in
    /// registration order.
    pub fn subscribe(&self, callback: StateCallback) {
        self.listeners
            .lock()
            .expect("listener mutex poisoned")
            .push(callback);
    }

    /// Last state resolved by the event loop; `Terminated` before any
    /// resolution has completed.
    pub fn last_known_state(&self) -> AppState {
        self.last_change.lock().expect("state mutex poisoned").state
    }

    /// Timestamped record of the last event-driven resolution.
    pub fn last_change(&self) -> StateChange {
        self.last_change
            .lock()
            .expect("state mutex poisoned")
            .clone()
    }

    /// Subscribe to the lifecycle stream and start resolving on events.
    pub fn start(&mut self, events: &LifecycleEvents) {
        if self.is_running() {
            tracing::warn!("AppStateMonitor already running");
            return;
        }

        let mut rx = events.subscribe();
        let introspector = Arc::clone(&self.introspector);
        let identity = self.identity.clone();
        let listeners = Arc::clone(&self.listeners);
        let last_change = Arc::clone(&self.last_change);

        let handle = tokio::spawn(async move {
            tracing::info!(%identity, "app state monitor started");

            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if !event.triggers_resolution() {
                            continue;
                        }

                        // Each relevant event gets its own independent
                        // resolution. Completions may land out of order when
                        // events outpace introspection; delivered states are
                        // eventually consistent snapshots, not an ordered log.
                        let introspector = Arc::clone(&introspector);
                        let identity = identity.clone();
                        let listeners = Arc::clone(&listeners);
                        let last_change = Arc::clone(&last_change);

                        tokio::spawn(async move {
                            let state = resolve_current(introspector, identity).await;
                            tracing::debug!(%state, ?event, "resolved app state");

                            *last_change.lock().expect("state mutex poisoned") =
                                StateChange::now(state);

                            // Snapshot outside the lock so callbacks never run
                            // under it. Listeners registered while this
                            // resolution was in flight are included.
                            let snapshot: Vec<StateCallback> = listeners
                                .lock()
                                .expect("listener mutex poisoned")
                                .clone();
                            for listener in snapshot {
                                listener(state);
                            }
                        });
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "lifecycle events lagged, resolutions dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            tracing::info!("app state monitor stopped");
        });

        self.loop_handle = Some(handle);
    }

    /// Stop observing lifecycle events. In-flight resolutions still complete
    /// and deliver.
    pub fn stop(&mut self) {
        if let Some(handle) = self.loop_handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.loop_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for AppStateMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Shared resolution routine for the query and event paths.
///
/// Introspection runs on the blocking pool; the process snapshot is only
/// fetched when a matching task exists. All failures map to `Terminated`.
async fn resolve_current(
    introspector: Arc<dyn ProcessIntrospector>,
    identity: Identity,
) -> AppState {
    let result = tokio::task::spawn_blocking(move || -> introspect::Result<AppState> {
        let tasks = introspector.own_tasks()?;
        if !resolver::owns_visible_task(&tasks, &identity) {
            return Ok(AppState::Terminated);
        }
        let processes = introspector.running_processes()?;
        Ok(resolver::resolve(&tasks, &processes, &identity))
    })
    .await;

    match result {
        Ok(Ok(state)) => state,
        Ok(Err(err)) => {
            tracing::warn!(%err, "introspection failed, reporting terminated");
            AppState::Terminated
        }
        Err(err) => {
            tracing::warn!(%err, "introspection task failed, reporting terminated");
            AppState::Terminated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::{IntrospectError, NullIntrospector, StaticIntrospector};
    use crate::lifecycle::LifecycleEvent;
    use crate::state::{Importance, ProcessInfo, TaskInfo};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);

    struct FailingIntrospector;

    impl ProcessIntrospector for FailingIntrospector {
        fn own_tasks(&self) -> introspect::Result<Vec<TaskInfo>> {
            Err(IntrospectError::Unavailable("host denied".to_string()))
        }

        fn running_processes(&self) -> introspect::Result<Vec<ProcessInfo>> {
            Err(IntrospectError::Unavailable("host denied".to_string()))
        }
    }

    fn identity() -> Identity {
        Identity::from("com.example.app")
    }

    fn foreground_introspector() -> Arc<StaticIntrospector> {
        Arc::new(StaticIntrospector::new(
            vec![TaskInfo { owner: identity() }],
            vec![ProcessInfo {
                name: "com.example.app".to_string(),
                importance: Importance::Foreground,
            }],
        ))
    }

    #[tokio::test]
    async fn test_query_resolves_foreground() {
        let monitor = AppStateMonitor::new(foreground_introspector(), identity());
        assert_eq!(monitor.current_state().await, AppState::Foreground);
    }

    #[tokio::test]
    async fn test_query_absorbs_introspection_failure() {
        let monitor = AppStateMonitor::new(Arc::new(FailingIntrospector), identity());
        assert_eq!(monitor.current_state().await, AppState::Terminated);
    }

    #[tokio::test]
    async fn test_query_on_empty_world_is_terminated() {
        let monitor = AppStateMonitor::new(Arc::new(NullIntrospector), identity());
        assert_eq!(monitor.current_state().await, AppState::Terminated);
    }

    #[tokio::test]
    async fn test_listeners_notified_in_registration_order() {
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(foreground_introspector(), identity());

        let deliveries = Arc::new(Mutex::new(Vec::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        for index in 0..3 {
            let deliveries = Arc::clone(&deliveries);
            let tx = tx.clone();
            monitor.subscribe(Arc::new(move |state| {
                deliveries.lock().unwrap().push((index, state));
                tx.send(()).unwrap();
            }));
        }

        monitor.start(&events);
        events.emit(LifecycleEvent::Resume);

        for _ in 0..3 {
            timeout(NOTIFY_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        }

        let delivered = deliveries.lock().unwrap().clone();
        assert_eq!(
            delivered,
            vec![
                (0, AppState::Foreground),
                (1, AppState::Foreground),
                (2, AppState::Foreground),
            ]
        );
    }

    #[tokio::test]
    async fn test_irrelevant_event_triggers_nothing() {
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(foreground_introspector(), identity());

        let (tx, mut rx) = mpsc::unbounded_channel();
        monitor.subscribe(Arc::new(move |state| {
            tx.send(state).unwrap();
        }));

        monitor.start(&events);
        events.emit(LifecycleEvent::Create);

        assert!(
            timeout(Duration::from_millis(200), rx.recv()).await.is_err(),
            "create must not trigger a resolution"
        );
        assert_eq!(monitor.last_known_state(), AppState::Terminated);
    }

    #[tokio::test]
    async fn test_duplicate_callback_receives_independent_notifications() {
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(foreground_introspector(), identity());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let callback: StateCallback = {
            let tx = tx.clone();
            Arc::new(move |state| {
                tx.send(state).unwrap();
            })
        };

        // Same callback twice: both registrations are retained and invoked.
        monitor.subscribe(Arc::clone(&callback));
        monitor.subscribe(callback);

        monitor.start(&events);
        events.emit(LifecycleEvent::Stop);

        for _ in 0..2 {
            let state = timeout(NOTIFY_TIMEOUT, rx.recv()).await.unwrap().unwrap();
            assert_eq!(state, AppState::Foreground);
        }
    }

    #[tokio::test]
    async fn test_event_path_absorbs_introspection_failure() {
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(Arc::new(FailingIntrospector), identity());

        let (tx, mut rx) = mpsc::unbounded_channel();
        monitor.subscribe(Arc::new(move |state| {
            tx.send(state).unwrap();
        }));

        monitor.start(&events);
        events.emit(LifecycleEvent::Pause);

        let state = timeout(NOTIFY_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(state, AppState::Terminated);
    }

    #[tokio::test]
    async fn test_cached_state_tracks_event_resolutions() {
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(foreground_introspector(), identity());
        assert_eq!(monitor.last_known_state(), AppState::Terminated);

        let (tx, mut rx) = mpsc::unbounded_channel();
        monitor.subscribe(Arc::new(move |state| {
            tx.send(state).unwrap();
        }));

        monitor.start(&events);
        events.emit(LifecycleEvent::Start);

        timeout(NOTIFY_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(monitor.last_known_state(), AppState::Foreground);
        assert!(monitor.last_change().timestamp_ms > 0);
    }

    #[tokio::test]
    async fn test_each_event_resolves_independently() {
        // No coalescing: two relevant events yield two deliveries even when
        // the resolved state is identical.
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(foreground_introspector(), identity());

        let (tx, mut rx) = mpsc::unbounded_channel();
        monitor.subscribe(Arc::new(move |state| {
            tx.send(state).unwrap();
        }));

        monitor.start(&events);
        events.emit(LifecycleEvent::Resume);
        events.emit(LifecycleEvent::Pause);

        for _ in 0..2 {
            let state = timeout(NOTIFY_TIMEOUT, rx.recv()).await.unwrap().unwrap();
            assert_eq!(state, AppState::Foreground);
        }
    }

    #[tokio::test]
    async fn test_start_stop_lifecycle() {
        let events = LifecycleEvents::default();
        let mut monitor = AppStateMonitor::new(Arc::new(NullIntrospector), identity());
        assert!(!monitor.is_running());

        monitor.start(&events);
        assert!(monitor.is_running());

        // Second start is a no-op while running.
        monitor.start(&events);
        assert!(monitor.is_running());

        monitor.stop();
        assert!(!monitor.is_running());
    }
}
