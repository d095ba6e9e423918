//! Example: Watch an application's run state and print changes.
//!
//! Run with: cargo run -p appwatch-appstate --example watch_state -- <process-name>

use appwatch_appstate::{
    AppStateMonitor, HostIntrospector, Identity, LifecycleEvent, LifecycleEvents,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter("appwatch_appstate=debug")
        .init();

    let identity: Identity = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "com.example.app".to_string())
        .into();

    println!("=== App State Monitor Example ===");
    println!("Watching run state of `{identity}`.\n");

    let introspector = Arc::new(HostIntrospector::new(identity.clone()));
    let events = LifecycleEvents::default();
    let mut monitor = AppStateMonitor::new(introspector, identity);

    monitor.subscribe(Arc::new(|state| {
        println!(
            "[{}] App state: {state}",
            chrono::Local::now().format("%H:%M:%S"),
        );
    }));
    monitor.start(&events);

    println!("Initial state: {}\n", monitor.current_state().await);

    // Walk a foreground surface through its lifecycle; each relevant event
    // triggers one fresh resolution.
    for event in [
        LifecycleEvent::Start,
        LifecycleEvent::Resume,
        LifecycleEvent::Pause,
        LifecycleEvent::Stop,
    ] {
        events.emit(event);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    monitor.stop();
    println!("\nDone.");
}
