//! Platform-specific implementations.

mod host;

pub use host::HostIntrospector;
