//! Logging utilities
//!
//! Subscriber setup for binaries and the structured audit trail emitted by
//! the managers on every graph change.

pub mod security_logger;
pub mod subscriber;

pub use security_logger::SecurityLogger;
pub use subscriber::init_tracing;
