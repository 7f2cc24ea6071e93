//! Edge agent runtime — library crate backing the `ve-agent` binary.
//!
//! Re-exports internal modules so `ve-e2e-tests` can load configuration,
//! drive a manifest/scheme set off disk, and exercise the extraction core
//! the same way the binary does.

pub mod config;
pub mod consumers;
pub mod error;
pub mod loader;

pub use config::AgentConfig;
pub use consumers::{LoggingListener, RecordingListener};
pub use error::AgentError;
