// Port Layer - Interfaces for external dependencies

pub mod credential_store;
pub mod environment; // For deterministic testing
pub mod process_host;

// Re-exports
pub use credential_store::{CredentialStore, StoreError};
pub use environment::{Environment, SystemEnvironment};
pub use process_host::{ExecError, ProcessHost};
