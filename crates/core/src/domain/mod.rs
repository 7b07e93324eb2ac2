// Domain Layer - Credential and launch entities, no side effects

pub mod credentials;
pub mod launch;

// Re-exports
pub use credentials::{AgentCredentials, ApiToken};
pub use launch::{AdapterInvocation, AdapterLaunch, LaunchProfile, ADAPTER_BIN, AGENT_BIN};
