// Credential Store Port
// Abstraction over the ephemeral directory holding the agent's generated
// credential file.

use crate::domain::AgentCredentials;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Credential store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to create credential home {path}: {source}")]
    CreateHome {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write credential file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("credential serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ephemeral credential store scoped to the agent's process lifetime.
///
/// Implementations:
/// - FsCredentialStore: container-local directory (production)
/// - MemoryCredentialStore: in-memory recording store (tests)
///
/// Nothing is ever cleaned up here; container teardown owns the lifetime.
pub trait CredentialStore: Send + Sync {
    /// Directory exported to the downstream process as its credential home
    fn home(&self) -> &Path;

    /// Idempotent create of the credential home. Must not fail if the
    /// directory already exists.
    ///
    /// # Errors
    /// - StoreError::CreateHome if the directory cannot be created
    fn prepare(&self) -> Result<(), StoreError>;

    /// Write the credential document, fully replacing any prior contents,
    /// and return the file path. Re-running with the same document must
    /// produce identical contents.
    ///
    /// # Errors
    /// - StoreError::WriteFile if the file cannot be written
    /// - StoreError::Serialize if the document cannot be serialized
    fn write(&self, credentials: &AgentCredentials) -> Result<PathBuf, StoreError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock store behavior
    #[derive(Debug, Clone, Copy)]
    pub enum MockStoreBehavior {
        /// All calls succeed
        Success,
        /// `prepare` fails (unwritable parent)
        FailPrepare,
        /// `write` fails (disk/permissions)
        FailWrite,
    }

    /// In-memory credential store recording every call
    pub struct MemoryCredentialStore {
        home: PathBuf,
        behavior: MockStoreBehavior,
        prepare_calls: Mutex<usize>,
        writes: Mutex<Vec<AgentCredentials>>,
        journal: Option<Arc<Mutex<Vec<String>>>>,
    }

    impl MemoryCredentialStore {
        pub fn new() -> Self {
            Self {
                home: PathBuf::from("/tmp/mock-credential-home"),
                behavior: MockStoreBehavior::Success,
                prepare_calls: Mutex::new(0),
                writes: Mutex::new(Vec::new()),
                journal: None,
            }
        }

        pub fn with_behavior(mut self, behavior: MockStoreBehavior) -> Self {
            self.behavior = behavior;
            self
        }

        /// Share a call journal with other mocks to assert cross-port
        /// call ordering.
        pub fn with_journal(mut self, journal: Arc<Mutex<Vec<String>>>) -> Self {
            self.journal = Some(journal);
            self
        }

        pub fn prepare_calls(&self) -> usize {
            *self.prepare_calls.lock().unwrap()
        }

        pub fn writes(&self) -> Vec<AgentCredentials> {
            self.writes.lock().unwrap().clone()
        }

        fn record(&self, event: &str) {
            if let Some(journal) = &self.journal {
                journal.lock().unwrap().push(event.to_string());
            }
        }

        fn io_denied() -> std::io::Error {
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock denied")
        }
    }

    impl Default for MemoryCredentialStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CredentialStore for MemoryCredentialStore {
        fn home(&self) -> &Path {
            &self.home
        }

        fn prepare(&self) -> Result<(), StoreError> {
            self.record("store.prepare");
            *self.prepare_calls.lock().unwrap() += 1;

            if matches!(self.behavior, MockStoreBehavior::FailPrepare) {
                return Err(StoreError::CreateHome {
                    path: self.home.clone(),
                    source: Self::io_denied(),
                });
            }
            Ok(())
        }

        fn write(&self, credentials: &AgentCredentials) -> Result<PathBuf, StoreError> {
            self.record("store.write");

            if matches!(self.behavior, MockStoreBehavior::FailWrite) {
                return Err(StoreError::WriteFile {
                    path: self.home.join("auth.json"),
                    source: Self::io_denied(),
                });
            }

            self.writes.lock().unwrap().push(credentials.clone());
            Ok(self.home.join("auth.json"))
        }
    }
}
