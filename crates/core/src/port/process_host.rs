// Process Host Port - one-way hand-off to the protocol adapter

use crate::domain::AdapterLaunch;
use thiserror::Error;

/// Hand-off errors
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to execute {program}: {source}")]
    Exec {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to wait for child: {0}")]
    Wait(std::io::Error),

    #[error("signal relay setup failed: {0}")]
    SignalRelay(String),
}

/// Terminal hand-off to the downstream adapter process.
///
/// Production implementations never return `Ok`: `replace` either does not
/// return at all (process image replaced, or the process exits with the
/// supervised child's status) or returns the error that prevented the
/// hand-off. Test doubles return `Ok` so the procedure can be exercised
/// in-process.
///
/// Implementations:
/// - ExecProcessHost: exec-style image replacement (production)
/// - SupervisedProcessHost: spawn + signal relay + exit (production)
/// - RecordingProcessHost: records the launch and returns (tests)
pub trait ProcessHost: Send + Sync {
    fn replace(&self, launch: &AdapterLaunch) -> Result<(), ExecError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Recording process host for tests. Captures the launch instead of
    /// replacing the process, optionally failing like a missing binary.
    pub struct RecordingProcessHost {
        launches: Mutex<Vec<AdapterLaunch>>,
        journal: Option<Arc<Mutex<Vec<String>>>>,
        fail: bool,
    }

    impl RecordingProcessHost {
        pub fn new() -> Self {
            Self {
                launches: Mutex::new(Vec::new()),
                journal: None,
                fail: false,
            }
        }

        /// Fail every hand-off as if the adapter binary were missing
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        /// Share a call journal with other mocks to assert cross-port
        /// call ordering.
        pub fn with_journal(mut self, journal: Arc<Mutex<Vec<String>>>) -> Self {
            self.journal = Some(journal);
            self
        }

        pub fn launches(&self) -> Vec<AdapterLaunch> {
            self.launches.lock().unwrap().clone()
        }

        pub fn last_launch(&self) -> Option<AdapterLaunch> {
            self.launches.lock().unwrap().last().cloned()
        }
    }

    impl Default for RecordingProcessHost {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ProcessHost for RecordingProcessHost {
        fn replace(&self, launch: &AdapterLaunch) -> Result<(), ExecError> {
            if let Some(journal) = &self.journal {
                journal.lock().unwrap().push("host.replace".to_string());
            }

            if self.fail {
                return Err(ExecError::Exec {
                    program: launch.invocation.program().display().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock not found"),
                });
            }

            self.launches.lock().unwrap().push(launch.clone());
            Ok(())
        }
    }
}
