// Filesystem Credential Store
// One generated file under an ephemeral, container-local home directory.

use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use minion_boot_core::domain::AgentCredentials;
use minion_boot_core::port::credential_store::{CredentialStore, StoreError};

/// Fixed filename the backing agent reads inside its credential home
pub const CREDENTIAL_FILE_NAME: &str = "auth.json";

/// Credential store backed by a directory inside the container.
///
/// Never cleans anything up: the store is ephemeral because the container
/// is, not because this code deletes it.
pub struct FsCredentialStore {
    home: PathBuf,
}

impl FsCredentialStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn credential_path(&self) -> PathBuf {
        self.home.join(CREDENTIAL_FILE_NAME)
    }
}

impl CredentialStore for FsCredentialStore {
    fn home(&self) -> &Path {
        &self.home
    }

    fn prepare(&self) -> Result<(), StoreError> {
        // create_dir_all is a no-op when the directory already exists
        std::fs::create_dir_all(&self.home).map_err(|source| StoreError::CreateHome {
            path: self.home.clone(),
            source,
        })
    }

    fn write(&self, credentials: &AgentCredentials) -> Result<PathBuf, StoreError> {
        let path = self.credential_path();
        let json = serde_json::to_string_pretty(credentials)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            // Owner-only: the file holds the raw API key
            options.mode(0o600);
        }

        let write_err = |source| StoreError::WriteFile {
            path: path.clone(),
            source,
        };
        let mut file = options.open(&path).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        debug!(path = %path.display(), "credential file replaced");
        Ok(path)
    }
}
