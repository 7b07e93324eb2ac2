//! Failure-mode tests: every step is fatal, nothing retries, and a failed
//! precondition leaves no credential file behind.

use std::path::PathBuf;

use minion_boot_core::application::bootstrap::{self, BootstrapSettings};
use minion_boot_core::application::provisioning::{API_BASE_URL_VAR, API_TOKEN_VAR};
use minion_boot_core::domain::LaunchProfile;
use minion_boot_core::port::environment::mocks::MapEnvironment;
use minion_boot_core::port::process_host::mocks::RecordingProcessHost;
use minion_boot_core::BootstrapError;
use minion_boot_infra_system::FsCredentialStore;
use tempfile::TempDir;

fn settings() -> BootstrapSettings {
    BootstrapSettings {
        profile: LaunchProfile::Minimal,
        workspace_path: PathBuf::from("/workspace"),
    }
}

#[test]
fn test_missing_token_fails_before_any_write() {
    let tmp = TempDir::new().unwrap();
    let store = FsCredentialStore::new(tmp.path().join("cred-home"));
    let host = RecordingProcessHost::new();
    let env = MapEnvironment::new().with(API_BASE_URL_VAR, "https://api.example.com");

    let err = bootstrap::run(&env, &store, &host, &settings()).unwrap_err();

    assert!(matches!(err, BootstrapError::MissingVar(_)));
    assert!(!store.credential_path().exists());
    assert!(host.launches().is_empty());
}

#[test]
fn test_empty_base_url_fails_before_any_write() {
    let tmp = TempDir::new().unwrap();
    let store = FsCredentialStore::new(tmp.path().join("cred-home"));
    let host = RecordingProcessHost::new();
    let env = MapEnvironment::new()
        .with(API_TOKEN_VAR, "sk-test123")
        .with(API_BASE_URL_VAR, "");

    let err = bootstrap::run(&env, &store, &host, &settings()).unwrap_err();

    assert!(matches!(err, BootstrapError::EmptyVar(_)));
    assert!(!store.credential_path().exists());
}

#[test]
fn test_malformed_base_url_fails_before_any_write() {
    let tmp = TempDir::new().unwrap();
    let store = FsCredentialStore::new(tmp.path().join("cred-home"));
    let host = RecordingProcessHost::new();
    let env = MapEnvironment::new()
        .with(API_TOKEN_VAR, "sk-test123")
        .with(API_BASE_URL_VAR, "not a url");

    let err = bootstrap::run(&env, &store, &host, &settings()).unwrap_err();

    assert!(matches!(err, BootstrapError::InvalidBaseUrl { .. }));
    assert!(!store.credential_path().exists());
}

#[test]
fn test_uncreatable_credential_home_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    // A path segment that is a regular file makes the home uncreatable
    let store = FsCredentialStore::new(blocker.join("cred-home"));
    let host = RecordingProcessHost::new();
    let env = MapEnvironment::new()
        .with(API_TOKEN_VAR, "sk-test123")
        .with(API_BASE_URL_VAR, "https://api.example.com");

    let err = bootstrap::run(&env, &store, &host, &settings()).unwrap_err();

    assert!(matches!(err, BootstrapError::Store(_)));
    assert!(host.launches().is_empty());
}

#[test]
fn test_failed_hand_off_propagates_after_the_write() {
    let tmp = TempDir::new().unwrap();
    let store = FsCredentialStore::new(tmp.path().join("cred-home"));
    let host = RecordingProcessHost::failing();
    let env = MapEnvironment::new()
        .with(API_TOKEN_VAR, "sk-test123")
        .with(API_BASE_URL_VAR, "https://api.example.com");

    let err = bootstrap::run(&env, &store, &host, &settings()).unwrap_err();

    assert!(matches!(err, BootstrapError::Exec(_)));
    // Directory creation and the credential write are the only side
    // effects allowed before the failure surfaced
    assert!(store.credential_path().is_file());
}
