// Bootstrap Procedure
// Ordered, fail-fast, one-shot. Each step's completion is a precondition
// for the next; no step retries and no step has a fallback.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::application::provisioning::ProvisioningConfig;
use crate::domain::{AdapterInvocation, AdapterLaunch, AgentCredentials, LaunchProfile};
use crate::error::BootstrapError;
use crate::port::{CredentialStore, Environment, ProcessHost};

/// Credential home handed to the downstream process tree
pub const CREDENTIAL_HOME_VAR: &str = "CODEX_HOME";

/// Token copy for the downstream process tree
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Base-URL copy for the downstream process tree
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Static per-container settings decided by the composition root.
#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    pub profile: LaunchProfile,
    pub workspace_path: PathBuf,
}

/// Run the bootstrap: validate provisioning inputs, materialize the
/// credential file, hand the process over to the protocol adapter.
///
/// With a production host this returns only on failure; the `Ok` path is
/// reachable solely through test doubles whose `replace` returns.
///
/// # Errors
/// Every step is fatal: missing/blank provisioning input, unwritable
/// credential store, failed hand-off.
pub fn run(
    env: &dyn Environment,
    store: &dyn CredentialStore,
    host: &dyn ProcessHost,
    settings: &BootstrapSettings,
) -> Result<(), BootstrapError> {
    // 1. Validate inputs before any side effect
    let config = ProvisioningConfig::from_environment(env)?;

    // 2. Idempotent create of the credential home
    store.prepare()?;

    // 3. Materialize the credential file. Must be on disk before the
    // downstream invocation is even constructed.
    let credentials = AgentCredentials::from_token(&config.api_token);
    let credential_path = store.write(&credentials)?;
    info!(path = %credential_path.display(), "credential file written");

    // 4. Construct the hand-off
    let launch = build_launch(&config, store.home(), settings);
    info!(
        profile = %settings.profile,
        command = %launch.invocation,
        exports = ?launch.export_names(),
        "handing off to protocol adapter"
    );

    // 5. One-way replacement. Does not return on success.
    host.replace(&launch)?;

    Ok(())
}

fn build_launch(
    config: &ProvisioningConfig,
    credential_home: &Path,
    settings: &BootstrapSettings,
) -> AdapterLaunch {
    AdapterLaunch {
        invocation: AdapterInvocation::new(&settings.workspace_path, settings.profile),
        env_exports: vec![
            (
                CREDENTIAL_HOME_VAR.to_string(),
                credential_home.display().to_string(),
            ),
            (
                API_KEY_VAR.to_string(),
                config.api_token.expose().to_string(),
            ),
            (
                BASE_URL_VAR.to_string(),
                config.api_base_url.as_str().to_string(),
            ),
        ],
    }
}
