// Minion Boot Infrastructure - System Adapters
// Implements: CredentialStore, ProcessHost

pub mod exec_process_host;
pub mod fs_credential_store;
pub mod supervised_process_host;

pub use exec_process_host::ExecProcessHost;
pub use fs_credential_store::{FsCredentialStore, CREDENTIAL_FILE_NAME};
pub use supervised_process_host::SupervisedProcessHost;

use std::process::Command;

use minion_boot_core::domain::AdapterLaunch;

/// Build the downstream command from a launch: adapter argv plus the env
/// exports on top of the inherited environment.
pub(crate) fn adapter_command(launch: &AdapterLaunch) -> Command {
    let mut command = Command::new(launch.invocation.program());
    command.args(launch.invocation.args());
    for (name, value) in &launch.env_exports {
        command.env(name, value);
    }
    command
}
