// Exec Process Host - one-way replacement of the bootstrap image
// The adapter inherits our PID, file descriptors and signal disposition;
// there is no child process tree and no path back.

use minion_boot_core::domain::AdapterLaunch;
use minion_boot_core::port::process_host::{ExecError, ProcessHost};

/// Replaces the current process image with the adapter invocation.
///
/// On platforms without process-image replacement this degrades to the
/// supervised strategy, which is behaviorally equivalent for the container
/// orchestrator (the child's exact status becomes ours).
pub struct ExecProcessHost;

impl ProcessHost for ExecProcessHost {
    fn replace(&self, launch: &AdapterLaunch) -> Result<(), ExecError> {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;

            let mut command = crate::adapter_command(launch);
            // exec only returns on failure
            let source = command.exec();
            Err(ExecError::Exec {
                program: launch.invocation.program().display().to_string(),
                source,
            })
        }

        #[cfg(not(unix))]
        {
            crate::SupervisedProcessHost.replace(launch)
        }
    }
}
