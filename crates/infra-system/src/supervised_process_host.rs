// Supervised Process Host - spawn, relay signals, exit with the child's
// exact status. Behaviorally equivalent hand-off for setups that keep the
// bootstrap alive as PID 1 (e.g. to retain a signal-relaying reaper).

use std::process::{Command, ExitStatus};
#[cfg(unix)]
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use tracing::debug;
#[cfg(unix)]
use tracing::warn;

use minion_boot_core::domain::AdapterLaunch;
use minion_boot_core::port::process_host::{ExecError, ProcessHost};

use crate::adapter_command;

/// Last signal received and not yet relayed to the child (0 = none).
/// The handler only stores; all real work happens in the wait loop.
#[cfg(unix)]
static PENDING_SIGNAL: AtomicI32 = AtomicI32::new(0);

#[cfg(unix)]
extern "C" fn note_signal(signo: nix::libc::c_int) {
    PENDING_SIGNAL.store(signo, Ordering::SeqCst);
}

/// Runs the adapter as a supervised child instead of exec-ing over it.
///
/// SIGTERM and SIGINT are relayed to the child; when it terminates, this
/// process exits with the child's exit code, or 128+signal when the child
/// was signal-killed (shell convention, so the orchestrator sees the same
/// status either way).
pub struct SupervisedProcessHost;

impl SupervisedProcessHost {
    /// Supervise an already-built command to completion and return the
    /// exit code this process should terminate with.
    pub fn run(&self, mut command: Command) -> Result<i32, ExecError> {
        let program = command.get_program().to_string_lossy().into_owned();

        #[cfg(unix)]
        install_relay()?;

        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            program: program.clone(),
            source,
        })?;
        debug!(program = %program, pid = child.id(), "supervising adapter");

        // Poll instead of blocking in wait() so pending signals get
        // relayed within one interval
        loop {
            #[cfg(unix)]
            relay_pending(child.id());

            match child.try_wait().map_err(ExecError::Wait)? {
                Some(status) => return Ok(exit_code(&status)),
                None => std::thread::sleep(Duration::from_millis(100)),
            }
        }
    }
}

impl ProcessHost for SupervisedProcessHost {
    fn replace(&self, launch: &AdapterLaunch) -> Result<(), ExecError> {
        let code = self.run(adapter_command(launch))?;
        std::process::exit(code);
    }
}

fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(unix)]
fn install_relay() -> Result<(), ExecError> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(note_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGTERM, Signal::SIGINT] {
        // Safety: note_signal only touches an atomic
        unsafe { sigaction(signal, &action) }
            .map_err(|e| ExecError::SignalRelay(e.to_string()))?;
    }
    Ok(())
}

#[cfg(unix)]
fn relay_pending(child_pid: u32) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let signo = PENDING_SIGNAL.swap(0, Ordering::SeqCst);
    if signo == 0 {
        return;
    }

    match Signal::try_from(signo) {
        Ok(signal) => {
            debug!(signal = %signal, pid = child_pid, "relaying signal to adapter");
            if let Err(e) = kill(Pid::from_raw(child_pid as i32), signal) {
                warn!(error = %e, pid = child_pid, "signal relay failed");
            }
        }
        Err(e) => warn!(signo, error = %e, "unknown pending signal"),
    }
}
