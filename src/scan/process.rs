//! Scanner process execution
//!
//! The scanner inherits our stdout/stderr so its output streams straight to
//! the CI log. Cancellation takes down everything the shell started, not just
//! the shell: on Unix the scanner runs in its own process group, on Windows
//! its process tree is killed.

use std::process::Stdio;
use std::time::Duration;

use colored::Colorize;
use log::{debug, warn};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use super::command::CommandLine;
use crate::error::ExecutionError;

/// How long the scanner gets to exit after being asked to stop
pub const TERMINATION_GRACE: Duration = Duration::from_secs(5);

/// Run `command` to completion, or until `cancel` fires.
///
/// The redacted command line is echoed to stdout before the process starts.
pub async fn execute(
    command: &CommandLine,
    cancel: &CancellationToken,
) -> Result<(), ExecutionError> {
    println!("{} {}", "Running command:".bold(), command);

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn().map_err(ExecutionError::Spawn)?;
    debug!("Scanner started (PID: {:?})", child.id());

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(ExecutionError::Wait)?;
            debug!("Scanner exited with {}", status);
            if status.success() {
                Ok(())
            } else {
                Err(ExecutionError::Failed(status))
            }
        }
        _ = cancel.cancelled() => {
            warn!("Scan cancelled, terminating scanner");
            terminate(&mut child).await;
            Err(ExecutionError::Cancelled)
        }
    }
}

/// Stop the scanner and its process group, then reap it
#[cfg(unix)]
async fn terminate(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        // Already reaped
        return;
    };
    let group = Pid::from_raw(pid as i32);

    if let Err(e) = killpg(group, Signal::SIGTERM) {
        debug!("SIGTERM to process group {} failed: {}", pid, e);
    }

    if tokio::time::timeout(TERMINATION_GRACE, child.wait()).await.is_ok() {
        // Leader is gone; sweep any stragglers left in the group.
        let _ = killpg(group, Signal::SIGKILL);
        return;
    }

    warn!("Scanner did not exit within {:?}, killing", TERMINATION_GRACE);
    if let Err(e) = killpg(group, Signal::SIGKILL) {
        debug!("SIGKILL to process group {} failed: {}", pid, e);
    }
    if let Err(e) = child.wait().await {
        warn!("Failed to reap scanner process: {}", e);
    }
}

/// Stop the scanner's whole process tree, then reap it.
///
/// The direct child is the PowerShell host; `taskkill /T` also takes the
/// scanner JVM it started.
#[cfg(windows)]
async fn terminate(child: &mut Child) {
    let Some(pid) = child.id() else {
        // Already reaped
        return;
    };

    let pid_arg = pid.to_string();
    let killed = Command::new("taskkill")
        .args(["/T", "/F", "/PID", pid_arg.as_str()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match killed {
        Ok(status) if status.success() => {
            if tokio::time::timeout(TERMINATION_GRACE, child.wait()).await.is_ok() {
                return;
            }
            warn!("Scanner did not exit within {:?} of taskkill", TERMINATION_GRACE);
        }
        Ok(status) => warn!("taskkill for scanner tree {} exited with {}", pid, status),
        Err(e) => warn!("Failed to execute taskkill: {}", e),
    }

    if let Err(e) = child.kill().await {
        warn!("Failed to kill scanner process: {}", e);
    }
}
