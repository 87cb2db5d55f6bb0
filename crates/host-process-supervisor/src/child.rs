//! Spawns a single child process and drives it to completion, honoring
//! an external stop request with the grace-then-force-kill policy
//! (§4.E "Stop").

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// How a supervised child stopped running.
#[derive(Debug, Clone)]
pub enum ExitOutcome {
	ExitedCleanly,
	ExitedWithCode(Option<i32>),
	WaitFailed(String),
	StoppedByRequest,
}

impl ExitOutcome {
	/// Whether this exit should count against the restart cap — a
	/// deliberate stop never does.
	#[must_use]
	pub fn is_unintended(&self) -> bool {
		!matches!(self, Self::StoppedByRequest)
	}
}

/// Sends `SIGTERM` and waits `grace` before `SIGKILL`. Windows has no
/// graceful signal, so it force-kills immediately (§4.E).
async fn terminate(child: &mut Child, grace: Duration) {
	#[cfg(unix)]
	{
		if let Some(pid) = child.id() {
			let _ = nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), nix::sys::signal::Signal::SIGTERM);
		}
		if tokio::time::timeout(grace, child.wait()).await.is_ok() {
			return;
		}
	}
	#[cfg(not(unix))]
	{
		let _ = grace;
	}
	let _ = child.start_kill();
	let _ = child.wait().await;
}

/// Spawns `command` with stdio discarded, and returns a task that
/// resolves once the child is no longer running, plus a `Notify` the
/// caller signals to request a graceful stop.
///
/// # Errors
/// Returns the `spawn` failure directly; the caller decides how a
/// launch failure counts against the restart policy.
pub fn spawn_supervised(mut command: Command, grace: Duration) -> std::io::Result<(JoinHandle<ExitOutcome>, Arc<Notify>)> {
	command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null()).kill_on_drop(true);
	let mut child = command.spawn()?;
	let stop_signal = Arc::new(Notify::new());
	let waiter = stop_signal.clone();

	let task = tokio::spawn(async move {
		tokio::select! {
			status = child.wait() => match status {
				Ok(status) if status.success() => ExitOutcome::ExitedCleanly,
				Ok(status) => ExitOutcome::ExitedWithCode(status.code()),
				Err(e) => ExitOutcome::WaitFailed(e.to_string()),
			},
			() = waiter.notified() => {
				terminate(&mut child, grace).await;
				ExitOutcome::StoppedByRequest
			}
		}
	});

	Ok((task, stop_signal))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn a_process_that_exits_cleanly_reports_exited_cleanly() {
		let mut command = Command::new("true");
		command.kill_on_drop(true);
		let (task, _stop) = spawn_supervised(command, Duration::from_millis(200)).unwrap();
		let outcome = task.await.unwrap();
		assert!(matches!(outcome, ExitOutcome::ExitedCleanly));
		assert!(!outcome.is_unintended());
	}

	#[tokio::test]
	async fn a_process_that_exits_nonzero_reports_its_code() {
		let mut command = Command::new("false");
		command.kill_on_drop(true);
		let (task, _stop) = spawn_supervised(command, Duration::from_millis(200)).unwrap();
		let outcome = task.await.unwrap();
		assert!(matches!(outcome, ExitOutcome::ExitedWithCode(Some(1))));
		assert!(outcome.is_unintended());
	}

	#[tokio::test]
	async fn requesting_stop_on_a_long_running_child_terminates_it() {
		let mut command = Command::new("sleep");
		command.arg("30").kill_on_drop(true);
		let (task, stop) = spawn_supervised(command, Duration::from_millis(200)).unwrap();

		stop.notify_one();
		let outcome = tokio::time::timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
		assert!(matches!(outcome, ExitOutcome::StoppedByRequest));
		assert!(!outcome.is_unintended());
	}
}
