//! Standalone windows, each in its own process.
//!
//! The parent never talks to the child after spawning it: the window's
//! [`WindowData`] goes over as a single argument, and the only control left
//! is terminating the process.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::{Duration, Instant};
use teacup_core::{WindowData, WindowDataError};
use thiserror::Error;

/// Subcommand the child process is started with.
pub const WINDOW_PROCESS_COMMAND: &str = "window-process";

/// How long a terminated child gets before it is killed.
pub const KILL_TIMEOUT: Duration = Duration::from_secs(2);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Launcher errors.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    WindowData(#[from] WindowDataError),
    #[error("Failed to spawn window process: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A window shown by a separate process.
///
/// Dropping it kills the process.
#[derive(Debug)]
pub struct StandaloneWindow {
    data: WindowData,
    payload: Option<String>,
    program: PathBuf,
    program_args: Vec<OsString>,
    child: Option<Child>,
}

impl StandaloneWindow {
    /// Window run by this executable's `window-process` subcommand.
    pub fn new(data: WindowData) -> Result<Self, LaunchError> {
        let program = std::env::current_exe()?;
        Self::with_program(data, program, Vec::new())
    }

    /// Window run by `program args.. window-process PAYLOAD`.
    pub fn with_program(
        data: WindowData,
        program: impl Into<PathBuf>,
        args: Vec<OsString>,
    ) -> Result<Self, LaunchError> {
        data.validate()?;
        let mut window = Self {
            data,
            payload: None,
            program: program.into(),
            program_args: args,
            child: None,
        };
        window.build()?;
        Ok(window)
    }

    pub fn data(&self) -> &WindowData {
        &self.data
    }

    /// Replace the window data. Takes effect on the next [`StandaloneWindow::start`].
    pub fn set_data(&mut self, data: WindowData) -> Result<(), LaunchError> {
        data.validate()?;
        self.data = data;
        self.build()?;
        Ok(())
    }

    /// (Re)encode the window data into the child's argument.
    pub fn build(&mut self) -> Result<&str, LaunchError> {
        let payload = self.data.encode()?;
        Ok(self.payload.insert(payload).as_str())
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Process id of the running child.
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Spawn the child, replacing any previous one.
    pub fn start(&mut self) -> Result<(), LaunchError> {
        if self.child.is_some() {
            log::warn!("Window '{}' already running; replacing it", self.data.title);
            self.kill();
        }
        let payload = match &self.payload {
            Some(payload) => payload.clone(),
            None => {
                log::warn!("Window '{}' was not built yet", self.data.title);
                self.build()?.to_string()
            }
        };

        let child = Command::new(&self.program)
            .args(&self.program_args)
            .arg(WINDOW_PROCESS_COMMAND)
            .arg(payload)
            .spawn()?;
        log::info!(
            "Started window '{}' in process {}",
            self.data.title,
            child.id()
        );
        self.child = Some(child);
        Ok(())
    }

    /// True while the child process has not exited.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) | None => false,
        }
    }

    /// Ask the child to exit; kill it if it is still there after
    /// [`KILL_TIMEOUT`].
    pub fn kill(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Ok(Some(status)) = child.try_wait() {
            log::debug!("Window process {} already exited ({})", child.id(), status);
            return;
        }

        terminate(&mut child);
        let deadline = Instant::now() + KILL_TIMEOUT;
        while Instant::now() < deadline {
            match child.try_wait() {
                Ok(Some(status)) => {
                    log::debug!("Window process {} exited ({})", child.id(), status);
                    return;
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    log::warn!("Failed to wait for window process {}: {}", child.id(), e);
                    break;
                }
            }
        }

        log::warn!("Window process {} did not exit; killing it", child.id());
        if let Err(e) = child.kill() {
            log::warn!("Failed to kill window process {}: {}", child.id(), e);
        }
        let _ = child.wait();
    }
}

impl Drop for StandaloneWindow {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) {
    let Ok(pid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: plain signal delivery to a child we spawned and have not reaped.
    if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
        log::warn!(
            "Failed to send SIGTERM to {}: {}",
            pid,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::warn!("Failed to stop window process {}: {}", child.id(), e);
    }
}
