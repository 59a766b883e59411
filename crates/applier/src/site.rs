// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command sites: the capability that actually runs a command.
//!
//! [`ExecCommandSite`] launches real processes. [`RecordingCommandSite`]
//! records invocations and returns a canned outcome, so argument construction
//! can be tested without launching anything.

use std::sync::{Mutex, PoisonError};
use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::context::ApplyContext;
use crate::error::CommandError;
use crate::invocation::CommandInvocation;

/// Interval at which a running child is checked for exit, deadline and cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Something that can run a constructed command.
pub trait CommandSite: Send + Sync {
    /// Runs the command to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command could not be run or did not
    /// succeed.
    fn run(&self, ctx: &ApplyContext, invocation: &CommandInvocation) -> Result<(), CommandError>;
}

/// Runs commands as child processes.
///
/// Standard input is fed from the invocation, standard output and standard
/// error are captured and logged.
///
/// On timeout or cancellation only the direct child is killed. Processes it
/// spawned itself are not part of a process group kill and may keep running;
/// `kubectl` does not fork, so this only matters for wrapper scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecCommandSite;

impl ExecCommandSite {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CommandSite for ExecCommandSite {
    fn run(&self, ctx: &ApplyContext, invocation: &CommandInvocation) -> Result<(), CommandError> {
        let program: &str = invocation.program.as_str();
        let spawn_error = |source: std::io::Error| CommandError::Spawn {
            program: program.to_string(),
            source,
        };
        let wait_error = |source: std::io::Error| CommandError::Wait {
            program: program.to_string(),
            source,
        };

        if ctx.is_cancelled() {
            return Err(CommandError::Cancelled {
                program: program.to_string(),
            });
        }

        debug!(command = %invocation, "starting command");
        let handle: duct::Handle = duct::cmd(program, &invocation.args)
            .stdin_bytes(invocation.stdin.as_bytes())
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .start()
            .map_err(spawn_error)?;

        let started: Instant = Instant::now();
        let output: &std::process::Output = loop {
            if let Some(output) = handle.try_wait().map_err(wait_error)? {
                break output;
            }

            if ctx.is_cancelled() {
                warn!(command = %invocation, "cancelled, killing command");
                kill(&handle, invocation);
                return Err(CommandError::Cancelled {
                    program: program.to_string(),
                });
            }

            if let Some(timeout) = ctx.timeout().filter(|timeout| started.elapsed() >= *timeout) {
                warn!(command = %invocation, ?timeout, "deadline exceeded, killing command");
                kill(&handle, invocation);
                return Err(CommandError::TimedOut {
                    program: program.to_string(),
                    timeout,
                });
            }

            sleep(POLL_INTERVAL);
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            info!(stdout = %stdout.trim_end(), "{program} output");
        }
        if !stderr.trim().is_empty() {
            warn!(stderr = %stderr.trim_end(), "{program} error output");
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                program: program.to_string(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

/// Kills the direct child. Failure is logged, the caller still reports the
/// timeout or cancellation that triggered the kill.
fn kill(handle: &duct::Handle, invocation: &CommandInvocation) {
    if let Err(err) = handle.kill() {
        warn!(command = %invocation, error = %err, "failed to kill command");
    }
}

/// A command site that records invocations instead of running them.
///
/// Every call is recorded, whatever the configured outcome.
#[derive(Debug, Default)]
pub struct RecordingCommandSite {
    invocations: Mutex<Vec<CommandInvocation>>,
    failure: Option<(i32, String)>,
}

impl RecordingCommandSite {
    /// Creates a site where every run succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a site where every run fails with the given exit code and stderr.
    #[must_use]
    pub fn failing(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            invocations: Mutex::default(),
            failure: Some((code, stderr.into())),
        }
    }

    /// Returns a copy of the invocations recorded so far, oldest first.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CommandSite for RecordingCommandSite {
    fn run(&self, _ctx: &ApplyContext, invocation: &CommandInvocation) -> Result<(), CommandError> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());

        match &self.failure {
            None => Ok(()),
            Some((code, stderr)) => Err(CommandError::Exit {
                program: invocation.program.clone(),
                code: Some(*code),
                stderr: stderr.clone(),
            }),
        }
    }
}
