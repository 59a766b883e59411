// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for applying manifests.

use std::time::Duration;
use thiserror::Error;

/// Errors reported by a [`CommandSite`](crate::CommandSite) while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started.
    #[error("failed to start {program}")]
    Spawn {
        /// The program that was being launched.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a started process failed.
    #[error("failed to wait on {program}")]
    Wait {
        /// The program that was running.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{program} exited with {}{}", describe_code(*.code), describe_stderr(.stderr))]
    Exit {
        /// The program that failed.
        program: String,
        /// The exit code, or `None` if the process was terminated by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The process outlived the context deadline and was killed.
    #[error("{program} timed out after {timeout:?}")]
    TimedOut {
        /// The program that was killed.
        program: String,
        /// The deadline that elapsed.
        timeout: Duration,
    },

    /// The context was cancelled while the process was running.
    #[error("{program} was cancelled")]
    Cancelled {
        /// The program that was killed.
        program: String,
    },
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(
        || String::from("no exit code"),
        |code| format!("exit code {code}"),
    )
}

fn describe_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Errors returned by [`Applier::apply`](crate::Applier::apply).
///
/// There is a single failure kind: the apply command did not succeed. The
/// underlying [`CommandError`] is available through `source()`.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Running `kubectl apply` failed.
    #[error("error from running kubectl apply")]
    Execution(#[from] CommandError),
}
