// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies manifests to a cluster by driving `kubectl apply`.
//!
//! [`KubectlApplier`] builds the argument list, hands the manifest to the
//! process on standard input and reports whether the apply succeeded. The
//! process launch goes through a [`CommandSite`], so tests can substitute a
//! [`RecordingCommandSite`] and assert on the exact command line.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::missing_const_for_fn)]

mod applier;
mod config;
mod context;
mod error;
mod invocation;
mod options;
mod site;

#[cfg(test)]
mod tests;

pub use applier::{Applier, KubectlApplier};
pub use config::{ApplierConfig, DEFAULT_KUBECTL};
pub use context::{ApplyContext, CancellationFlag};
pub use error::{ApplyError, CommandError};
pub use invocation::CommandInvocation;
pub use options::ApplyOptions;
pub use site::{CommandSite, ExecCommandSite, RecordingCommandSite};
