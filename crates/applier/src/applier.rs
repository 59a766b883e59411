// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::{debug, error, info};

use crate::config::ApplierConfig;
use crate::context::ApplyContext;
use crate::error::ApplyError;
use crate::invocation::CommandInvocation;
use crate::options::ApplyOptions;
use crate::site::{CommandSite, ExecCommandSite};

/// Applies a manifest to a cluster.
pub trait Applier {
    /// Applies `options.manifest`.
    ///
    /// Blocks until the apply completes. Failures are returned to the caller
    /// and are never retried.
    ///
    /// # Errors
    ///
    /// Returns an [`ApplyError`] if the apply did not succeed.
    fn apply(&self, ctx: &ApplyContext, options: &ApplyOptions) -> Result<(), ApplyError>;
}

/// An [`Applier`] that runs `kubectl apply` with the manifest on standard input.
///
/// The resulting command line is:
///
/// ```text
/// kubectl apply [-n <namespace>] --validate=<true|false> [<extra-args>...] -f -
/// ```
#[derive(Debug, Clone)]
pub struct KubectlApplier<S = ExecCommandSite> {
    config: ApplierConfig,
    site: S,
}

impl KubectlApplier {
    /// Creates an applier that runs `kubectl` as a child process.
    #[must_use]
    pub fn new() -> Self {
        Self::with_site(ApplierConfig::default(), ExecCommandSite::new())
    }
}

impl Default for KubectlApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CommandSite> KubectlApplier<S> {
    /// Creates an applier that runs commands through `site`.
    #[must_use]
    pub const fn with_site(config: ApplierConfig, site: S) -> Self {
        Self { config, site }
    }

    #[must_use]
    pub const fn config(&self) -> &ApplierConfig {
        &self.config
    }

    #[must_use]
    pub const fn site(&self) -> &S {
        &self.site
    }

    /// Builds the command an apply with `options` would run.
    #[must_use]
    pub fn build_invocation(&self, options: &ApplyOptions) -> CommandInvocation {
        let mut args: Vec<String> = vec![String::from("apply")];

        if !options.namespace.is_empty() {
            args.push(String::from("-n"));
            args.push(options.namespace.clone());
        }

        args.push(format!("--validate={}", options.validate));
        args.extend(options.extra_args.iter().cloned());
        args.push(String::from("-f"));
        args.push(String::from("-"));

        CommandInvocation::new(self.config.program.clone(), args, options.manifest.clone())
    }
}

impl<S: CommandSite> Applier for KubectlApplier<S> {
    fn apply(&self, ctx: &ApplyContext, options: &ApplyOptions) -> Result<(), ApplyError> {
        info!(
            namespace = %options.namespace,
            manifest_bytes = options.manifest.len(),
            "applying manifest"
        );

        let invocation: CommandInvocation = self.build_invocation(options);
        debug!(argv = ?invocation.argv(), "executing kubectl");

        self.site.run(ctx, &invocation).map_err(|err| {
            error!(error = %err, "error from running kubectl apply");
            ApplyError::from(err)
        })
    }
}
