// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # kube-applier
//!
//! Applies a manifest with `kubectl apply`, reading it from a file or from
//! standard input.
//!
//! ```bash
//! kube-applier -f manifest.yaml -n kube-system -- --prune=true --prune-whitelist=hello-world
//! cat manifest.yaml | kube-applier --validate
//! ```

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use kube_applier::{
    Applier, ApplierConfig, ApplyContext, ApplyOptions, CommandInvocation, DEFAULT_KUBECTL,
    ExecCommandSite, KubectlApplier,
};
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    // RUST_LOG wins over -v/-q when set
    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(args.log_level().into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Apply a manifest to the cluster with `kubectl apply`
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Manifest file to apply. `-` reads standard input.
    #[arg(short = 'f', long, default_value = "-")]
    filename: PathBuf,

    /// Namespace to apply into. Defaults to the current namespace.
    #[arg(short, long, default_value = "")]
    namespace: String,

    /// Ask kubectl to validate the manifest
    #[arg(long)]
    validate: bool,

    /// The kubectl executable to run
    #[arg(long, env = "KUBECTL", default_value = DEFAULT_KUBECTL)]
    kubectl: String,

    /// Kill kubectl if it has not finished after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Print the command that would be run and exit without running it
    #[arg(long)]
    print_command: bool,

    /// Extra arguments passed to kubectl after `--validate`
    #[arg(last = true)]
    extra_args: Vec<String>,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        let manifest: String = read_manifest(&self.filename)?;
        let options: ApplyOptions = ApplyOptions::new(manifest)
            .with_namespace(self.namespace.as_str())
            .with_validate(self.validate)
            .with_extra_args(self.extra_args.iter().cloned());
        let applier = KubectlApplier::with_site(
            ApplierConfig::with_program(self.kubectl.as_str()),
            ExecCommandSite::new(),
        );

        if self.print_command {
            let invocation: CommandInvocation = applier.build_invocation(&options);
            info!("would run: {invocation}");
            return Ok(());
        }

        applier
            .apply(&self.context(), &options)
            .wrap_err("failed to apply manifest")?;
        info!("manifest applied");
        Ok(())
    }

    fn context(&self) -> ApplyContext {
        let ctx: ApplyContext = ApplyContext::background();
        match self.timeout {
            Some(seconds) => ctx.with_timeout(Duration::from_secs(seconds)),
            None => ctx,
        }
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

/// Reads the manifest from `path`, or from standard input when `path` is `-`.
///
/// Manifests must be UTF-8; anything else is rejected before kubectl runs.
fn read_manifest(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut manifest: String = String::new();
        std::io::stdin()
            .read_to_string(&mut manifest)
            .wrap_err("failed to read manifest from standard input")?;
        return Ok(manifest);
    }

    std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read manifest from {}", path.display()))
}
