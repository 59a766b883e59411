// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApplierConfig, CommandInvocation, KubectlApplier, RecordingCommandSite};

pub fn create_recording_applier() -> KubectlApplier<RecordingCommandSite> {
    KubectlApplier::with_site(ApplierConfig::default(), RecordingCommandSite::new())
}

pub fn create_failing_applier() -> KubectlApplier<RecordingCommandSite> {
    KubectlApplier::with_site(
        ApplierConfig::default(),
        RecordingCommandSite::failing(1, "error"),
    )
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Returns the single invocation recorded by `applier`, failing if there is not exactly one.
pub fn single_invocation(applier: &KubectlApplier<RecordingCommandSite>) -> CommandInvocation {
    let invocations: Vec<CommandInvocation> = applier.site().invocations();
    assert_eq!(
        invocations.len(),
        1,
        "expected 1 command to be invoked, got: {}",
        invocations.len()
    );
    invocations.into_iter().next().unwrap()
}

/// Runs `sh -c <script>` with the given stdin.
pub fn shell(script: &str, stdin: &str) -> CommandInvocation {
    CommandInvocation::new(
        String::from("sh"),
        args(&["-c", script]),
        stdin.to_string(),
    )
}
