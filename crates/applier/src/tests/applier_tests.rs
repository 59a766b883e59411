// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::error::Error;

use crate::tests::helpers::{
    args, create_failing_applier, create_recording_applier, single_invocation,
};
use crate::{
    Applier, ApplierConfig, ApplyContext, ApplyError, ApplyOptions, CommandError,
    CommandInvocation, KubectlApplier, RecordingCommandSite,
};

#[test]
fn test_manifest_in_current_namespace() {
    let applier = create_recording_applier();
    let options: ApplyOptions = ApplyOptions::new("foo");

    let result: Result<(), ApplyError> = applier.apply(&ApplyContext::background(), &options);

    assert!(result.is_ok());
    let invocation: CommandInvocation = single_invocation(&applier);
    assert_eq!(
        invocation.argv(),
        args(&["kubectl", "apply", "--validate=false", "-f", "-"])
    );
    assert_eq!(invocation.stdin, "foo");
}

#[test]
fn test_manifest_with_namespace() {
    let applier = create_recording_applier();
    let options: ApplyOptions = ApplyOptions::new("heynow").with_namespace("kube-system");

    let result: Result<(), ApplyError> = applier.apply(&ApplyContext::background(), &options);

    assert!(result.is_ok());
    let invocation: CommandInvocation = single_invocation(&applier);
    assert_eq!(
        invocation.argv(),
        args(&[
            "kubectl",
            "apply",
            "-n",
            "kube-system",
            "--validate=false",
            "-f",
            "-"
        ])
    );
    assert_eq!(invocation.stdin, "heynow");
}

#[test]
fn test_manifest_with_validate() {
    let applier = create_recording_applier();
    let options: ApplyOptions = ApplyOptions::new("foo").with_validate(true);

    let result: Result<(), ApplyError> = applier.apply(&ApplyContext::background(), &options);

    assert!(result.is_ok());
    let invocation: CommandInvocation = single_invocation(&applier);
    assert_eq!(
        invocation.argv(),
        args(&["kubectl", "apply", "--validate=true", "-f", "-"])
    );
    assert_eq!(invocation.stdin, "foo");
}

#[test]
fn test_error_propagation() {
    let applier = create_failing_applier();
    let options: ApplyOptions = ApplyOptions::default();

    let result: Result<(), ApplyError> = applier.apply(&ApplyContext::background(), &options);

    assert!(result.is_err());
    let invocation: CommandInvocation = single_invocation(&applier);
    assert_eq!(
        invocation.argv(),
        args(&["kubectl", "apply", "--validate=false", "-f", "-"])
    );
    assert_eq!(invocation.stdin, "");
}

#[test]
fn test_manifest_with_prune() {
    let applier = create_recording_applier();
    let options: ApplyOptions = ApplyOptions::new("heynow")
        .with_namespace("kube-system")
        .with_extra_args(["--prune=true", "--prune-whitelist=hello-world"]);

    let result: Result<(), ApplyError> = applier.apply(&ApplyContext::background(), &options);

    assert!(result.is_ok());
    let invocation: CommandInvocation = single_invocation(&applier);
    assert_eq!(
        invocation.argv(),
        args(&[
            "kubectl",
            "apply",
            "-n",
            "kube-system",
            "--validate=false",
            "--prune=true",
            "--prune-whitelist=hello-world",
            "-f",
            "-"
        ])
    );
    assert_eq!(invocation.stdin, "heynow");
}

#[test]
fn test_argument_order_for_every_option_combination() {
    for namespace in ["", "team-a"] {
        for validate in [false, true] {
            for extra in [vec![], vec!["--server-side", "--force-conflicts"]] {
                let applier = create_recording_applier();
                let options: ApplyOptions = ApplyOptions::new("kind: ConfigMap")
                    .with_namespace(namespace)
                    .with_validate(validate)
                    .with_extra_args(extra.clone());

                applier
                    .apply(&ApplyContext::background(), &options)
                    .unwrap();

                let mut expected: Vec<&str> = vec!["kubectl", "apply"];
                if !namespace.is_empty() {
                    expected.extend(["-n", namespace]);
                }
                let validate_flag: String = format!("--validate={validate}");
                expected.push(&validate_flag);
                expected.extend(extra.iter().copied());
                expected.extend(["-f", "-"]);

                assert_eq!(single_invocation(&applier).argv(), args(&expected));
            }
        }
    }
}

#[test]
fn test_manifest_is_delivered_unmodified() {
    let applier = create_recording_applier();
    let manifest: &str = "apiVersion: v1\r\nkind: Namespace\n\n  metadata:\t{}\n\n";
    let options: ApplyOptions = ApplyOptions::new(manifest);

    applier
        .apply(&ApplyContext::background(), &options)
        .unwrap();

    assert_eq!(single_invocation(&applier).stdin, manifest);
}

#[test]
fn test_extra_args_are_not_interpreted() {
    let applier = create_recording_applier();
    let options: ApplyOptions = ApplyOptions::new("foo")
        .with_extra_arg("-n")
        .with_extra_arg("--validate=true")
        .with_extra_arg("");

    applier
        .apply(&ApplyContext::background(), &options)
        .unwrap();

    assert_eq!(
        single_invocation(&applier).args,
        args(&[
            "apply",
            "--validate=false",
            "-n",
            "--validate=true",
            "",
            "-f",
            "-"
        ])
    );
}

#[test]
fn test_each_apply_runs_exactly_one_command() {
    let applier = create_failing_applier();
    let options: ApplyOptions = ApplyOptions::new("foo");

    assert!(applier.apply(&ApplyContext::background(), &options).is_err());
    assert!(applier.apply(&ApplyContext::background(), &options).is_err());

    assert_eq!(applier.site().invocations().len(), 2);
}

#[test]
fn test_error_wraps_command_failure() {
    let applier = KubectlApplier::with_site(
        ApplierConfig::default(),
        RecordingCommandSite::failing(1, "error: unable to recognize \"STDIN\""),
    );

    let err: ApplyError = applier
        .apply(&ApplyContext::background(), &ApplyOptions::new("foo"))
        .unwrap_err();

    assert_eq!(err.to_string(), "error from running kubectl apply");
    let source = err.source().unwrap();
    let command_error: &CommandError = source.downcast_ref::<CommandError>().unwrap();
    assert!(matches!(
        command_error,
        CommandError::Exit { code: Some(1), .. }
    ));
    assert_eq!(
        source.to_string(),
        "kubectl exited with exit code 1: error: unable to recognize \"STDIN\""
    );
}

#[test]
fn test_error_chain_mentions_cause_once() {
    let applier = create_failing_applier();

    let err: ApplyError = applier
        .apply(&ApplyContext::background(), &ApplyOptions::new("foo"))
        .unwrap_err();

    let mut messages: Vec<String> = vec![err.to_string()];
    let mut cause: Option<&(dyn Error + 'static)> = err.source();
    while let Some(current) = cause {
        messages.push(current.to_string());
        cause = current.source();
    }
    let chain: String = messages.join(": ");

    assert_eq!(
        chain,
        "error from running kubectl apply: kubectl exited with exit code 1: error"
    );
}

#[test]
fn test_configured_program_is_used() {
    let applier = KubectlApplier::with_site(
        ApplierConfig::with_program("/usr/local/bin/kubectl"),
        RecordingCommandSite::new(),
    );

    let invocation: CommandInvocation = applier.build_invocation(&ApplyOptions::new("foo"));

    assert_eq!(invocation.program, "/usr/local/bin/kubectl");
    assert_eq!(invocation.args[0], "apply");
}

#[test]
fn test_build_invocation_does_not_run_anything() {
    let applier = create_recording_applier();

    let invocation: CommandInvocation =
        applier.build_invocation(&ApplyOptions::new("foo").with_namespace("default"));

    assert!(applier.site().invocations().is_empty());
    assert_eq!(
        invocation.to_string(),
        "kubectl apply -n default --validate=false -f -"
    );
}

#[test]
fn test_default_applier_runs_kubectl() {
    let applier: KubectlApplier = KubectlApplier::new();

    assert_eq!(applier.config().program, "kubectl");
}
