//! Device lifecycle: waiting out transitions and booting shut-down devices.

use std::time::Duration;

use simdrive_cli::application::services::lifecycle::ensure_usable;
use simdrive_cli::domain::{
    DeviceError, DeviceState, ResolvedTarget, TargetError, parse_simctl_devices,
};

use crate::helpers::{
    RecordingReporter, ScriptedRunner, err_output, fast_policy, single_device,
};

fn target() -> ResolvedTarget {
    let catalog = parse_simctl_devices(single_device("Shutdown").as_bytes()).expect("parse");
    let (runtime, device) = catalog.find("UDID-1").expect("device");
    ResolvedTarget::new(runtime, device)
}

#[tokio::test]
async fn booted_device_is_left_alone() {
    let runner = ScriptedRunner::new(single_device("Booted"));
    let reporter = RecordingReporter::default();

    let state = ensure_usable(&runner, &target(), fast_policy(None), &reporter)
        .await
        .expect("usable");

    assert_eq!(state, DeviceState::Booted);
    assert!(runner.actions().is_empty(), "got: {:?}", runner.actions());
    assert!(reporter.messages.borrow().is_empty());
}

#[tokio::test]
async fn shutdown_device_is_booted_exactly_once() {
    let runner = ScriptedRunner::new(single_device("Shutdown"));
    let reporter = RecordingReporter::default();

    let state = ensure_usable(&runner, &target(), fast_policy(None), &reporter)
        .await
        .expect("usable");

    assert_eq!(state, DeviceState::Shutdown);
    assert_eq!(runner.actions(), ["simctl boot"]);
    assert_eq!(
        runner.call_for("simctl boot").expect("boot"),
        ["xcrun", "simctl", "boot", "UDID-1"]
    );
    assert_eq!(
        *reporter.messages.borrow(),
        [
            "step: booting iPhone 11 simulator running iOS 13.0...",
            "success: simulator boot started",
        ]
    );
}

#[tokio::test]
async fn transitioning_device_is_polled_until_settled() {
    let runner = ScriptedRunner::with_listings(vec![
        single_device("Shutting Down"),
        single_device("Shutting Down"),
        single_device("Shutdown"),
    ]);

    let state = ensure_usable(
        &runner,
        &target(),
        fast_policy(Some(Duration::from_secs(5))),
        &RecordingReporter::default(),
    )
    .await
    .expect("usable");

    assert_eq!(state, DeviceState::Shutdown);
    assert_eq!(runner.list_count(), 3);
    assert_eq!(runner.actions(), ["simctl boot"]);
}

#[tokio::test]
async fn device_that_finishes_booting_needs_no_boot() {
    let runner = ScriptedRunner::with_listings(vec![
        single_device("Booting"),
        single_device("Booted"),
    ]);

    let state = ensure_usable(&runner, &target(), fast_policy(None), &RecordingReporter::default())
        .await
        .expect("usable");

    assert_eq!(state, DeviceState::Booted);
    assert!(runner.actions().is_empty());
}

#[tokio::test]
async fn boot_failure_is_a_device_boot_error() {
    let runner = ScriptedRunner::new(single_device("Shutdown")).on(
        "simctl boot",
        err_output(149, b"Unable to boot device in current state: Creating"),
    );

    let err = ensure_usable(&runner, &target(), fast_policy(None), &RecordingReporter::default())
        .await
        .expect_err("expected Err");

    match err.downcast_ref::<DeviceError>() {
        Some(DeviceError::Boot { udid, detail, .. }) => {
            assert_eq!(udid, "UDID-1");
            assert!(detail.contains("current state"), "got: {detail}");
        }
        other => panic!("expected Boot, got {other:?}"),
    }
}

#[tokio::test]
async fn device_stuck_in_transition_times_out() {
    let runner = ScriptedRunner::new(single_device("Booting"));

    let err = ensure_usable(
        &runner,
        &target(),
        fast_policy(Some(Duration::from_millis(20))),
        &RecordingReporter::default(),
    )
    .await
    .expect_err("expected Err");

    assert!(matches!(
        err.downcast_ref::<DeviceError>(),
        Some(DeviceError::BootTimeout {
            last_state: DeviceState::Booting,
            ..
        })
    ));
    assert!(runner.actions().is_empty());
}

#[tokio::test]
async fn device_vanishing_while_polling_is_unknown_target() {
    let runner = ScriptedRunner::with_listings(vec![
        single_device("Booting"),
        r#"{"devices": {}}"#.to_string(),
    ]);

    let err = ensure_usable(&runner, &target(), fast_policy(None), &RecordingReporter::default())
        .await
        .expect_err("expected Err");

    assert!(matches!(
        err.downcast_ref::<TargetError>(),
        Some(TargetError::UnknownTarget(_))
    ));
}
