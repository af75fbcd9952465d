// ABOUTME: Integration tests for reimage and reboot orchestration.
// ABOUTME: Checks call ordering, warnings, and failure propagation against a fake deployment.

mod support;

use std::time::Duration;

use reimager::diagnostics::WarningKind;
use reimager::orchestrate::{
    Action, ExecutionMode, OperationError, OperationErrorKind, Orchestrator,
};
use reimager::output::{Output, OutputMode};
use reimager::types::{DeploymentSlot, InstanceName, ServiceName};
use reimager::wait::PollPolicy;
use support::fake_deployment::{Call, FakeDeployment, snapshot};
use tokio_util::sync::CancellationToken;

fn service() -> ServiceName {
    ServiceName::new("web-frontend").unwrap()
}

fn name(value: &str) -> InstanceName {
    InstanceName::new(value).unwrap()
}

fn quiet() -> Output {
    Output::new(OutputMode::Quiet)
}

fn fast() -> PollPolicy {
    PollPolicy::new(Duration::from_secs(30), 5)
}

fn reimage(instance: &str) -> Call {
    Call::Reimage(instance.to_string())
}

fn reboot(instance: &str) -> Call {
    Call::Reboot(instance.to_string())
}

mod sequential_reimage {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn cycles_each_instance_before_the_next() {
        support::init_tracing();
        let fake = FakeDeployment::simulated(&[
            ("web_IN_0", "ReadyRole"),
            ("web_IN_1", "ReadyRole"),
            ("web_IN_2", "ReadyRole"),
        ]);
        let output = quiet();

        let summary = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Sequential)
            .await
            .unwrap();

        // Roster read, then per instance: action, went-down poll, came-back poll.
        assert_eq!(
            fake.calls(),
            vec![
                Call::Snapshot,
                reimage("web_IN_0"),
                Call::Snapshot,
                Call::Snapshot,
                reimage("web_IN_1"),
                Call::Snapshot,
                Call::Snapshot,
                reimage("web_IN_2"),
                Call::Snapshot,
                Call::Snapshot,
            ]
        );
        assert_eq!(summary.action, Action::Reimage);
        assert_eq!(summary.mode, ExecutionMode::Sequential);
        assert_eq!(
            summary.instances,
            vec![name("web_IN_0"), name("web_IN_1"), name("web_IN_2")]
        );
        assert!(!summary.diagnostics.has_warnings());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_roster_succeeds_with_warning() {
        let fake = FakeDeployment::scripted(vec![snapshot(&[])]);
        let output = quiet();

        let summary = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Sequential)
            .await
            .unwrap();

        assert!(summary.is_noop());
        assert!(fake.actions().is_empty());
        assert_eq!(summary.diagnostics.warnings().len(), 1);
        assert_eq!(
            summary.diagnostics.warnings()[0].kind,
            WarningKind::EmptyRoster
        );
    }

    #[tokio::test(start_paused = true)]
    async fn instance_that_never_goes_down_times_out() {
        // The remote acknowledges but the instance stays Ready.
        let fake = FakeDeployment::scripted(vec![snapshot(&[("A", "ReadyRole")])]);
        let output = quiet();

        let err = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Sequential)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), OperationErrorKind::Timeout);
        assert_eq!(fake.actions(), vec![reimage("A")]);
        // One roster read plus the full attempt budget.
        assert_eq!(fake.snapshot_count(), 1 + 5);
    }

    #[tokio::test(start_paused = true)]
    async fn vanished_instance_aborts_the_run() {
        let fake = FakeDeployment::scripted(vec![
            snapshot(&[("A", "ReadyRole"), ("B", "ReadyRole")]),
            snapshot(&[("B", "ReadyRole")]),
        ]);
        let output = quiet();

        let err = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Sequential)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), OperationErrorKind::NotFound);
        assert_eq!(fake.actions(), vec![reimage("A")]);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_action_stops_later_instances() {
        let fake = FakeDeployment::simulated(&[
            ("A", "ReadyRole"),
            ("B", "ReadyRole"),
            ("C", "ReadyRole"),
        ])
        .fail_action_on("B", 409);
        let output = quiet();

        let err = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Sequential)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), OperationErrorKind::Transport);
        assert!(matches!(
            &err,
            OperationError::Action { action: Action::Reimage, instance, .. } if *instance == name("B")
        ));
        assert_eq!(fake.actions(), vec![reimage("A"), reimage("B")]);
    }

    #[tokio::test(start_paused = true)]
    async fn roster_failure_is_transport() {
        let fake = FakeDeployment::scripted(vec![snapshot(&[("A", "ReadyRole")])])
            .fail_snapshot_on(1, 404);
        let output = quiet();

        let err = Orchestrator::new(&fake, &output)
            .reimage(&service(), DeploymentSlot::Staging, ExecutionMode::Sequential)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), OperationErrorKind::Transport);
        assert!(matches!(err, OperationError::Roster { .. }));
        assert!(fake.actions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_surfaces_as_cancelled() {
        let fake = FakeDeployment::simulated(&[("A", "ReadyRole"), ("B", "ReadyRole")]);
        let output = quiet();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = Orchestrator::new(&fake, &output)
            .policy(fast())
            .cancellation(cancel)
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Sequential)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), OperationErrorKind::Cancelled);
        // The first action was already requested; nothing after it.
        assert_eq!(fake.actions(), vec![reimage("A")]);
    }
}

mod batched_reimage {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn requests_all_then_waits_on_the_batch() {
        let fake = FakeDeployment::simulated(&[
            ("A", "ReadyRole"),
            ("B", "ReadyRole"),
            ("C", "ReadyRole"),
        ]);
        let output = quiet();

        let summary = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Batched)
            .await
            .unwrap();

        assert_eq!(
            fake.calls(),
            vec![
                Call::Snapshot,
                reimage("A"),
                reimage("B"),
                reimage("C"),
                Call::Snapshot,
                Call::Snapshot,
            ]
        );
        assert_eq!(summary.mode, ExecutionMode::Batched);
        assert_eq!(summary.instances.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_roster_is_an_error() {
        let fake = FakeDeployment::scripted(vec![snapshot(&[])]);
        let output = quiet();

        let err = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Batched)
            .await
            .unwrap_err();

        assert!(matches!(err, OperationError::EmptyRoster { .. }));
        assert_eq!(err.kind(), OperationErrorKind::NotFound);
        assert_eq!(fake.snapshot_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn batch_that_never_starts_times_out() {
        let fake = FakeDeployment::scripted(vec![snapshot(&[
            ("A", "ReadyRole"),
            ("B", "ReadyRole"),
        ])]);
        let output = quiet();

        let err = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reimage(&service(), DeploymentSlot::Production, ExecutionMode::Batched)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), OperationErrorKind::Timeout);
        assert_eq!(fake.actions(), vec![reimage("A"), reimage("B")]);
    }
}

mod reboot {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn reboots_every_instance_in_order() {
        let fake = FakeDeployment::simulated(&[("A", "ReadyRole"), ("B", "ReadyRole")]);
        let output = quiet();

        let summary = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reboot(&service(), DeploymentSlot::Production, None)
            .await
            .unwrap();

        assert_eq!(fake.actions(), vec![reboot("A"), reboot("B")]);
        assert_eq!(fake.snapshot_count(), 1 + 4);
        assert_eq!(summary.action, Action::Reboot);
    }

    #[tokio::test(start_paused = true)]
    async fn target_filter_reboots_only_that_instance() {
        let fake = FakeDeployment::simulated(&[
            ("A", "ReadyRole"),
            ("B", "ReadyRole"),
            ("C", "ReadyRole"),
        ]);
        let output = quiet();

        let summary = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reboot(&service(), DeploymentSlot::Production, Some(&name("B")))
            .await
            .unwrap();

        assert_eq!(fake.actions(), vec![reboot("B")]);
        assert_eq!(summary.instances, vec![name("B")]);
    }

    #[tokio::test(start_paused = true)]
    async fn unmatched_target_warns_and_does_nothing() {
        let fake = FakeDeployment::simulated(&[("A", "ReadyRole")]);
        let output = quiet();

        let summary = Orchestrator::new(&fake, &output)
            .policy(fast())
            .reboot(&service(), DeploymentSlot::Production, Some(&name("Z")))
            .await
            .unwrap();

        assert!(summary.is_noop());
        assert!(fake.actions().is_empty());
        assert_eq!(fake.snapshot_count(), 1);
        assert_eq!(
            summary.diagnostics.warnings()[0].kind,
            WarningKind::UnmatchedTarget
        );
    }
}
