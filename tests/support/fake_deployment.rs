// ABOUTME: In-memory DeploymentClient for driving waits and orchestration in tests.
// ABOUTME: Serves scripted snapshots or simulates instances cycling after each action.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use reimager::client::{ClientError, DeploymentClient};
use reimager::types::{
    DeploymentSlot, InstanceName, InstanceRecord, InstanceStatus, ServiceName, Snapshot,
};

/// One call made against the fake, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Snapshot,
    Reimage(String),
    Reboot(String),
}

pub fn record(name: &str, status: &str) -> InstanceRecord {
    InstanceRecord::new(
        InstanceName::new(name).unwrap(),
        "WebRole",
        InstanceStatus::from(status),
    )
}

pub fn snapshot(records: &[(&str, &str)]) -> Snapshot {
    records
        .iter()
        .map(|(name, status)| record(name, status))
        .collect::<Vec<_>>()
        .into()
}

pub fn rejected(status: u16) -> ClientError {
    ClientError::Status {
        url: "https://management.test/services".to_string(),
        status,
        code: "ServiceUnavailable".to_string(),
        message: "injected failure".to_string(),
    }
}

enum Source {
    /// Each poll takes the next snapshot; the last one repeats forever.
    Scripted(VecDeque<Snapshot>),
    /// Live instances that step through queued statuses, one per poll.
    Simulated {
        instances: Vec<InstanceRecord>,
        transitions: HashMap<InstanceName, VecDeque<InstanceStatus>>,
    },
}

struct State {
    source: Source,
    calls: Vec<Call>,
    fail_snapshot_on: Option<(usize, u16)>,
    fail_action_on: Option<(String, u16)>,
    snapshots_served: usize,
}

pub struct FakeDeployment {
    state: Mutex<State>,
}

impl FakeDeployment {
    pub fn scripted(snapshots: Vec<Snapshot>) -> Self {
        Self::with_source(Source::Scripted(snapshots.into()))
    }

    /// Every action moves its instance to BusyRole on the next poll and back
    /// to ReadyRole on the one after.
    pub fn simulated(records: &[(&str, &str)]) -> Self {
        Self::with_source(Source::Simulated {
            instances: snapshot(records).instances().to_vec(),
            transitions: HashMap::new(),
        })
    }

    fn with_source(source: Source) -> Self {
        Self {
            state: Mutex::new(State {
                source,
                calls: Vec::new(),
                fail_snapshot_on: None,
                fail_action_on: None,
                snapshots_served: 0,
            }),
        }
    }

    /// The `nth` snapshot call (1-based) fails with HTTP `status`.
    pub fn fail_snapshot_on(self, nth: usize, status: u16) -> Self {
        self.state.lock().fail_snapshot_on = Some((nth, status));
        self
    }

    /// Any action on `instance` fails with HTTP `status`.
    pub fn fail_action_on(self, instance: &str, status: u16) -> Self {
        self.state.lock().fail_action_on = Some((instance.to_string(), status));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn actions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Call::Snapshot)
            .collect()
    }

    pub fn snapshot_count(&self) -> usize {
        self.state.lock().snapshots_served
    }

    fn act(&self, call: Call, instance: &InstanceName) -> Result<(), ClientError> {
        let mut state = self.state.lock();
        state.calls.push(call);

        if let Some((failing, status)) = &state.fail_action_on
            && failing == instance.as_str()
        {
            return Err(rejected(*status));
        }

        if let Source::Simulated { transitions, .. } = &mut state.source {
            transitions.insert(
                instance.clone(),
                VecDeque::from([InstanceStatus::BusyRole, InstanceStatus::ReadyRole]),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl DeploymentClient for FakeDeployment {
    async fn snapshot(
        &self,
        _service: &ServiceName,
        _slot: DeploymentSlot,
    ) -> Result<Snapshot, ClientError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Snapshot);
        state.snapshots_served += 1;

        if let Some((nth, status)) = state.fail_snapshot_on
            && nth == state.snapshots_served
        {
            return Err(rejected(status));
        }

        match &mut state.source {
            Source::Scripted(queue) => {
                if queue.len() > 1 {
                    Ok(queue.pop_front().unwrap_or_default())
                } else {
                    Ok(queue.front().cloned().unwrap_or_default())
                }
            }
            Source::Simulated {
                instances,
                transitions,
            } => {
                for record in instances.iter_mut() {
                    if let Some(next) = transitions
                        .get_mut(&record.name)
                        .and_then(|queue| queue.pop_front())
                    {
                        record.status = next;
                    }
                }
                Ok(Snapshot::new(instances.clone()))
            }
        }
    }

    async fn request_reimage(
        &self,
        _service: &ServiceName,
        instance: &InstanceName,
        _slot: DeploymentSlot,
    ) -> Result<(), ClientError> {
        self.act(Call::Reimage(instance.to_string()), instance)
    }

    async fn request_reboot(
        &self,
        _service: &ServiceName,
        instance: &InstanceName,
        _slot: DeploymentSlot,
    ) -> Result<(), ClientError> {
        self.act(Call::Reboot(instance.to_string()), instance)
    }
}
