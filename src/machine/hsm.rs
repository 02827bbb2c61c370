use log::{debug, info, warn};
use statig::prelude::*;

use crate::{
    config::ManagerConfig,
    retry::{RetryDecision, RetryPolicy},
    types::{Credentials, ManagerState, PublicEvent},
};

use super::{
    actions::{ActionBuffer, Checkpoint, DispatchStatus, MachineSnapshot, ManagerAction},
    events::MachineEvent,
};

#[derive(Default)]
pub(super) struct DispatchContext {
    pub(super) actions: ActionBuffer,
    pub(super) status: DispatchStatus,
}

pub(super) struct ConnectionHsm {
    config: ManagerConfig,
    state: ManagerState,
    retry: RetryPolicy,
    // Provisioned credentials applied, join not yet resolved.
    joining: bool,
}

impl ConnectionHsm {
    pub(super) fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            state: ManagerState::Ready,
            retry: RetryPolicy::new(config.max_retries),
            joining: false,
        }
    }

    pub(super) fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            state: self.state,
            retry_count: self.retry.count(),
        }
    }

    pub(super) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            snapshot: self.snapshot(),
            joining: self.joining,
        }
    }

    fn push(context: &mut DispatchContext, action: ManagerAction) {
        if context.actions.push(action).is_err() {
            warn!("action buffer full; dropping {:?}", action);
        }
        context.status = DispatchStatus::Applied;
    }

    fn enter(&mut self, context: &mut DispatchContext, next: ManagerState) -> Outcome<State> {
        if self.state != next {
            debug!("state {} -> {}", self.state.as_str(), next.as_str());
            context.status = DispatchStatus::Applied;
        }
        self.state = next;
        match next {
            ManagerState::Ready => Transition(State::ready()),
            ManagerState::Connecting => Transition(State::connecting()),
            ManagerState::Connected => Transition(State::connected()),
            ManagerState::Disconnected => Transition(State::disconnected()),
            ManagerState::Provisioning => Transition(State::provisioning()),
        }
    }

    fn start_provisioning(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        self.retry.reset();
        self.joining = false;
        Self::push(context, ManagerAction::StartProvisioning);
        self.enter(context, ManagerState::Provisioning)
    }

    fn on_station_started(
        &mut self,
        context: &mut DispatchContext,
        stored: Option<Credentials>,
    ) -> Outcome<State> {
        self.joining = false;
        match stored.filter(Credentials::has_ssid) {
            Some(credentials) => {
                info!(
                    "stored configuration found ssid={:?}; connecting",
                    credentials.ssid_str()
                );
                Self::push(context, ManagerAction::ApplyConfiguration(credentials));
                Self::push(context, ManagerAction::Connect);
                self.enter(context, ManagerState::Connecting)
            }
            None => {
                info!("no stored configuration; starting provisioning");
                self.start_provisioning(context)
            }
        }
    }

    fn on_station_disconnected(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        match self.retry.on_disconnect() {
            RetryDecision::Retry { attempt } => {
                info!(
                    "retrying connect to the AP ({}/{})",
                    attempt,
                    self.retry.max_retries()
                );
                Self::push(context, ManagerAction::Connect);
                self.enter(context, ManagerState::Disconnected)
            }
            RetryDecision::Exhausted => {
                info!("failed to connect to the AP; starting provisioning");
                Self::push(context, ManagerAction::StopProvisioning);
                let outcome = self.start_provisioning(context);
                // Last, so a failed restart aborts the plan before observers run.
                Self::push(context, ManagerAction::Notify(PublicEvent::Disconnected));
                outcome
            }
        }
    }

    fn on_ip_assigned(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        info!("ip address assigned");
        self.retry.reset();
        self.joining = false;
        Self::push(context, ManagerAction::Notify(PublicEvent::Connected));
        self.enter(context, ManagerState::Connected)
    }

    fn ignore(&self, context: &mut DispatchContext, event: &MachineEvent) -> Outcome<State> {
        debug!("ignoring {:?} in {}", event, self.state.as_str());
        context.status = DispatchStatus::Ignored;
        Handled
    }

    fn on_credentials_received(
        &mut self,
        context: &mut DispatchContext,
        credentials: Credentials,
    ) -> Outcome<State> {
        info!(
            "applying provisioned configuration ssid={:?}",
            credentials.ssid_str()
        );
        Self::push(context, ManagerAction::Disconnect);
        Self::push(context, ManagerAction::ApplyConfiguration(credentials));
        if self.config.persist_provisioned {
            Self::push(context, ManagerAction::PersistCredentials(credentials));
        }
        Self::push(context, ManagerAction::Connect);
        self.joining = true;
        Handled
    }

    fn on_revert(&mut self, context: &mut DispatchContext, to: Checkpoint) -> Outcome<State> {
        self.retry.restore(to.snapshot.retry_count);
        self.joining = to.joining;
        let outcome = self.enter(context, to.snapshot.state);
        context.status = DispatchStatus::Unchanged;
        outcome
    }
}

#[state_machine(initial = "State::ready()")]
impl ConnectionHsm {
    #[state(superstate = "station")]
    fn ready(&mut self, context: &mut DispatchContext, event: &MachineEvent) -> Outcome<State> {
        match event {
            MachineEvent::IpAssigned => self.ignore(context, event),
            _ => Super,
        }
    }

    #[state(superstate = "station")]
    fn connecting(&mut self, context: &mut DispatchContext, event: &MachineEvent) -> Outcome<State> {
        match event {
            MachineEvent::IpAssigned => self.on_ip_assigned(context),
            _ => Super,
        }
    }

    #[state(superstate = "station")]
    fn connected(&mut self, context: &mut DispatchContext, event: &MachineEvent) -> Outcome<State> {
        match event {
            MachineEvent::IpAssigned => self.ignore(context, event),
            _ => Super,
        }
    }

    #[state(superstate = "station")]
    fn disconnected(
        &mut self,
        context: &mut DispatchContext,
        event: &MachineEvent,
    ) -> Outcome<State> {
        match event {
            MachineEvent::IpAssigned => self.on_ip_assigned(context),
            _ => Super,
        }
    }

    #[state(superstate = "station")]
    fn provisioning(
        &mut self,
        context: &mut DispatchContext,
        event: &MachineEvent,
    ) -> Outcome<State> {
        match event {
            MachineEvent::IpAssigned => self.on_ip_assigned(context),
            MachineEvent::StationDisconnected
                if !self.config.retry_while_provisioning && !self.joining =>
            {
                self.ignore(context, event)
            }
            _ => Super,
        }
    }

    #[superstate]
    fn station(&mut self, context: &mut DispatchContext, event: &MachineEvent) -> Outcome<State> {
        match event {
            MachineEvent::StationStarted { stored } => self.on_station_started(context, *stored),
            MachineEvent::StationDisconnected => self.on_station_disconnected(context),
            MachineEvent::CredentialsReceived(credentials) => {
                self.on_credentials_received(context, *credentials)
            }
            MachineEvent::ProvisioningAckDone => {
                info!("provisioning over");
                Self::push(context, ManagerAction::StopProvisioning);
                Handled
            }
            MachineEvent::Revert(checkpoint) => self.on_revert(context, *checkpoint),
            MachineEvent::IpAssigned => self.ignore(context, event),
        }
    }
}
