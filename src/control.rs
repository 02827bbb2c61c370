use log::{debug, info, warn};

use crate::{
    callbacks::CallbackRegistry,
    config::ManagerConfig,
    error::{CommandKind, ManagerError},
    machine::{
        ConnectionEngine, DispatchOutput, DispatchStatus, MachineEvent, MachineSnapshot,
        ManagerAction,
    },
    mailbox::EventSet,
    ports::{CredentialStore, RadioControl},
    shared::ManagerShared,
    types::{InternalEvent, ManagerState, PublicEvent},
};

/// The single consumer of the mailbox. All state transitions and commands
/// happen here, one event at a time.
pub struct ControlLoop<'a, R, S> {
    shared: &'a ManagerShared,
    engine: ConnectionEngine,
    radio: R,
    store: S,
    callbacks: CallbackRegistry,
}

impl<'a, R, S> ControlLoop<'a, R, S>
where
    R: RadioControl,
    S: CredentialStore,
{
    pub(crate) fn new(
        shared: &'a ManagerShared,
        config: ManagerConfig,
        radio: R,
        store: S,
        callbacks: CallbackRegistry,
    ) -> Self {
        shared.publish_state(ManagerState::Ready);
        Self {
            shared,
            engine: ConnectionEngine::new(config),
            radio,
            store,
            callbacks,
        }
    }

    pub fn register_event<E, F>(&mut self, event: E, callback: F) -> Result<(), ManagerError>
    where
        E: TryInto<PublicEvent>,
        F: FnMut(PublicEvent) + 'static,
    {
        self.callbacks.register(event, callback)
    }

    pub fn state(&self) -> ManagerState {
        self.engine.snapshot().state
    }

    pub fn retry_count(&self) -> u8 {
        self.engine.snapshot().retry_count
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        self.engine.snapshot()
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs until a shutdown event is claimed. Blocks only while the mailbox
    /// is empty.
    pub async fn run(mut self) {
        info!("wifi handler started");
        loop {
            let batch = self.shared.mailbox.wait().await;
            if !self.process_batch(batch) {
                info!("wifi handler stopped");
                return;
            }
        }
    }

    /// Processes whatever is pending without waiting. Returns false once a
    /// shutdown event has been seen.
    pub fn process_pending(&mut self) -> bool {
        let batch = self.shared.mailbox.take();
        self.process_batch(batch)
    }

    fn process_batch(&mut self, batch: EventSet) -> bool {
        let unknown = batch.unknown_bits();
        if unknown != 0 {
            info!("wifi event bits {:#04x} ignored", unknown);
        }
        let mut keep_running = true;
        for event in batch.iter() {
            if matches!(event, InternalEvent::Shutdown) {
                keep_running = false;
                continue;
            }
            self.process_event(event);
        }
        keep_running
    }

    pub fn process_event(&mut self, event: InternalEvent) {
        let Some(machine_event) = self.resolve(event) else {
            return;
        };
        let output = self.engine.dispatch(machine_event);
        self.carry_out(&output);
        self.shared.publish_state(self.engine.snapshot().state);
    }

    fn resolve(&mut self, event: InternalEvent) -> Option<MachineEvent> {
        match event {
            InternalEvent::StationStarted => {
                info!("wifi station started");
                Some(MachineEvent::StationStarted {
                    stored: self.store.stored_credentials(),
                })
            }
            InternalEvent::StationDisconnected => {
                info!("wifi disconnected from AP");
                Some(MachineEvent::StationDisconnected)
            }
            InternalEvent::IpAssigned => Some(MachineEvent::IpAssigned),
            InternalEvent::ProvisioningCredentialsReceived => {
                match self.shared.captured_credentials() {
                    Some(credentials) => Some(MachineEvent::CredentialsReceived(credentials)),
                    None => {
                        warn!("credentials event without captured credentials");
                        None
                    }
                }
            }
            InternalEvent::ProvisioningAckDone => Some(MachineEvent::ProvisioningAckDone),
            InternalEvent::StationStopped
            | InternalEvent::StationConnectedToAp
            | InternalEvent::ProvisioningScanEvents
            | InternalEvent::Shutdown => {
                info!("wifi event {}", event.as_str());
                None
            }
        }
    }

    fn carry_out(&mut self, output: &DispatchOutput) {
        if matches!(output.status, DispatchStatus::Ignored) {
            return;
        }
        for action in output.actions.iter() {
            let Err(command) = self.issue(action) else {
                continue;
            };
            if action.is_best_effort() {
                continue;
            }
            warn!(
                "{}; staying in {} retry={}",
                ManagerError::CommandFailure(command),
                output.before.state.as_str(),
                output.before.retry_count
            );
            self.engine.revert(output.checkpoint);
            return;
        }
        if output.before != output.after {
            debug!(
                "now {} retry={}",
                output.after.state.as_str(),
                output.after.retry_count
            );
        }
    }

    fn issue(&mut self, action: &ManagerAction) -> Result<(), CommandKind> {
        let counters = &self.shared.counters;
        let (command, result) = match action {
            ManagerAction::Notify(event) => {
                if matches!(event, PublicEvent::Connected) {
                    counters.record_connected();
                }
                if !self.callbacks.invoke(*event) {
                    debug!("no callback for {}", event.as_str());
                }
                return Ok(());
            }
            ManagerAction::PersistCredentials(credentials) => {
                return self.store.persist_credentials(credentials).map_err(|err| {
                    counters.record_command_failure();
                    warn!("persist_credentials err={:?}", err);
                    CommandKind::PersistCredentials
                });
            }
            ManagerAction::ApplyConfiguration(credentials) => (
                CommandKind::ApplyConfiguration,
                self.radio.apply_configuration(credentials),
            ),
            ManagerAction::Connect => {
                counters.record_connect_attempt();
                (CommandKind::Connect, self.radio.connect())
            }
            ManagerAction::Disconnect => (CommandKind::Disconnect, self.radio.disconnect()),
            ManagerAction::StartProvisioning => (
                CommandKind::StartProvisioning,
                self.radio.start_provisioning(),
            ),
            ManagerAction::StopProvisioning => {
                (CommandKind::StopProvisioning, self.radio.stop_provisioning())
            }
        };
        match result {
            Ok(()) => {
                if matches!(command, CommandKind::StartProvisioning) {
                    counters.record_provisioning_start();
                }
                Ok(())
            }
            Err(err) => {
                counters.record_command_failure();
                warn!("{} err={:?}", command.as_str(), err);
                Err(command)
            }
        }
    }
}
