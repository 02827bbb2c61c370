use statig::blocking::IntoStateMachineExt as _;

use crate::config::ManagerConfig;

use super::{
    actions::{ActionBuffer, Checkpoint, DispatchStatus, MachineSnapshot},
    events::MachineEvent,
    hsm::{ConnectionHsm, DispatchContext},
};

#[derive(Clone, Debug)]
pub(crate) struct DispatchOutput {
    pub(crate) checkpoint: Checkpoint,
    pub(crate) before: MachineSnapshot,
    pub(crate) after: MachineSnapshot,
    pub(crate) actions: ActionBuffer,
    pub(crate) status: DispatchStatus,
}

pub(crate) struct ConnectionEngine {
    machine: statig::blocking::StateMachine<ConnectionHsm>,
}

impl ConnectionEngine {
    pub(crate) fn new(config: ManagerConfig) -> Self {
        Self {
            machine: ConnectionHsm::new(config).state_machine(),
        }
    }

    pub(crate) fn snapshot(&self) -> MachineSnapshot {
        self.machine.inner().snapshot()
    }

    pub(crate) fn dispatch(&mut self, event: MachineEvent) -> DispatchOutput {
        let checkpoint = self.machine.inner().checkpoint();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        DispatchOutput {
            checkpoint,
            before: checkpoint.snapshot,
            after: self.snapshot(),
            actions: context.actions,
            status: context.status,
        }
    }

    /// Puts the machine back to `checkpoint` after a plan could not be
    /// carried out.
    pub(crate) fn revert(&mut self, checkpoint: Checkpoint) {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&MachineEvent::Revert(checkpoint), &mut context);
    }
}
