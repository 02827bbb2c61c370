use crate::types::{Credentials, ManagerState, PublicEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagerAction {
    ApplyConfiguration(Credentials),
    Connect,
    Disconnect,
    StartProvisioning,
    StopProvisioning,
    Notify(PublicEvent),
    PersistCredentials(Credentials),
}

impl ManagerAction {
    /// A failed best-effort command is logged and the remaining actions still
    /// run; any other failure aborts the rest of the plan.
    pub const fn is_best_effort(&self) -> bool {
        matches!(self, Self::StopProvisioning | Self::PersistCredentials(_))
    }
}

pub type ActionBuffer = heapless::Vec<ManagerAction, 4>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub state: ManagerState,
    pub retry_count: u8,
}

/// Everything a failed plan has to roll back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    pub(crate) snapshot: MachineSnapshot,
    pub(crate) joining: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchStatus {
    Applied,
    #[default]
    Unchanged,
    Ignored,
}
