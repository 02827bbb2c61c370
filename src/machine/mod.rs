mod actions;
mod engine;
mod events;
mod hsm;

pub use actions::{MachineSnapshot, ManagerAction};
pub(crate) use actions::DispatchStatus;
pub(crate) use engine::{ConnectionEngine, DispatchOutput};
pub(crate) use events::MachineEvent;
