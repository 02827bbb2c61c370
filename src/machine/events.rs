use crate::types::Credentials;

use super::actions::Checkpoint;

/// Internal events with the data the loop resolved for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MachineEvent {
    StationStarted { stored: Option<Credentials> },
    StationDisconnected,
    IpAssigned,
    CredentialsReceived(Credentials),
    ProvisioningAckDone,
    Revert(Checkpoint),
}
