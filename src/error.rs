use core::fmt;

use crate::types::NotificationChannel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStage {
    Subscribe(NotificationChannel),
    StationStart,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribe(channel) => write!(f, "subscribe {}", channel.as_str()),
            Self::StationStart => f.write_str("station start"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    ApplyConfiguration,
    Connect,
    Disconnect,
    StartProvisioning,
    StopProvisioning,
    PersistCredentials,
}

impl CommandKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplyConfiguration => "apply_configuration",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::StartProvisioning => "start_provisioning",
            Self::StopProvisioning => "stop_provisioning",
            Self::PersistCredentials => "persist_credentials",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagerError {
    InitializationFailure(InitStage),
    InvalidEventRegistration,
    CommandFailure(CommandKind),
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationFailure(stage) => write!(f, "initialization failed at {}", stage),
            Self::InvalidEventRegistration => f.write_str("unrecognized public event"),
            Self::CommandFailure(command) => write!(f, "{} command failed", command.as_str()),
        }
    }
}

impl core::error::Error for ManagerError {}
