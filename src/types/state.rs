#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ManagerState {
    #[default]
    Ready,
    Connecting,
    Connected,
    Disconnected,
    Provisioning,
}

impl ManagerState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::Provisioning => "Provisioning",
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Ready => 0,
            Self::Connecting => 1,
            Self::Connected => 2,
            Self::Disconnected => 3,
            Self::Provisioning => 4,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ready),
            1 => Some(Self::Connecting),
            2 => Some(Self::Connected),
            3 => Some(Self::Disconnected),
            4 => Some(Self::Provisioning),
            _ => None,
        }
    }
}
