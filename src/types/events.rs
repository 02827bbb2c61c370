use super::CredentialsPayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicEvent {
    Connected,
    Disconnected,
}

impl PublicEvent {
    pub const ALL: [PublicEvent; 2] = [Self::Connected, Self::Disconnected];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "WIFI_CONNECTED",
            Self::Disconnected => "WIFI_DISCONNECTED",
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Connected => 0,
            Self::Disconnected => 1,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Connected),
            1 => Some(Self::Disconnected),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self.as_u8() as usize
    }
}

impl TryFrom<u8> for PublicEvent {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(value)
    }
}

impl<'a> TryFrom<&'a str> for PublicEvent {
    type Error = &'a str;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == value)
            .ok_or(value)
    }
}

/// Event kinds the control loop understands. Informational kinds are only
/// logged by the translator and never reach the mailbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InternalEvent {
    StationStarted,
    StationStopped,
    StationConnectedToAp,
    StationDisconnected,
    IpAssigned,
    ProvisioningCredentialsReceived,
    ProvisioningAckDone,
    ProvisioningScanEvents,
    Shutdown,
}

impl InternalEvent {
    /// Dispatch order within one mailbox claim follows ascending bit index.
    pub const DISPATCH_ORDER: [InternalEvent; 6] = [
        Self::StationStarted,
        Self::StationDisconnected,
        Self::IpAssigned,
        Self::ProvisioningCredentialsReceived,
        Self::ProvisioningAckDone,
        Self::Shutdown,
    ];

    pub const fn mailbox_bit(self) -> Option<u8> {
        match self {
            Self::StationStarted => Some(1 << 0),
            Self::StationDisconnected => Some(1 << 1),
            Self::IpAssigned => Some(1 << 2),
            Self::ProvisioningCredentialsReceived => Some(1 << 3),
            Self::ProvisioningAckDone => Some(1 << 4),
            Self::Shutdown => Some(1 << 7),
            Self::StationStopped | Self::StationConnectedToAp | Self::ProvisioningScanEvents => {
                None
            }
        }
    }

    pub const fn is_actionable(self) -> bool {
        self.mailbox_bit().is_some()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StationStarted => "station_started",
            Self::StationStopped => "station_stopped",
            Self::StationConnectedToAp => "station_connected_to_ap",
            Self::StationDisconnected => "station_disconnected",
            Self::IpAssigned => "ip_assigned",
            Self::ProvisioningCredentialsReceived => "provisioning_credentials_received",
            Self::ProvisioningAckDone => "provisioning_ack_done",
            Self::ProvisioningScanEvents => "provisioning_scan_events",
            Self::Shutdown => "shutdown",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationChannel {
    Station,
    Ip,
    Provisioning,
}

impl NotificationChannel {
    pub const ALL: [NotificationChannel; 3] = [Self::Station, Self::Ip, Self::Provisioning];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Ip => "ip",
            Self::Provisioning => "provisioning",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StationEvent {
    Started,
    Stopped,
    Connected,
    Disconnected,
    Other(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IpEvent {
    StationGotIp,
    Other(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProvisioningEvent {
    ScanDone,
    FoundChannel,
    GotCredentials(CredentialsPayload),
    AckDone,
    Other(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    Station(StationEvent),
    Ip(IpEvent),
    Provisioning(ProvisioningEvent),
}

// Numeric identifiers used by the vendor SDK event loop.
const STA_START_ID: i32 = 2;
const STA_STOP_ID: i32 = 3;
const STA_CONNECTED_ID: i32 = 4;
const STA_DISCONNECTED_ID: i32 = 5;
const IP_STA_GOT_IP_ID: i32 = 0;
const SC_SCAN_DONE_ID: i32 = 0;
const SC_FOUND_CHANNEL_ID: i32 = 1;
const SC_GOT_SSID_PSWD_ID: i32 = 2;
const SC_SEND_ACK_DONE_ID: i32 = 3;

impl Notification {
    /// Maps a raw `(channel, identifier, payload)` tuple. Returns `None` only
    /// when the credentials identifier arrives without its payload.
    pub fn decode(
        channel: NotificationChannel,
        id: i32,
        payload: Option<&CredentialsPayload>,
    ) -> Option<Self> {
        let notification = match channel {
            NotificationChannel::Station => Self::Station(match id {
                STA_START_ID => StationEvent::Started,
                STA_STOP_ID => StationEvent::Stopped,
                STA_CONNECTED_ID => StationEvent::Connected,
                STA_DISCONNECTED_ID => StationEvent::Disconnected,
                other => StationEvent::Other(other),
            }),
            NotificationChannel::Ip => Self::Ip(match id {
                IP_STA_GOT_IP_ID => IpEvent::StationGotIp,
                other => IpEvent::Other(other),
            }),
            NotificationChannel::Provisioning => Self::Provisioning(match id {
                SC_SCAN_DONE_ID => ProvisioningEvent::ScanDone,
                SC_FOUND_CHANNEL_ID => ProvisioningEvent::FoundChannel,
                SC_GOT_SSID_PSWD_ID => ProvisioningEvent::GotCredentials(*payload?),
                SC_SEND_ACK_DONE_ID => ProvisioningEvent::AckDone,
                other => ProvisioningEvent::Other(other),
            }),
        };
        Some(notification)
    }

    pub const fn channel(&self) -> NotificationChannel {
        match self {
            Self::Station(_) => NotificationChannel::Station,
            Self::Ip(_) => NotificationChannel::Ip,
            Self::Provisioning(_) => NotificationChannel::Provisioning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_event_names_round_trip() {
        for event in PublicEvent::ALL {
            assert_eq!(PublicEvent::try_from(event.as_str()), Ok(event));
            assert_eq!(PublicEvent::try_from(event.as_u8()), Ok(event));
        }
        assert_eq!(PublicEvent::try_from(2u8), Err(2));
        assert_eq!(PublicEvent::try_from("WIFI_LAST"), Err("WIFI_LAST"));
    }

    #[test]
    fn mailbox_bits_are_distinct_and_ordered() {
        let mut previous = 0u8;
        for event in InternalEvent::DISPATCH_ORDER {
            let bit = event.mailbox_bit().expect("actionable");
            assert_eq!(bit.count_ones(), 1);
            assert!(bit > previous);
            previous = bit;
        }
        assert!(!InternalEvent::StationStopped.is_actionable());
        assert!(!InternalEvent::StationConnectedToAp.is_actionable());
        assert!(!InternalEvent::ProvisioningScanEvents.is_actionable());
    }

    #[test]
    fn decode_maps_sdk_identifiers() {
        assert_eq!(
            Notification::decode(NotificationChannel::Station, 2, None),
            Some(Notification::Station(StationEvent::Started))
        );
        assert_eq!(
            Notification::decode(NotificationChannel::Station, 5, None),
            Some(Notification::Station(StationEvent::Disconnected))
        );
        assert_eq!(
            Notification::decode(NotificationChannel::Ip, 0, None),
            Some(Notification::Ip(IpEvent::StationGotIp))
        );
        assert_eq!(
            Notification::decode(NotificationChannel::Provisioning, 3, None),
            Some(Notification::Provisioning(ProvisioningEvent::AckDone))
        );
        assert_eq!(
            Notification::decode(NotificationChannel::Station, 42, None),
            Some(Notification::Station(StationEvent::Other(42)))
        );
    }

    #[test]
    fn decode_credentials_requires_payload() {
        assert_eq!(
            Notification::decode(NotificationChannel::Provisioning, 2, None),
            None
        );
        let payload = CredentialsPayload::from_parts(b"home", b"secret12", None).expect("payload");
        assert_eq!(
            Notification::decode(NotificationChannel::Provisioning, 2, Some(&payload)),
            Some(Notification::Provisioning(
                ProvisioningEvent::GotCredentials(payload)
            ))
        );
    }
}
