mod credentials;
mod events;
mod state;

pub use credentials::{
    Credentials, CredentialsError, CredentialsPayload, WIFI_BSSID_LEN, WIFI_PASSWORD_MAX,
    WIFI_SSID_MAX,
};
pub use events::{
    InternalEvent, IpEvent, Notification, NotificationChannel, ProvisioningEvent, PublicEvent,
    StationEvent,
};
pub use state::ManagerState;
