//! Station connection manager: joins a known network, falls back to
//! provisioning when there is none or the join keeps failing, and reports
//! `CONNECTED` / `DISCONNECTED` to application code.
//!
//! Radio, notification and storage plumbing are supplied by the firmware
//! through [`RadioControl`], [`NotificationSource`] and [`CredentialStore`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod callbacks;
pub mod config;
mod control;
mod error;
mod machine;
mod mailbox;
mod manager;
mod ports;
mod retry;
mod shared;
pub mod store;
mod telemetry;
mod translator;
pub mod types;

pub use callbacks::{CallbackRegistry, EventCallback};
pub use config::ManagerConfig;
pub use control::ControlLoop;
pub use error::{CommandKind, InitStage, ManagerError};
pub use machine::{ManagerAction, MachineSnapshot};
pub use mailbox::{EventSet, Mailbox};
pub use manager::WifiManager;
pub use ports::{CredentialStore, NotificationSource, RadioControl};
pub use retry::{RetryDecision, RetryPolicy};
pub use shared::ManagerShared;
pub use store::{FlashCredentialStore, MemoryCredentialStore};
pub use telemetry::ManagerStats;
pub use translator::EventTranslator;
pub use types::{
    Credentials, CredentialsError, CredentialsPayload, InternalEvent, IpEvent, ManagerState,
    Notification, NotificationChannel, ProvisioningEvent, PublicEvent, StationEvent,
};

#[cfg(feature = "esp-logger")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
