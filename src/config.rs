// Retry budget before the manager gives up on the stored network and asks
// for new credentials.
pub const WIFI_RETRY_MAX_DEFAULT: u8 = 20;
pub const WIFI_RETRY_MAX_LIMIT: u8 = 100;

pub const CREDENTIAL_STORE_MAGIC: u32 = 0x5749_4643;
pub const CREDENTIAL_STORE_VERSION: u8 = 1;
// magic + version + ssid + password + bssid flag + bssid + checksum
pub const CREDENTIAL_STORE_RECORD_LEN: usize = 4 + 1 + 32 + 64 + 1 + 6 + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManagerConfig {
    pub max_retries: u8,
    /// Whether a disconnect seen while provisioning spends the retry budget
    /// and issues a connect. When false such disconnects are ignored until
    /// provisioned credentials have been applied.
    pub retry_while_provisioning: bool,
    pub persist_provisioned: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ManagerConfig {
    pub const fn defaults() -> Self {
        Self {
            max_retries: WIFI_RETRY_MAX_DEFAULT,
            retry_while_provisioning: true,
            persist_provisioned: true,
        }
    }

    pub const fn sanitized(self) -> Self {
        Self {
            max_retries: clamp_u8(self.max_retries, 1, WIFI_RETRY_MAX_LIMIT),
            ..self
        }
    }
}

const fn clamp_u8(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
