use core::fmt;

pub const WIFI_SSID_MAX: usize = 32;
pub const WIFI_PASSWORD_MAX: usize = 64;
pub const WIFI_BSSID_LEN: usize = 6;

/// Credentials as delivered by the provisioning exchange. Both text fields are
/// full fixed-width buffers; bytes past the value are padding and may be
/// anything.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CredentialsPayload {
    pub ssid: [u8; WIFI_SSID_MAX],
    pub password: [u8; WIFI_PASSWORD_MAX],
    pub bssid_set: bool,
    pub bssid: [u8; WIFI_BSSID_LEN],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    SsidEmpty,
    SsidTooLong,
    PasswordTooLong,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SsidEmpty => f.write_str("ssid is empty"),
            Self::SsidTooLong => f.write_str("ssid longer than 32 bytes"),
            Self::PasswordTooLong => f.write_str("password longer than 64 bytes"),
        }
    }
}

impl CredentialsPayload {
    pub fn from_parts(
        ssid: &[u8],
        password: &[u8],
        bssid: Option<[u8; WIFI_BSSID_LEN]>,
    ) -> Result<Self, CredentialsError> {
        if ssid.is_empty() {
            return Err(CredentialsError::SsidEmpty);
        }
        if ssid.len() > WIFI_SSID_MAX {
            return Err(CredentialsError::SsidTooLong);
        }
        if password.len() > WIFI_PASSWORD_MAX {
            return Err(CredentialsError::PasswordTooLong);
        }
        let mut payload = Self {
            ssid: [0u8; WIFI_SSID_MAX],
            password: [0u8; WIFI_PASSWORD_MAX],
            bssid_set: bssid.is_some(),
            bssid: bssid.unwrap_or([0u8; WIFI_BSSID_LEN]),
        };
        payload.ssid[..ssid.len()].copy_from_slice(ssid);
        payload.password[..password.len()].copy_from_slice(password);
        Ok(payload)
    }
}

impl fmt::Debug for CredentialsPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsPayload")
            .field("ssid", &DisplayBytes(trim_nul(&self.ssid)))
            .field("bssid_set", &self.bssid_set)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: [u8; WIFI_SSID_MAX],
    pub password: [u8; WIFI_PASSWORD_MAX],
    pub bssid: Option<[u8; WIFI_BSSID_LEN]>,
}

impl Credentials {
    pub fn from_parts(
        ssid: &[u8],
        password: &[u8],
        bssid: Option<[u8; WIFI_BSSID_LEN]>,
    ) -> Result<Self, CredentialsError> {
        CredentialsPayload::from_parts(ssid, password, bssid).map(|payload| Self::capture(&payload))
    }

    /// Copies the full fixed-width fields; padding is carried verbatim.
    pub fn capture(payload: &CredentialsPayload) -> Self {
        Self {
            ssid: payload.ssid,
            password: payload.password,
            bssid: payload.bssid_set.then_some(payload.bssid),
        }
    }

    /// A stored set is usable when its SSID is non-empty up to the first NUL.
    pub fn has_ssid(&self) -> bool {
        self.ssid[0] != 0
    }

    pub fn ssid_bytes(&self) -> &[u8] {
        trim_nul(&self.ssid)
    }

    pub fn password_bytes(&self) -> &[u8] {
        trim_nul(&self.password)
    }

    pub fn ssid_str(&self) -> Option<&str> {
        core::str::from_utf8(self.ssid_bytes()).ok()
    }
}

// Password is left out on purpose so credentials can go through `{:?}` in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &DisplayBytes(self.ssid_bytes()))
            .field("bssid", &self.bssid)
            .finish_non_exhaustive()
    }
}

fn trim_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

struct DisplayBytes<'a>(&'a [u8]);

impl fmt::Debug for DisplayBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.0) {
            Ok(text) => write!(f, "{:?}", text),
            Err(_) => write!(f, "<non_utf8 len={}>", self.0.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_without_bssid_leaves_it_empty() {
        let payload = CredentialsPayload::from_parts(b"home", b"secret12", None).expect("payload");
        let credentials = Credentials::capture(&payload);
        assert_eq!(credentials.bssid, None);
        assert_eq!(credentials.ssid_bytes(), b"home");
        assert_eq!(credentials.password_bytes(), b"secret12");
    }

    #[test]
    fn capture_with_bssid_stores_exact_bytes() {
        let bssid = [0x24, 0x0a, 0xc4, 0x01, 0x02, 0x03];
        let payload =
            CredentialsPayload::from_parts(b"home", b"secret12", Some(bssid)).expect("payload");
        let credentials = Credentials::capture(&payload);
        assert_eq!(credentials.bssid, Some(bssid));
    }

    #[test]
    fn capture_ignores_bssid_bytes_when_flag_clear() {
        let mut payload = CredentialsPayload::from_parts(b"home", b"", None).expect("payload");
        payload.bssid = [1, 2, 3, 4, 5, 6];
        assert_eq!(Credentials::capture(&payload).bssid, None);
    }

    #[test]
    fn capture_copies_padding_after_terminator_verbatim() {
        let mut payload = CredentialsPayload::from_parts(b"lab", b"pw", None).expect("payload");
        payload.ssid[4] = 0xEE;
        payload.ssid[31] = 0x7F;
        payload.password[63] = 0x42;
        let credentials = Credentials::capture(&payload);
        assert_eq!(credentials.ssid, payload.ssid);
        assert_eq!(credentials.password, payload.password);
        assert_eq!(credentials.ssid_bytes(), b"lab");
    }

    #[test]
    fn full_width_ssid_without_terminator_is_kept() {
        let ssid = [b'a'; WIFI_SSID_MAX];
        let credentials = Credentials::from_parts(&ssid, b"", None).expect("credentials");
        assert_eq!(credentials.ssid_bytes().len(), WIFI_SSID_MAX);
        assert!(credentials.has_ssid());
    }

    #[test]
    fn rejects_out_of_range_parts() {
        assert_eq!(
            CredentialsPayload::from_parts(b"", b"pw", None),
            Err(CredentialsError::SsidEmpty)
        );
        assert_eq!(
            CredentialsPayload::from_parts(&[b'x'; 33], b"pw", None),
            Err(CredentialsError::SsidTooLong)
        );
        assert_eq!(
            CredentialsPayload::from_parts(b"ok", &[b'x'; 65], None),
            Err(CredentialsError::PasswordTooLong)
        );
    }

    #[test]
    fn debug_output_omits_password() {
        let credentials = Credentials::from_parts(b"home", b"secret12", None).expect("credentials");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("home"));
        assert!(!rendered.contains("secret12"));
    }
}
