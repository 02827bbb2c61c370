use core::{convert::Infallible, fmt::Debug};

use embedded_storage::{ReadStorage, Storage};
use log::{info, warn};

use crate::{
    config::{CREDENTIAL_STORE_MAGIC, CREDENTIAL_STORE_RECORD_LEN, CREDENTIAL_STORE_VERSION},
    ports::CredentialStore,
    types::{Credentials, WIFI_BSSID_LEN, WIFI_PASSWORD_MAX, WIFI_SSID_MAX},
};

const SSID_AT: usize = 5;
const PASSWORD_AT: usize = SSID_AT + WIFI_SSID_MAX;
const BSSID_FLAG_AT: usize = PASSWORD_AT + WIFI_PASSWORD_MAX;
const BSSID_AT: usize = BSSID_FLAG_AT + 1;
const CHECKSUM_AT: usize = CREDENTIAL_STORE_RECORD_LEN - 1;

pub(crate) fn record_bytes(credentials: &Credentials) -> [u8; CREDENTIAL_STORE_RECORD_LEN] {
    let mut record = [0xFFu8; CREDENTIAL_STORE_RECORD_LEN];
    record[0..4].copy_from_slice(&CREDENTIAL_STORE_MAGIC.to_le_bytes());
    record[4] = CREDENTIAL_STORE_VERSION;
    record[SSID_AT..PASSWORD_AT].copy_from_slice(&credentials.ssid);
    record[PASSWORD_AT..BSSID_FLAG_AT].copy_from_slice(&credentials.password);
    match credentials.bssid {
        Some(bssid) => {
            record[BSSID_FLAG_AT] = 1;
            record[BSSID_AT..CHECKSUM_AT].copy_from_slice(&bssid);
        }
        None => {
            record[BSSID_FLAG_AT] = 0;
            record[BSSID_AT..CHECKSUM_AT].fill(0);
        }
    }
    record[CHECKSUM_AT] = checksum8(&record[..CHECKSUM_AT]);
    record
}

pub(crate) fn from_record(record: &[u8; CREDENTIAL_STORE_RECORD_LEN]) -> Option<Credentials> {
    if record.iter().all(|&byte| byte == 0xFF) {
        return None;
    }
    if u32::from_le_bytes([record[0], record[1], record[2], record[3]]) != CREDENTIAL_STORE_MAGIC {
        return None;
    }
    if record[4] != CREDENTIAL_STORE_VERSION {
        return None;
    }
    if checksum8(&record[..CHECKSUM_AT]) != record[CHECKSUM_AT] {
        return None;
    }

    let mut credentials = Credentials {
        ssid: [0u8; WIFI_SSID_MAX],
        password: [0u8; WIFI_PASSWORD_MAX],
        bssid: None,
    };
    credentials
        .ssid
        .copy_from_slice(&record[SSID_AT..PASSWORD_AT]);
    credentials
        .password
        .copy_from_slice(&record[PASSWORD_AT..BSSID_FLAG_AT]);
    credentials.bssid = match record[BSSID_FLAG_AT] {
        0 => None,
        1 => {
            let mut bssid = [0u8; WIFI_BSSID_LEN];
            bssid.copy_from_slice(&record[BSSID_AT..CHECKSUM_AT]);
            Some(bssid)
        }
        _ => return None,
    };
    Some(credentials)
}

fn checksum8(bytes: &[u8]) -> u8 {
    let mut acc = 0x5Au8;
    for &byte in bytes {
        acc ^= byte.rotate_left(1);
    }
    acc
}

#[derive(Debug)]
pub enum StoreError<E> {
    Flash(E),
    OutOfRange,
}

/// One credential record at a fixed flash offset.
pub struct FlashCredentialStore<F> {
    flash: F,
    offset: u32,
}

impl<F> FlashCredentialStore<F>
where
    F: ReadStorage + Storage,
{
    pub fn new(flash: F, offset: u32) -> Self {
        Self { flash, offset }
    }

    /// Places the record at the start of the last sector of `flash`.
    pub fn at_last_sector(flash: F, sector_size: u32) -> Self {
        let capacity = flash.capacity() as u32;
        let offset = capacity.saturating_sub(sector_size);
        Self { flash, offset }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    fn fits(&self) -> bool {
        (self.offset as usize).saturating_add(CREDENTIAL_STORE_RECORD_LEN) <= self.flash.capacity()
    }

    pub fn load(&mut self) -> Result<Option<Credentials>, StoreError<F::Error>> {
        if !self.fits() {
            return Err(StoreError::OutOfRange);
        }
        let mut record = [0u8; CREDENTIAL_STORE_RECORD_LEN];
        self.flash
            .read(self.offset, &mut record)
            .map_err(StoreError::Flash)?;
        Ok(from_record(&record))
    }

    pub fn save(&mut self, credentials: &Credentials) -> Result<(), StoreError<F::Error>> {
        if self.load()? == Some(*credentials) {
            return Ok(());
        }
        let record = record_bytes(credentials);
        self.flash
            .write(self.offset, &record)
            .map_err(StoreError::Flash)
    }
}

impl<F> CredentialStore for FlashCredentialStore<F>
where
    F: ReadStorage + Storage,
    F::Error: Debug,
{
    type Error = StoreError<F::Error>;

    fn stored_credentials(&mut self) -> Option<Credentials> {
        match self.load() {
            Ok(credentials) => credentials,
            Err(err) => {
                warn!("credential store read err={:?}", err);
                None
            }
        }
    }

    fn persist_credentials(&mut self, credentials: &Credentials) -> Result<(), Self::Error> {
        self.save(credentials)?;
        info!("credentials stored ssid={:?}", credentials.ssid_str());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryCredentialStore {
    pub credentials: Option<Credentials>,
}

impl MemoryCredentialStore {
    pub const fn empty() -> Self {
        Self { credentials: None }
    }

    pub const fn with(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    type Error = Infallible;

    fn stored_credentials(&mut self) -> Option<Credentials> {
        self.credentials
    }

    fn persist_credentials(&mut self, credentials: &Credentials) -> Result<(), Self::Error> {
        self.credentials = Some(*credentials);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTOR: u32 = 4096;

    struct RamFlash {
        bytes: [u8; 2 * SECTOR as usize],
        writes: usize,
    }

    impl RamFlash {
        fn erased() -> Self {
            Self {
                bytes: [0xFF; 2 * SECTOR as usize],
                writes: 0,
            }
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    struct OutOfBounds;

    impl ReadStorage for RamFlash {
        type Error = OutOfBounds;

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            let start = offset as usize;
            let src = self
                .bytes
                .get(start..start + bytes.len())
                .ok_or(OutOfBounds)?;
            bytes.copy_from_slice(src);
            Ok(())
        }

        fn capacity(&self) -> usize {
            self.bytes.len()
        }
    }

    impl Storage for RamFlash {
        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            let start = offset as usize;
            let dst = self
                .bytes
                .get_mut(start..start + bytes.len())
                .ok_or(OutOfBounds)?;
            dst.copy_from_slice(bytes);
            self.writes += 1;
            Ok(())
        }
    }

    fn home() -> Credentials {
        Credentials::from_parts(b"home", b"secret12", Some([1, 2, 3, 4, 5, 6])).expect("creds")
    }

    #[test]
    fn erased_flash_has_no_credentials() {
        let mut store = FlashCredentialStore::at_last_sector(RamFlash::erased(), SECTOR);
        assert_eq!(store.offset(), SECTOR);
        assert_eq!(store.stored_credentials(), None);
    }

    #[test]
    fn persisted_credentials_are_loaded_back() {
        let mut store = FlashCredentialStore::at_last_sector(RamFlash::erased(), SECTOR);
        store.persist_credentials(&home()).expect("persist");

        let mut reopened = FlashCredentialStore::at_last_sector(store.into_inner(), SECTOR);
        let loaded = reopened.stored_credentials().expect("stored");
        assert_eq!(loaded, home());
        assert_eq!(loaded.ssid_bytes(), b"home");
    }

    #[test]
    fn unchanged_record_is_not_rewritten() {
        let mut store = FlashCredentialStore::new(RamFlash::erased(), 0);
        store.save(&home()).expect("save");
        store.save(&home()).expect("save again");
        assert_eq!(store.into_inner().writes, 1);
    }

    #[test]
    fn corrupted_record_is_rejected() {
        let mut record = record_bytes(&home());
        record[SSID_AT] ^= 0x01;
        assert!(from_record(&record).is_none());
    }

    #[test]
    fn rejects_other_version() {
        let mut record = record_bytes(&home());
        record[4] = CREDENTIAL_STORE_VERSION.wrapping_add(1);
        record[CHECKSUM_AT] = checksum8(&record[..CHECKSUM_AT]);
        assert!(from_record(&record).is_none());
    }

    #[test]
    fn offset_past_capacity_is_an_error() {
        let mut store = FlashCredentialStore::new(RamFlash::erased(), 2 * SECTOR);
        assert!(matches!(store.load(), Err(StoreError::OutOfRange)));
        assert_eq!(store.stored_credentials(), None);
        assert!(matches!(
            store.persist_credentials(&home()),
            Err(StoreError::OutOfRange)
        ));
    }

    #[test]
    fn memory_store_keeps_latest() {
        let mut store = MemoryCredentialStore::empty();
        assert_eq!(store.stored_credentials(), None);
        store.persist_credentials(&home()).expect("persist");
        assert_eq!(store.stored_credentials(), Some(home()));
    }
}
