use core::{
    cell::Cell,
    sync::atomic::{AtomicU8, Ordering},
};

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::{
    mailbox::Mailbox,
    telemetry::{Counters, ManagerStats},
    translator::EventTranslator,
    types::{Credentials, InternalEvent, ManagerState},
};

/// State shared between notification producers and the control loop. It has
/// to outlive every subscription handed to the notification source, so it is
/// usually placed in a `static`.
pub struct ManagerShared {
    pub(crate) mailbox: Mailbox,
    captured: Mutex<CriticalSectionRawMutex, Cell<Option<Credentials>>>,
    state: AtomicU8,
    pub(crate) counters: Counters,
}

impl Default for ManagerShared {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagerShared {
    pub const fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
            captured: Mutex::new(Cell::new(None)),
            state: AtomicU8::new(ManagerState::Ready.as_u8()),
            counters: Counters::new(),
        }
    }

    pub fn translator(&self) -> EventTranslator<'_> {
        EventTranslator::new(self)
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Most recent credentials from provisioning. Never cleared.
    pub fn captured_credentials(&self) -> Option<Credentials> {
        self.captured.lock(|captured| captured.get())
    }

    pub(crate) fn store_captured(&self, credentials: Credentials) {
        self.captured.lock(|captured| captured.set(Some(credentials)));
    }

    pub fn state(&self) -> ManagerState {
        ManagerState::from_u8(self.state.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub(crate) fn publish_state(&self, state: ManagerState) {
        self.state.store(state.as_u8(), Ordering::Relaxed);
    }

    pub fn stats(&self) -> ManagerStats {
        self.counters.snapshot()
    }

    /// Asks the control loop to return after the batch it is processing.
    pub fn request_shutdown(&self) {
        self.mailbox.post(InternalEvent::Shutdown);
    }
}
