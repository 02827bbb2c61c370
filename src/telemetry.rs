use core::sync::atomic::{AtomicU32, Ordering};

pub(crate) struct Counters {
    connect_attempts: AtomicU32,
    provisioning_starts: AtomicU32,
    command_failures: AtomicU32,
    credentials_captured: AtomicU32,
    connected_events: AtomicU32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManagerStats {
    pub connect_attempts: u32,
    pub provisioning_starts: u32,
    pub command_failures: u32,
    pub credentials_captured: u32,
    pub connected_events: u32,
}

impl Counters {
    pub(crate) const fn new() -> Self {
        Self {
            connect_attempts: AtomicU32::new(0),
            provisioning_starts: AtomicU32::new(0),
            command_failures: AtomicU32::new(0),
            credentials_captured: AtomicU32::new(0),
            connected_events: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_connect_attempt(&self) {
        self.connect_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_provisioning_start(&self) {
        self.provisioning_starts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_command_failure(&self) {
        self.command_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_credentials_captured(&self) {
        self.credentials_captured.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_connected(&self) {
        self.connected_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ManagerStats {
        ManagerStats {
            connect_attempts: self.connect_attempts.load(Ordering::Relaxed),
            provisioning_starts: self.provisioning_starts.load(Ordering::Relaxed),
            command_failures: self.command_failures.load(Ordering::Relaxed),
            credentials_captured: self.credentials_captured.load(Ordering::Relaxed),
            connected_events: self.connected_events.load(Ordering::Relaxed),
        }
    }
}
