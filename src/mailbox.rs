use core::cell::Cell;

use embassy_sync::{
    blocking_mutex::{raw::CriticalSectionRawMutex, Mutex},
    signal::Signal,
};

use crate::types::InternalEvent;

/// Set of pending actionable event kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventSet {
    bits: u8,
}

impl EventSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn bits(self) -> u8 {
        self.bits
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub const fn contains(self, event: InternalEvent) -> bool {
        match event.mailbox_bit() {
            Some(bit) => self.bits & bit != 0,
            None => false,
        }
    }

    #[must_use]
    pub const fn with(self, event: InternalEvent) -> Self {
        match event.mailbox_bit() {
            Some(bit) => Self {
                bits: self.bits | bit,
            },
            None => self,
        }
    }

    /// Yields every pending kind once, in dispatch order. Bits that map to
    /// no known kind are skipped.
    pub fn iter(self) -> impl Iterator<Item = InternalEvent> {
        InternalEvent::DISPATCH_ORDER
            .into_iter()
            .filter(move |event| self.contains(*event))
    }

    pub const fn unknown_bits(self) -> u8 {
        let mut known = 0u8;
        let mut idx = 0;
        while idx < InternalEvent::DISPATCH_ORDER.len() {
            if let Some(bit) = InternalEvent::DISPATCH_ORDER[idx].mailbox_bit() {
                known |= bit;
            }
            idx += 1;
        }
        self.bits & !known
    }
}

/// Multi-producer, single-consumer set of pending event kinds. Posting an
/// already pending kind coalesces with it.
pub struct Mailbox {
    pending: Mutex<CriticalSectionRawMutex, Cell<EventSet>>,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailbox {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(EventSet::empty())),
            wake: Signal::new(),
        }
    }

    /// Returns false when the event is informational and was not queued.
    pub fn post(&self, event: InternalEvent) -> bool {
        if !event.is_actionable() {
            return false;
        }
        self.pending
            .lock(|pending| pending.set(pending.get().with(event)));
        self.wake.signal(());
        true
    }

    pub fn post_raw(&self, bits: u8) {
        self.pending
            .lock(|pending| pending.set(EventSet::from_bits(pending.get().bits() | bits)));
        self.wake.signal(());
    }

    pub fn peek(&self) -> EventSet {
        self.pending.lock(|pending| pending.get())
    }

    /// Claims and clears everything pending right now.
    pub fn take(&self) -> EventSet {
        self.pending.lock(|pending| pending.replace(EventSet::empty()))
    }

    /// Waits until at least one kind is pending, then claims the set.
    pub async fn wait(&self) -> EventSet {
        loop {
            let claimed = self.take();
            if !claimed.is_empty() {
                return claimed;
            }
            self.wake.wait().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Barrier,
        },
        thread,
        vec::Vec,
    };

    use embassy_futures::{block_on, join::join};

    use super::*;

    #[test]
    fn simultaneous_kinds_are_each_dispatched_in_fixed_order() {
        let mailbox = Mailbox::new();
        assert!(mailbox.post(InternalEvent::IpAssigned));
        assert!(mailbox.post(InternalEvent::StationStarted));
        assert!(mailbox.post(InternalEvent::ProvisioningAckDone));

        let claimed = mailbox.take();
        let order: Vec<_> = claimed.iter().collect();
        assert_eq!(
            order,
            [
                InternalEvent::StationStarted,
                InternalEvent::IpAssigned,
                InternalEvent::ProvisioningAckDone,
            ]
        );
        assert!(mailbox.peek().is_empty());
    }

    #[test]
    fn repeated_posts_coalesce() {
        let mailbox = Mailbox::new();
        mailbox.post(InternalEvent::StationDisconnected);
        mailbox.post(InternalEvent::StationDisconnected);
        assert_eq!(mailbox.take().iter().count(), 1);
    }

    #[test]
    fn informational_events_are_not_queued() {
        let mailbox = Mailbox::new();
        assert!(!mailbox.post(InternalEvent::StationStopped));
        assert!(!mailbox.post(InternalEvent::ProvisioningScanEvents));
        assert!(mailbox.peek().is_empty());
    }

    #[test]
    fn unknown_bits_are_reported_and_skipped() {
        let mailbox = Mailbox::new();
        mailbox.post_raw(0b0100_0001);
        let claimed = mailbox.take();
        assert_eq!(claimed.unknown_bits(), 0b0100_0000);
        assert_eq!(
            claimed.iter().collect::<Vec<_>>(),
            [InternalEvent::StationStarted]
        );
    }

    #[test]
    fn wait_returns_kinds_posted_before_and_during_wait() {
        let mailbox = Mailbox::new();
        mailbox.post(InternalEvent::StationStarted);
        let first = block_on(mailbox.wait());
        assert!(first.contains(InternalEvent::StationStarted));

        let (second, _) = block_on(join(mailbox.wait(), async {
            mailbox.post(InternalEvent::IpAssigned);
        }));
        assert!(second.contains(InternalEvent::IpAssigned));
        assert!(!second.contains(InternalEvent::StationStarted));
    }

    const PRODUCED: [InternalEvent; 5] = [
        InternalEvent::StationStarted,
        InternalEvent::StationDisconnected,
        InternalEvent::IpAssigned,
        InternalEvent::ProvisioningCredentialsReceived,
        InternalEvent::ProvisioningAckDone,
    ];

    fn slot(event: InternalEvent) -> usize {
        PRODUCED
            .iter()
            .position(|known| *known == event)
            .expect("produced kind")
    }

    #[test]
    fn waiter_claims_each_kind_posted_from_other_threads_once() {
        let mailbox = Mailbox::new();
        let start = Barrier::new(PRODUCED.len());
        let mut claims = [0u32; PRODUCED.len()];

        thread::scope(|scope| {
            for event in PRODUCED {
                let mailbox = &mailbox;
                let start = &start;
                scope.spawn(move || {
                    start.wait();
                    assert!(mailbox.post(event));
                });
            }

            let mut seen = 0;
            while seen < PRODUCED.len() {
                for event in block_on(mailbox.wait()).iter() {
                    claims[slot(event)] += 1;
                    seen += 1;
                }
            }
        });

        assert_eq!(claims, [1; PRODUCED.len()]);
        assert!(mailbox.peek().is_empty());
    }

    #[test]
    fn concurrent_posts_are_never_claimed_more_often_than_posted() {
        const POSTS: u32 = 500;
        let mailbox = Mailbox::new();
        let finished = AtomicUsize::new(0);
        let mut claims = [0u32; PRODUCED.len()];

        thread::scope(|scope| {
            for event in PRODUCED {
                let mailbox = &mailbox;
                let finished = &finished;
                scope.spawn(move || {
                    for _ in 0..POSTS {
                        mailbox.post(event);
                        thread::yield_now();
                    }
                    finished.fetch_add(1, Ordering::SeqCst);
                });
            }

            loop {
                let done = finished.load(Ordering::SeqCst) == PRODUCED.len();
                let claimed = mailbox.take();
                for event in claimed.iter() {
                    claims[slot(event)] += 1;
                }
                if done && claimed.is_empty() {
                    break;
                }
                thread::yield_now();
            }
        });

        for count in claims {
            assert!(count >= 1);
            assert!(count <= POSTS);
        }
    }
}
