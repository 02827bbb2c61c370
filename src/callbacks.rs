use alloc::boxed::Box;

use crate::error::ManagerError;
use crate::types::PublicEvent;

pub type EventCallback = Box<dyn FnMut(PublicEvent)>;

/// At most one observer per public event; a later registration replaces the
/// earlier one. Callbacks run on the control loop and stall it while they run.
#[derive(Default)]
pub struct CallbackRegistry {
    slots: [Option<EventCallback>; PublicEvent::ALL.len()],
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a `PublicEvent`, its numeric id or its `WIFI_*` name.
    pub fn register<E, F>(&mut self, event: E, callback: F) -> Result<(), ManagerError>
    where
        E: TryInto<PublicEvent>,
        F: FnMut(PublicEvent) + 'static,
    {
        let event = event
            .try_into()
            .map_err(|_| ManagerError::InvalidEventRegistration)?;
        self.slots[event.index()] = Some(Box::new(callback));
        Ok(())
    }

    pub fn is_registered(&self, event: PublicEvent) -> bool {
        self.slots[event.index()].is_some()
    }

    pub fn invoke(&mut self, event: PublicEvent) -> bool {
        match self.slots[event.index()].as_mut() {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, vec::Vec};

    use super::*;

    #[test]
    fn invoke_without_registration_is_noop() {
        let mut registry = CallbackRegistry::new();
        assert!(!registry.invoke(PublicEvent::Connected));
        assert!(!registry.invoke(PublicEvent::Disconnected));
    }

    #[test]
    fn last_registration_wins() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CallbackRegistry::new();

        let first = seen.clone();
        registry
            .register(PublicEvent::Connected, move |event| {
                first.borrow_mut().push(("first", event))
            })
            .expect("register first");
        let second = seen.clone();
        registry
            .register(PublicEvent::Connected, move |event| {
                second.borrow_mut().push(("second", event))
            })
            .expect("register second");

        assert!(registry.invoke(PublicEvent::Connected));
        assert_eq!(
            seen.borrow().as_slice(),
            &[("second", PublicEvent::Connected)]
        );
    }

    #[test]
    fn unknown_event_is_rejected_without_touching_registry() {
        let mut registry = CallbackRegistry::new();
        registry
            .register("WIFI_DISCONNECTED", |_| {})
            .expect("register by name");

        assert_eq!(
            registry.register(2u8, |_| {}),
            Err(ManagerError::InvalidEventRegistration)
        );
        assert_eq!(
            registry.register("WIFI_LAST", |_| {}),
            Err(ManagerError::InvalidEventRegistration)
        );
        assert!(!registry.is_registered(PublicEvent::Connected));
        assert!(registry.is_registered(PublicEvent::Disconnected));
    }
}
