use core::fmt::Debug;

use crate::{
    translator::EventTranslator,
    types::{Credentials, NotificationChannel},
};

/// Commands the manager issues to the radio and provisioning subsystem.
pub trait RadioControl {
    type Error: Debug;

    /// Brings the station interface up; the radio answers with a
    /// station-started notification.
    fn start_station(&mut self) -> Result<(), Self::Error>;
    fn connect(&mut self) -> Result<(), Self::Error>;
    fn disconnect(&mut self) -> Result<(), Self::Error>;
    fn apply_configuration(&mut self, credentials: &Credentials) -> Result<(), Self::Error>;
    fn start_provisioning(&mut self) -> Result<(), Self::Error>;
    /// Must tolerate being called when provisioning is not running.
    fn stop_provisioning(&mut self) -> Result<(), Self::Error>;
}

/// Delivers notifications of one channel to the translator. The translator
/// borrows the manager's shared state, so subscriptions cannot outlive it.
pub trait NotificationSource<'a> {
    type Error: Debug;

    fn subscribe(
        &mut self,
        channel: NotificationChannel,
        translator: EventTranslator<'a>,
    ) -> Result<(), Self::Error>;
}

pub trait CredentialStore {
    type Error: Debug;

    fn stored_credentials(&mut self) -> Option<Credentials>;
    fn persist_credentials(&mut self, credentials: &Credentials) -> Result<(), Self::Error>;
}

impl<T: RadioControl + ?Sized> RadioControl for &mut T {
    type Error = T::Error;

    fn start_station(&mut self) -> Result<(), Self::Error> {
        (**self).start_station()
    }

    fn connect(&mut self) -> Result<(), Self::Error> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<(), Self::Error> {
        (**self).disconnect()
    }

    fn apply_configuration(&mut self, credentials: &Credentials) -> Result<(), Self::Error> {
        (**self).apply_configuration(credentials)
    }

    fn start_provisioning(&mut self) -> Result<(), Self::Error> {
        (**self).start_provisioning()
    }

    fn stop_provisioning(&mut self) -> Result<(), Self::Error> {
        (**self).stop_provisioning()
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for &mut T {
    type Error = T::Error;

    fn stored_credentials(&mut self) -> Option<Credentials> {
        (**self).stored_credentials()
    }

    fn persist_credentials(&mut self, credentials: &Credentials) -> Result<(), Self::Error> {
        (**self).persist_credentials(credentials)
    }
}
