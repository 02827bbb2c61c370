use log::{debug, info, warn};

use crate::{
    shared::ManagerShared,
    types::{
        Credentials, CredentialsPayload, InternalEvent, IpEvent, Notification,
        NotificationChannel, ProvisioningEvent, StationEvent,
    },
};

/// Handle given to the notification source. Turns raw notifications into
/// internal events and posts them to the manager's mailbox.
#[derive(Clone, Copy)]
pub struct EventTranslator<'a> {
    shared: &'a ManagerShared,
}

impl<'a> EventTranslator<'a> {
    pub(crate) fn new(shared: &'a ManagerShared) -> Self {
        Self { shared }
    }

    pub fn handle(&self, notification: &Notification) -> Option<InternalEvent> {
        let event = translate(notification)?;
        if let Notification::Provisioning(ProvisioningEvent::GotCredentials(payload)) =
            notification
        {
            // Must be visible before the event is: the loop reads it on wake.
            let credentials = Credentials::capture(payload);
            info!("got credentials ssid={:?}", credentials.ssid_str());
            self.shared.store_captured(credentials);
            self.shared.counters.record_credentials_captured();
        }
        self.shared.mailbox.post(event);
        Some(event)
    }

    pub fn handle_raw(
        &self,
        channel: NotificationChannel,
        id: i32,
        payload: Option<&CredentialsPayload>,
    ) -> Option<InternalEvent> {
        match Notification::decode(channel, id, payload) {
            Some(notification) => self.handle(&notification),
            None => {
                warn!(
                    "dropping {} notification id={} without payload",
                    channel.as_str(),
                    id
                );
                None
            }
        }
    }
}

/// Actionable notifications map to an internal event; informational ones
/// are logged and map to `None`.
fn translate(notification: &Notification) -> Option<InternalEvent> {
    match notification {
        Notification::Station(StationEvent::Started) => Some(InternalEvent::StationStarted),
        Notification::Station(StationEvent::Stopped) => {
            warn!("sta stop");
            None
        }
        Notification::Station(StationEvent::Connected) => {
            warn!("sta connected");
            None
        }
        Notification::Station(StationEvent::Disconnected) => {
            Some(InternalEvent::StationDisconnected)
        }
        Notification::Ip(IpEvent::StationGotIp) => Some(InternalEvent::IpAssigned),
        Notification::Provisioning(ProvisioningEvent::ScanDone) => {
            info!("provisioning scan done");
            None
        }
        Notification::Provisioning(ProvisioningEvent::FoundChannel) => {
            info!("provisioning found channel");
            None
        }
        Notification::Provisioning(ProvisioningEvent::GotCredentials(_)) => {
            Some(InternalEvent::ProvisioningCredentialsReceived)
        }
        Notification::Provisioning(ProvisioningEvent::AckDone) => {
            info!("provisioning ack done");
            Some(InternalEvent::ProvisioningAckDone)
        }
        Notification::Station(StationEvent::Other(id))
        | Notification::Ip(IpEvent::Other(id))
        | Notification::Provisioning(ProvisioningEvent::Other(id)) => {
            debug!(
                "ignoring {} notification id={}",
                notification.channel().as_str(),
                id
            );
            None
        }
    }
}
