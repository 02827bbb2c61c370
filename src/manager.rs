use log::{error, info};

use crate::{
    callbacks::CallbackRegistry,
    config::ManagerConfig,
    control::ControlLoop,
    error::{InitStage, ManagerError},
    ports::{CredentialStore, NotificationSource, RadioControl},
    shared::ManagerShared,
    types::{NotificationChannel, PublicEvent},
};

/// Collects configuration and callbacks before the radio is brought up.
pub struct WifiManager<'a> {
    shared: &'a ManagerShared,
    config: ManagerConfig,
    callbacks: CallbackRegistry,
}

impl<'a> WifiManager<'a> {
    pub fn new(shared: &'a ManagerShared) -> Self {
        Self::with_config(shared, ManagerConfig::defaults())
    }

    pub fn with_config(shared: &'a ManagerShared, config: ManagerConfig) -> Self {
        Self {
            shared,
            config: config.sanitized(),
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn config(&self) -> ManagerConfig {
        self.config
    }

    /// `Connected` fires on every IP assignment that completes a join.
    /// `Disconnected` fires once per fallback to provisioning, after
    /// provisioning has restarted; a failed restart does not notify.
    pub fn register_event<E, F>(&mut self, event: E, callback: F) -> Result<(), ManagerError>
    where
        E: TryInto<PublicEvent>,
        F: FnMut(PublicEvent) + 'static,
    {
        self.callbacks.register(event, callback)
    }

    /// Subscribes the translator to every notification channel, then starts
    /// the station. The returned loop has to be run for anything to happen.
    pub fn initialize<N, R, S>(
        self,
        source: &mut N,
        mut radio: R,
        store: S,
    ) -> Result<ControlLoop<'a, R, S>, ManagerError>
    where
        N: NotificationSource<'a>,
        R: RadioControl,
        S: CredentialStore,
    {
        for channel in NotificationChannel::ALL {
            source
                .subscribe(channel, self.shared.translator())
                .map_err(|err| {
                    error!("subscribe {} err={:?}", channel.as_str(), err);
                    ManagerError::InitializationFailure(InitStage::Subscribe(channel))
                })?;
        }

        radio.start_station().map_err(|err| {
            error!("station start err={:?}", err);
            ManagerError::InitializationFailure(InitStage::StationStart)
        })?;
        info!("wifi init done max_retries={}", self.config.max_retries);
        Ok(ControlLoop::new(
            self.shared,
            self.config,
            radio,
            store,
            self.callbacks,
        ))
    }
}
