//! Discovery & Matching
//!
//! Resolves the device, then walks Battery Service characteristics.
//! Every enumeration is uncached: the remote's attribute table is not
//! assumed stable between sessions.

use crate::domain::models::{ConnectedDevice, DeviceIdentity, GattCharacteristic};
use crate::domain::transport::{CacheMode, GattTransport};
use crate::infrastructure::bluetooth::protocol::{
    BATTERY_LEVEL_UUID, BATTERY_POWER_STATE_UUID, BATTERY_SERVICE_UUID,
};
use tracing::{error, info, warn};

/// Attributes the trigger sequence acts on.
///
/// Every matching characteristic is kept, in discovery order.
pub struct BatteryAttributes<T: GattTransport> {
    pub device: ConnectedDevice<T::Device>,
    pub power_state: Vec<GattCharacteristic<T::Characteristic>>,
    pub level: Vec<GattCharacteristic<T::Characteristic>>,
}

pub enum DiscoveryOutcome<T: GattTransport> {
    /// No device, or a device whose name matches neither expected name nor address.
    DeviceMismatch { reported_name: Option<String> },
    Resolved(BatteryAttributes<T>),
}

impl<T: GattTransport> DiscoveryOutcome<T> {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::DeviceMismatch { .. })
    }
}

pub struct DiscoveryEngine<'a, T: GattTransport> {
    transport: &'a T,
}

impl<'a, T: GattTransport> DiscoveryEngine<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn discover(&self, identity: &DeviceIdentity) -> DiscoveryOutcome<T> {
        info!(
            "Resolving device {} ({:#X})",
            identity.address, identity.address_value
        );

        let device = match self.transport.connect_by_address(identity.address_value).await {
            Ok(Some(device)) => device,
            Ok(None) => {
                warn!("No device known at {}", identity.mac);
                return DiscoveryOutcome::DeviceMismatch {
                    reported_name: None,
                };
            }
            Err(e) => {
                error!("Device lookup failed: {}", e);
                return DiscoveryOutcome::DeviceMismatch {
                    reported_name: None,
                };
            }
        };

        if !identity.matches(&device.name) {
            warn!(
                "Device name {:?} matches neither {:?} nor {}",
                device.name, identity.name, identity.address
            );
            return DiscoveryOutcome::DeviceMismatch {
                reported_name: Some(device.name),
            };
        }
        info!("Device resolved: {:?}", device.name);

        let (power_state, level) = self.find_battery_characteristics(&device).await;

        DiscoveryOutcome::Resolved(BatteryAttributes {
            device,
            power_state,
            level,
        })
    }

    async fn find_battery_characteristics(
        &self,
        device: &ConnectedDevice<T::Device>,
    ) -> (
        Vec<GattCharacteristic<T::Characteristic>>,
        Vec<GattCharacteristic<T::Characteristic>>,
    ) {
        let services = match self
            .transport
            .find_services(device, BATTERY_SERVICE_UUID, CacheMode::Uncached)
            .await
        {
            Ok(services) => services,
            Err(e) => {
                error!("Battery service lookup failed: {}", e);
                return (Vec::new(), Vec::new());
            }
        };

        // Duplicates are not an error; the first match wins.
        let Some(service) = services.into_iter().next() else {
            warn!("Battery service not found");
            return (Vec::new(), Vec::new());
        };

        let characteristics = match self
            .transport
            .find_characteristics(&service, CacheMode::Uncached)
            .await
        {
            Ok(characteristics) => characteristics,
            Err(e) => {
                error!("Battery characteristic lookup failed: {}", e);
                return (Vec::new(), Vec::new());
            }
        };
        info!("Found {} battery characteristics", characteristics.len());

        let mut power_state = Vec::new();
        let mut level = Vec::new();
        for characteristic in characteristics {
            if characteristic.uuid == BATTERY_POWER_STATE_UUID {
                power_state.push(characteristic);
            } else if characteristic.uuid == BATTERY_LEVEL_UUID {
                level.push(characteristic);
            }
        }

        if power_state.is_empty() {
            warn!("BatteryPowerState characteristic not found");
        }
        if level.is_empty() {
            warn!("BatteryLevel characteristic not found");
        }

        (power_state, level)
    }
}
