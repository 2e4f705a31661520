//! GATT Transport port
//!
//! The platform Bluetooth stack as the trigger sequence sees it. Calls are
//! issued one at a time from a single task, so futures need not be `Send`.

use crate::domain::errors::TransportError;
use crate::domain::models::{
    ConnectedDevice, GattCharacteristic, GattDescriptor, GattService, NotificationEvent,
};
use crate::domain::uuid::Uuid128;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Whether an enumeration may be answered from the local attribute cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    Cached,
    Uncached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    WithResponse,
    WithoutResponse,
}

/// Client Characteristic Configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientConfiguration {
    None,
    Notify,
    Indicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationStatus {
    Success,
    Unreachable,
    ProtocolError,
    AccessDenied,
}

impl CommunicationStatus {
    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }
}

#[async_trait(?Send)]
pub trait GattTransport {
    type Device;
    type Service;
    type Characteristic;
    type Descriptor;

    /// `Ok(None)` when no device is known at `address`.
    async fn connect_by_address(
        &self,
        address: u64,
    ) -> Result<Option<ConnectedDevice<Self::Device>>, TransportError>;

    async fn find_services(
        &self,
        device: &ConnectedDevice<Self::Device>,
        uuid: Uuid128,
        cache_mode: CacheMode,
    ) -> Result<Vec<GattService<Self::Service>>, TransportError>;

    async fn find_characteristics(
        &self,
        service: &GattService<Self::Service>,
        cache_mode: CacheMode,
    ) -> Result<Vec<GattCharacteristic<Self::Characteristic>>, TransportError>;

    async fn find_descriptors(
        &self,
        characteristic: &GattCharacteristic<Self::Characteristic>,
        cache_mode: CacheMode,
    ) -> Result<Vec<GattDescriptor<Self::Descriptor>>, TransportError>;

    /// Write the characteristic's Client Characteristic Configuration Descriptor.
    async fn write_client_configuration(
        &self,
        characteristic: &GattCharacteristic<Self::Characteristic>,
        value: ClientConfiguration,
    ) -> Result<CommunicationStatus, TransportError>;

    async fn write_descriptor_value(
        &self,
        descriptor: &GattDescriptor<Self::Descriptor>,
        value: &[u8],
    ) -> Result<CommunicationStatus, TransportError>;

    async fn write_characteristic_value(
        &self,
        characteristic: &GattCharacteristic<Self::Characteristic>,
        value: &[u8],
        mode: WriteMode,
    ) -> Result<CommunicationStatus, TransportError>;

    /// Forward every value change of `characteristic` into `sink`, in arrival order.
    async fn subscribe(
        &self,
        characteristic: &GattCharacteristic<Self::Characteristic>,
        sink: mpsc::UnboundedSender<NotificationEvent>,
    ) -> Result<(), TransportError>;
}
