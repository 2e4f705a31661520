//! Recording in-memory transport for tests.

use crate::domain::errors::TransportError;
use crate::domain::models::{
    CharacteristicProperties, ConnectedDevice, GattCharacteristic, GattDescriptor, GattService,
    NotificationEvent,
};
use crate::domain::transport::{
    CacheMode, ClientConfiguration, CommunicationStatus, GattTransport, WriteMode,
};
use crate::domain::uuid::Uuid128;
use crate::infrastructure::bluetooth::protocol::{
    BATTERY_LEVEL_UUID, BATTERY_POWER_STATE_UUID, BATTERY_SERVICE_UUID,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::mpsc;

pub const POWER_STATE_HANDLE: u16 = 0x20;
pub const LEVEL_HANDLE: u16 = 0x30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect(u64),
    FindServices(Uuid128, CacheMode),
    FindCharacteristics(Uuid128, CacheMode),
    FindDescriptors(u16, CacheMode),
    WriteClientConfiguration(u16, ClientConfiguration),
    WriteDescriptor(u16, Vec<u8>),
    WriteCharacteristic(u16, Vec<u8>, WriteMode),
    Subscribe(u16),
}

/// What a scripted write does.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Status(CommunicationStatus),
    Raise,
}

#[derive(Default)]
pub struct FakeTransport {
    device: Option<(String, u64)>,
    fail_connect: bool,
    services: Vec<Uuid128>,
    characteristics: Vec<(u16, Uuid128, CharacteristicProperties)>,
    descriptors: HashMap<u16, Vec<u16>>,
    fail_descriptor_lookup: bool,
    client_configuration: Option<Outcome>,
    descriptor_writes: Mutex<VecDeque<Outcome>>,
    characteristic_write: Option<Outcome>,
    calls: Mutex<Vec<Call>>,
    sinks: Mutex<Vec<(Uuid128, mpsc::UnboundedSender<NotificationEvent>)>>,
}

impl FakeTransport {
    /// A device with no services.
    pub fn new(name: &str, address: u64) -> Self {
        Self {
            device: Some((name.to_string(), address)),
            ..Default::default()
        }
    }

    pub fn without_device() -> Self {
        Self::default()
    }

    /// Battery service with a notifiable power state and a battery level
    /// carrying three descriptors.
    pub fn siri_remote() -> Self {
        let mut transport = Self::new("Siri Remote", 0xAABBCCDDEEFF);
        transport.services.push(BATTERY_SERVICE_UUID);
        transport.characteristics.push((
            POWER_STATE_HANDLE,
            BATTERY_POWER_STATE_UUID,
            CharacteristicProperties::READ | CharacteristicProperties::NOTIFY,
        ));
        transport.characteristics.push((
            LEVEL_HANDLE,
            BATTERY_LEVEL_UUID,
            CharacteristicProperties::READ | CharacteristicProperties::WRITE_WITHOUT_RESPONSE,
        ));
        transport.with_descriptors(LEVEL_HANDLE, 3)
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn with_extra_service(mut self, uuid: Uuid128) -> Self {
        self.services.push(uuid);
        self
    }

    pub fn with_characteristic(
        mut self,
        handle: u16,
        uuid: Uuid128,
        properties: CharacteristicProperties,
    ) -> Self {
        self.characteristics.push((handle, uuid, properties));
        self
    }

    pub fn without_characteristic(mut self, uuid: Uuid128) -> Self {
        self.characteristics.retain(|(_, u, _)| *u != uuid);
        self
    }

    /// Descriptors get handles `characteristic + 1 ..= characteristic + count`.
    pub fn with_descriptors(mut self, characteristic: u16, count: u16) -> Self {
        self.descriptors
            .insert(characteristic, (1..=count).map(|i| characteristic + i).collect());
        self
    }

    pub fn failing_descriptor_lookup(mut self) -> Self {
        self.fail_descriptor_lookup = true;
        self
    }

    pub fn with_client_configuration(mut self, outcome: Outcome) -> Self {
        self.client_configuration = Some(outcome);
        self
    }

    /// Consumed in order by descriptor writes; later writes succeed.
    pub fn with_descriptor_writes(self, outcomes: Vec<Outcome>) -> Self {
        *self.descriptor_writes.lock().unwrap() = outcomes.into();
        self
    }

    pub fn with_characteristic_write(mut self, outcome: Outcome) -> Self {
        self.characteristic_write = Some(outcome);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Deliver a value change to subscribers of `characteristic`.
    pub fn emit(&self, characteristic: Uuid128, payload: &[u8]) -> usize {
        let sinks = self.sinks.lock().unwrap();
        sinks
            .iter()
            .filter(|(uuid, _)| *uuid == characteristic)
            .filter(|(_, sink)| {
                sink.send(NotificationEvent {
                    characteristic,
                    payload: payload.to_vec(),
                })
                .is_ok()
            })
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn resolve(outcome: Option<Outcome>, operation: &'static str) -> Result<CommunicationStatus, TransportError> {
        match outcome.unwrap_or(Outcome::Status(CommunicationStatus::Success)) {
            Outcome::Status(status) => Ok(status),
            Outcome::Raise => Err(TransportError::platform(operation, "device unreachable")),
        }
    }
}

#[async_trait(?Send)]
impl GattTransport for FakeTransport {
    type Device = ();
    type Service = ();
    type Characteristic = ();
    type Descriptor = ();

    async fn connect_by_address(
        &self,
        address: u64,
    ) -> Result<Option<ConnectedDevice<()>>, TransportError> {
        self.record(Call::Connect(address));
        if self.fail_connect {
            return Err(TransportError::platform("connect", "radio off"));
        }
        Ok(self.device.as_ref().map(|(name, address)| ConnectedDevice {
            name: name.clone(),
            address: *address,
            handle: (),
        }))
    }

    async fn find_services(
        &self,
        _device: &ConnectedDevice<()>,
        uuid: Uuid128,
        cache_mode: CacheMode,
    ) -> Result<Vec<GattService<()>>, TransportError> {
        self.record(Call::FindServices(uuid, cache_mode));
        Ok(self
            .services
            .iter()
            .filter(|service| **service == uuid)
            .map(|service| GattService {
                uuid: *service,
                handle: (),
            })
            .collect())
    }

    async fn find_characteristics(
        &self,
        service: &GattService<()>,
        cache_mode: CacheMode,
    ) -> Result<Vec<GattCharacteristic<()>>, TransportError> {
        self.record(Call::FindCharacteristics(service.uuid, cache_mode));
        Ok(self
            .characteristics
            .iter()
            .map(|(handle, uuid, properties)| GattCharacteristic {
                uuid: *uuid,
                attribute_handle: *handle,
                properties: *properties,
                user_description: None,
                handle: (),
            })
            .collect())
    }

    async fn find_descriptors(
        &self,
        characteristic: &GattCharacteristic<()>,
        cache_mode: CacheMode,
    ) -> Result<Vec<GattDescriptor<()>>, TransportError> {
        self.record(Call::FindDescriptors(
            characteristic.attribute_handle,
            cache_mode,
        ));
        if self.fail_descriptor_lookup {
            return Err(TransportError::platform("find descriptors", "device unreachable"));
        }
        Ok(self
            .descriptors
            .get(&characteristic.attribute_handle)
            .into_iter()
            .flatten()
            .map(|handle| GattDescriptor {
                uuid: Uuid128::from_short_id(0x2900 + (handle - characteristic.attribute_handle)),
                attribute_handle: *handle,
                handle: (),
            })
            .collect())
    }

    async fn write_client_configuration(
        &self,
        characteristic: &GattCharacteristic<()>,
        value: ClientConfiguration,
    ) -> Result<CommunicationStatus, TransportError> {
        self.record(Call::WriteClientConfiguration(
            characteristic.attribute_handle,
            value,
        ));
        Self::resolve(self.client_configuration, "write client configuration")
    }

    async fn write_descriptor_value(
        &self,
        descriptor: &GattDescriptor<()>,
        value: &[u8],
    ) -> Result<CommunicationStatus, TransportError> {
        self.record(Call::WriteDescriptor(
            descriptor.attribute_handle,
            value.to_vec(),
        ));
        let outcome = self.descriptor_writes.lock().unwrap().pop_front();
        Self::resolve(outcome, "write descriptor")
    }

    async fn write_characteristic_value(
        &self,
        characteristic: &GattCharacteristic<()>,
        value: &[u8],
        mode: WriteMode,
    ) -> Result<CommunicationStatus, TransportError> {
        self.record(Call::WriteCharacteristic(
            characteristic.attribute_handle,
            value.to_vec(),
            mode,
        ));
        Self::resolve(self.characteristic_write, "write characteristic")
    }

    async fn subscribe(
        &self,
        characteristic: &GattCharacteristic<()>,
        sink: mpsc::UnboundedSender<NotificationEvent>,
    ) -> Result<(), TransportError> {
        self.record(Call::Subscribe(characteristic.attribute_handle));
        self.sinks.lock().unwrap().push((characteristic.uuid, sink));
        Ok(())
    }
}
