//! WinRT GATT Transport
//!
//! `GattTransport` over `Windows.Devices.Bluetooth`. The device must already
//! be paired with Windows; nothing here pairs or scans.

use crate::domain::errors::TransportError;
use crate::domain::models::{self as gatt, CharacteristicProperties, ConnectedDevice, NotificationEvent};
use crate::domain::transport::{
    CacheMode, ClientConfiguration, CommunicationStatus, GattTransport, WriteMode,
};
use crate::domain::uuid::Uuid128;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};
use windows::core::GUID;
use windows::Devices::Bluetooth::GenericAttributeProfile::{
    GattCharacteristic, GattClientCharacteristicConfigurationDescriptorValue,
    GattCommunicationStatus, GattDescriptor, GattDeviceService, GattValueChangedEventArgs,
    GattWriteOption,
};
use windows::Devices::Bluetooth::{BluetoothCacheMode, BluetoothLEDevice};
use windows::Foundation::TypedEventHandler;
use windows::Storage::Streams::{DataReader, DataWriter, IBuffer};

/// Attach the failing operation to a WinRT error.
trait WinRtResultExt<T> {
    fn during(self, operation: &'static str) -> Result<T, TransportError>;
}

impl<T> WinRtResultExt<T> for windows::core::Result<T> {
    fn during(self, operation: &'static str) -> Result<T, TransportError> {
        self.map_err(|e| TransportError::platform(operation, e))
    }
}

#[derive(Debug, Default)]
pub struct WinRtTransport;

impl WinRtTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl GattTransport for WinRtTransport {
    type Device = BluetoothLEDevice;
    type Service = GattDeviceService;
    type Characteristic = GattCharacteristic;
    type Descriptor = GattDescriptor;

    async fn connect_by_address(
        &self,
        address: u64,
    ) -> Result<Option<ConnectedDevice<BluetoothLEDevice>>, TransportError> {
        const OP: &str = "connect";
        info!("Connecting to Bluetooth device: {:#X}", address);

        let device = match BluetoothLEDevice::FromBluetoothAddressAsync(address)
            .during(OP)?
            .await
        {
            Ok(device) => device,
            // A null device comes back as an error carrying S_OK.
            Err(e) if e.code().is_ok() => return Ok(None),
            Err(e) => return Err(TransportError::platform(OP, e)),
        };

        let name = device.Name().during(OP)?.to_string();
        let address = device.BluetoothAddress().during(OP)?;
        debug!("Device connected: {:?} ({:#X})", name, address);

        Ok(Some(ConnectedDevice {
            name,
            address,
            handle: device,
        }))
    }

    async fn find_services(
        &self,
        device: &ConnectedDevice<BluetoothLEDevice>,
        uuid: Uuid128,
        cache_mode: CacheMode,
    ) -> Result<Vec<gatt::GattService<GattDeviceService>>, TransportError> {
        const OP: &str = "find services";
        let result = device
            .handle
            .GetGattServicesForUuidWithCacheModeAsync(to_guid(uuid), to_cache_mode(cache_mode))
            .during(OP)?
            .await
            .during(OP)?;
        check_status(result.Status().during(OP)?, OP)?;

        let services = result.Services().during(OP)?;
        let mut found = Vec::new();
        for i in 0..services.Size().during(OP)? {
            let service = services.GetAt(i).during(OP)?;
            found.push(gatt::GattService {
                uuid: from_guid(service.Uuid().during(OP)?),
                handle: service,
            });
        }
        debug!("Found {} services matching {}", found.len(), uuid);
        Ok(found)
    }

    async fn find_characteristics(
        &self,
        service: &gatt::GattService<GattDeviceService>,
        cache_mode: CacheMode,
    ) -> Result<Vec<gatt::GattCharacteristic<GattCharacteristic>>, TransportError> {
        const OP: &str = "find characteristics";
        let result = service
            .handle
            .GetCharacteristicsWithCacheModeAsync(to_cache_mode(cache_mode))
            .during(OP)?
            .await
            .during(OP)?;
        check_status(result.Status().during(OP)?, OP)?;

        let characteristics = result.Characteristics().during(OP)?;
        let mut found = Vec::new();
        for i in 0..characteristics.Size().during(OP)? {
            let characteristic = characteristics.GetAt(i).during(OP)?;
            let user_description = characteristic.UserDescription().during(OP)?.to_string();
            found.push(gatt::GattCharacteristic {
                uuid: from_guid(characteristic.Uuid().during(OP)?),
                attribute_handle: characteristic.AttributeHandle().during(OP)?,
                properties: CharacteristicProperties::from_bits(
                    characteristic.CharacteristicProperties().during(OP)?.0,
                ),
                user_description: (!user_description.is_empty()).then_some(user_description),
                handle: characteristic,
            });
        }
        Ok(found)
    }

    async fn find_descriptors(
        &self,
        characteristic: &gatt::GattCharacteristic<GattCharacteristic>,
        cache_mode: CacheMode,
    ) -> Result<Vec<gatt::GattDescriptor<GattDescriptor>>, TransportError> {
        const OP: &str = "find descriptors";
        let result = characteristic
            .handle
            .GetDescriptorsWithCacheModeAsync(to_cache_mode(cache_mode))
            .during(OP)?
            .await
            .during(OP)?;
        check_status(result.Status().during(OP)?, OP)?;

        let descriptors = result.Descriptors().during(OP)?;
        let mut found = Vec::new();
        for i in 0..descriptors.Size().during(OP)? {
            let descriptor = descriptors.GetAt(i).during(OP)?;
            found.push(gatt::GattDescriptor {
                uuid: from_guid(descriptor.Uuid().during(OP)?),
                attribute_handle: descriptor.AttributeHandle().during(OP)?,
                handle: descriptor,
            });
        }
        Ok(found)
    }

    async fn write_client_configuration(
        &self,
        characteristic: &gatt::GattCharacteristic<GattCharacteristic>,
        value: ClientConfiguration,
    ) -> Result<CommunicationStatus, TransportError> {
        const OP: &str = "write client configuration";
        let value = match value {
            ClientConfiguration::None => GattClientCharacteristicConfigurationDescriptorValue::None,
            ClientConfiguration::Notify => {
                GattClientCharacteristicConfigurationDescriptorValue::Notify
            }
            ClientConfiguration::Indicate => {
                GattClientCharacteristicConfigurationDescriptorValue::Indicate
            }
        };
        let status = characteristic
            .handle
            .WriteClientCharacteristicConfigurationDescriptorAsync(value)
            .during(OP)?
            .await
            .during(OP)?;
        Ok(from_status(status))
    }

    async fn write_descriptor_value(
        &self,
        descriptor: &gatt::GattDescriptor<GattDescriptor>,
        value: &[u8],
    ) -> Result<CommunicationStatus, TransportError> {
        const OP: &str = "write descriptor";
        let buffer = to_buffer(value).during(OP)?;
        let status = descriptor
            .handle
            .WriteValueAsync(&buffer)
            .during(OP)?
            .await
            .during(OP)?;
        Ok(from_status(status))
    }

    async fn write_characteristic_value(
        &self,
        characteristic: &gatt::GattCharacteristic<GattCharacteristic>,
        value: &[u8],
        mode: WriteMode,
    ) -> Result<CommunicationStatus, TransportError> {
        const OP: &str = "write characteristic";
        let buffer = to_buffer(value).during(OP)?;
        let option = match mode {
            WriteMode::WithResponse => GattWriteOption::WriteWithResponse,
            WriteMode::WithoutResponse => GattWriteOption::WriteWithoutResponse,
        };
        let status = characteristic
            .handle
            .WriteValueWithOptionAsync(&buffer, option)
            .during(OP)?
            .await
            .during(OP)?;
        Ok(from_status(status))
    }

    async fn subscribe(
        &self,
        characteristic: &gatt::GattCharacteristic<GattCharacteristic>,
        sink: mpsc::UnboundedSender<NotificationEvent>,
    ) -> Result<(), TransportError> {
        let uuid = characteristic.uuid;
        let handler = TypedEventHandler::new(
            move |_: windows::core::Ref<GattCharacteristic>,
                  args: windows::core::Ref<GattValueChangedEventArgs>| {
                if let Some(args) = args.as_ref() {
                    let payload = read_buffer(&args.CharacteristicValue()?)?;
                    trace!("Raw notification: {:02X?}", payload);
                    let _ = sink.send(NotificationEvent {
                        characteristic: uuid,
                        payload,
                    });
                }
                Ok(())
            },
        );
        // No unsubscribe path; the registration token is not kept.
        characteristic
            .handle
            .ValueChanged(&handler)
            .during("subscribe")?;
        Ok(())
    }
}

fn to_cache_mode(mode: CacheMode) -> BluetoothCacheMode {
    match mode {
        CacheMode::Cached => BluetoothCacheMode::Cached,
        CacheMode::Uncached => BluetoothCacheMode::Uncached,
    }
}

fn from_status(status: GattCommunicationStatus) -> CommunicationStatus {
    match status {
        GattCommunicationStatus::Success => CommunicationStatus::Success,
        GattCommunicationStatus::Unreachable => CommunicationStatus::Unreachable,
        GattCommunicationStatus::AccessDenied => CommunicationStatus::AccessDenied,
        _ => CommunicationStatus::ProtocolError,
    }
}

fn check_status(status: GattCommunicationStatus, operation: &'static str) -> Result<(), TransportError> {
    if status == GattCommunicationStatus::Success {
        Ok(())
    } else {
        Err(TransportError::platform(operation, format!("status {:?}", status)))
    }
}

/// GUID fields are stored little-endian, matching `Uuid128` byte order.
fn to_guid(uuid: Uuid128) -> GUID {
    let b = uuid.as_bytes();
    GUID {
        data1: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        data2: u16::from_le_bytes([b[4], b[5]]),
        data3: u16::from_le_bytes([b[6], b[7]]),
        data4: [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]],
    }
}

fn from_guid(guid: GUID) -> Uuid128 {
    let mut bytes = [0u8; 16];
    bytes[0..4].copy_from_slice(&guid.data1.to_le_bytes());
    bytes[4..6].copy_from_slice(&guid.data2.to_le_bytes());
    bytes[6..8].copy_from_slice(&guid.data3.to_le_bytes());
    bytes[8..16].copy_from_slice(&guid.data4);
    Uuid128::from_bytes(bytes)
}

fn to_buffer(bytes: &[u8]) -> windows::core::Result<IBuffer> {
    let writer = DataWriter::new()?;
    writer.WriteBytes(bytes)?;
    writer.DetachBuffer()
}

fn read_buffer(buffer: &IBuffer) -> windows::core::Result<Vec<u8>> {
    let reader = DataReader::FromBuffer(buffer)?;
    let length = reader.UnconsumedBufferLength()? as usize;
    let mut bytes = vec![0u8; length];
    reader.ReadBytes(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_round_trip() {
        let uuid: Uuid128 = "00002a19-0000-1000-8000-00805f9b34fb".parse().unwrap();
        let guid = to_guid(uuid);
        assert_eq!(guid.data1, 0x00002a19);
        assert_eq!(guid.data3, 0x1000);
        assert_eq!(from_guid(guid), uuid);
    }
}
