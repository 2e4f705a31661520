//! Subscription & Write Sequencer
//!
//! Branch A subscribes to Battery Power State. Branch B writes the magic
//! packet to Battery Level: `[0x01, 0x00]` to every descriptor, then `[0xAF]`
//! to the characteristic without response. Branches run one after the other
//! and every transport call completes before the next is issued. Failures are
//! logged and the sequence moves on; nothing is rolled back.

use crate::domain::models::{CharacteristicProperties, GattCharacteristic, NotificationEvent};
use crate::domain::transport::{
    CacheMode, ClientConfiguration, CommunicationStatus, GattTransport, WriteMode,
};
use crate::infrastructure::bluetooth::discovery::BatteryAttributes;
use crate::infrastructure::bluetooth::protocol::{
    format_bytes, CHARACTERISTIC_TRIGGER, DESCRIPTOR_TRIGGER,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// Characteristic lacks the Notify property
    NotNotifiable,
    Subscribed,
    /// The configuration write returned a non-success status
    Rejected(CommunicationStatus),
    /// The transport raised
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Completed(CommunicationStatus),
    Failed(String),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(status) if status.is_success())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicPacketOutcome {
    pub descriptor_writes: Vec<WriteOutcome>,
    pub final_write: WriteOutcome,
}

/// One entry per matched characteristic; empty means the branch was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerReport {
    pub subscriptions: Vec<SubscribeOutcome>,
    pub magic_packets: Vec<MagicPacketOutcome>,
}

impl TriggerReport {
    pub fn is_subscribed(&self) -> bool {
        self.subscriptions.contains(&SubscribeOutcome::Subscribed)
    }
}

pub struct TriggerSequencer<'a, T: GattTransport> {
    transport: &'a T,
    sink: mpsc::UnboundedSender<NotificationEvent>,
}

impl<'a, T: GattTransport> TriggerSequencer<'a, T> {
    pub fn new(transport: &'a T, sink: mpsc::UnboundedSender<NotificationEvent>) -> Self {
        Self { transport, sink }
    }

    pub async fn run(&self, attributes: &BatteryAttributes<T>) -> TriggerReport {
        let mut report = TriggerReport::default();

        for characteristic in &attributes.power_state {
            log_characteristic(characteristic);
            info!("Registering for BatteryPowerState notifications where HID notifications will be redirected to by the filter driver.");
            report.subscriptions.push(self.subscribe(characteristic).await);
        }

        for characteristic in &attributes.level {
            log_characteristic(characteristic);
            info!("Sending magic packets via BatteryLevel so the filter driver can trigger and intercept HID notifications.");
            report
                .magic_packets
                .push(self.send_magic_packet(characteristic).await);
        }

        report
    }

    async fn subscribe(
        &self,
        characteristic: &GattCharacteristic<T::Characteristic>,
    ) -> SubscribeOutcome {
        if !characteristic
            .properties
            .contains(CharacteristicProperties::NOTIFY)
        {
            warn!(
                "Characteristic {:X} does not support notifications",
                characteristic.attribute_handle
            );
            return SubscribeOutcome::NotNotifiable;
        }

        let status = match self
            .transport
            .write_client_configuration(characteristic, ClientConfiguration::Notify)
            .await
        {
            Ok(status) => status,
            Err(e) => {
                error!("Notify exception: {}", e);
                return SubscribeOutcome::Failed(e.to_string());
            }
        };

        if !status.is_success() {
            error!("Error registering for notifications: {:?}", status);
            return SubscribeOutcome::Rejected(status);
        }

        match self.transport.subscribe(characteristic, self.sink.clone()).await {
            Ok(()) => {
                info!("Successfully registered for notifications");
                SubscribeOutcome::Subscribed
            }
            Err(e) => {
                error!("Notify exception: {}", e);
                SubscribeOutcome::Failed(e.to_string())
            }
        }
    }

    async fn send_magic_packet(
        &self,
        characteristic: &GattCharacteristic<T::Characteristic>,
    ) -> MagicPacketOutcome {
        let descriptors = match self
            .transport
            .find_descriptors(characteristic, CacheMode::Uncached)
            .await
        {
            Ok(descriptors) => descriptors,
            Err(e) => {
                error!("Descriptor lookup failed: {}", e);
                Vec::new()
            }
        };

        // The client configuration descriptor is not known up front, so every
        // descriptor gets the write.
        let mut descriptor_writes = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let outcome = match self
                .transport
                .write_descriptor_value(descriptor, &DESCRIPTOR_TRIGGER)
                .await
            {
                Ok(status) => WriteOutcome::Completed(status),
                Err(e) => WriteOutcome::Failed(e.to_string()),
            };
            log_write(
                &format!("descriptor {:X} ({})", descriptor.attribute_handle, descriptor.name()),
                &DESCRIPTOR_TRIGGER,
                &outcome,
            );
            descriptor_writes.push(outcome);
        }

        let final_write = match self
            .transport
            .write_characteristic_value(
                characteristic,
                &CHARACTERISTIC_TRIGGER,
                WriteMode::WithoutResponse,
            )
            .await
        {
            Ok(status) => WriteOutcome::Completed(status),
            Err(e) => WriteOutcome::Failed(e.to_string()),
        };
        log_write(
            &format!("characteristic {:X}", characteristic.attribute_handle),
            &CHARACTERISTIC_TRIGGER,
            &final_write,
        );

        MagicPacketOutcome {
            descriptor_writes,
            final_write,
        }
    }
}

fn log_characteristic<C>(characteristic: &GattCharacteristic<C>) {
    info!(
        "attr handle: {:X}, Characteristic UUID: {}, Name: {}",
        characteristic.attribute_handle,
        characteristic.uuid,
        characteristic.name()
    );
}

fn log_write(target: &str, bytes: &[u8], outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::Completed(CommunicationStatus::Success) => {
            info!("Writing {} to {}", format_bytes(bytes), target)
        }
        WriteOutcome::Completed(status) => warn!(
            "Writing {} to {} returned {:?}",
            format_bytes(bytes),
            target,
            status
        ),
        WriteOutcome::Failed(e) => error!("Writing {} to {} failed: {}", format_bytes(bytes), target, e),
    }
}
