//! Trigger Service Module
//!
//! Main service that coordinates discovery, the trigger sequence and the
//! notification decoder for one Siri Remote.

use crate::domain::decoder;
use crate::domain::models::{DeviceIdentity, NotificationEvent};
use crate::domain::transport::GattTransport;
use crate::infrastructure::bluetooth::discovery::{
    BatteryAttributes, DiscoveryEngine, DiscoveryOutcome,
};
use crate::infrastructure::bluetooth::sequencer::{TriggerReport, TriggerSequencer};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Halted before any GATT call
    DeviceMismatch { reported_name: Option<String> },
    Completed(TriggerReport),
}

/// Main service coordinating all trigger operations
pub struct TriggerService<T: GattTransport> {
    transport: T,
    event_sender: mpsc::UnboundedSender<NotificationEvent>,
    decoder: JoinHandle<usize>,
    // Subscribed handles stay alive for as long as notifications are wanted.
    attributes: Option<BatteryAttributes<T>>,
}

impl<T: GattTransport> TriggerService<T> {
    /// Create the service and start the decoder task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(transport: T) -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();
        let decoder = tokio::spawn(decoder::run_decoder(event_receiver));
        Self {
            transport,
            event_sender,
            decoder,
            attributes: None,
        }
    }

    /// Discover the remote, subscribe to notifications and send the magic packet.
    pub async fn send_magic_packet(&mut self, identity: &DeviceIdentity) -> TriggerOutcome {
        let attributes = match DiscoveryEngine::new(&self.transport)
            .discover(identity)
            .await
        {
            DiscoveryOutcome::DeviceMismatch { reported_name } => {
                warn!("Device mismatch, nothing sent");
                return TriggerOutcome::DeviceMismatch { reported_name };
            }
            DiscoveryOutcome::Resolved(attributes) => attributes,
        };

        let report = TriggerSequencer::new(&self.transport, self.event_sender.clone())
            .run(&attributes)
            .await;

        info!(
            "Trigger sequence finished: {} subscription(s), {} magic packet(s)",
            report.subscriptions.len(),
            report.magic_packets.len()
        );
        if !report.is_subscribed() {
            warn!("Not subscribed to BatteryPowerState; no notifications will arrive");
        }

        self.attributes = Some(attributes);
        TriggerOutcome::Completed(report)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the transport and wait for the decoder to drain.
    ///
    /// Completes once the transport has dropped every notification sink.
    /// Returns the number of notifications decoded.
    pub async fn shutdown(self) -> usize {
        let Self {
            transport,
            event_sender,
            decoder,
            attributes,
        } = self;
        drop(attributes);
        drop(event_sender);
        drop(transport);
        decoder.await.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluetooth::fake::{Call, FakeTransport};
    use crate::infrastructure::bluetooth::protocol::BATTERY_POWER_STATE_UUID;

    fn identity() -> DeviceIdentity {
        DeviceIdentity::parse("Siri Remote", "AA:BB:CC:DD:EE:FF").unwrap()
    }

    #[tokio::test]
    async fn test_mismatch_sends_nothing() {
        let mut service = TriggerService::new(FakeTransport::new("Other", 0xAABBCCDDEEFF));
        let outcome = service.send_magic_packet(&identity()).await;

        assert_eq!(
            outcome,
            TriggerOutcome::DeviceMismatch {
                reported_name: Some("Other".to_string())
            }
        );
        assert_eq!(service.transport().calls(), vec![Call::Connect(0xAABBCCDDEEFF)]);
        assert_eq!(service.shutdown().await, 0);
    }

    #[tokio::test]
    async fn test_notifications_are_decoded_after_trigger() {
        let mut service = TriggerService::new(FakeTransport::siri_remote());
        let TriggerOutcome::Completed(report) = service.send_magic_packet(&identity()).await else {
            panic!("expected completed sequence");
        };
        assert!(report.is_subscribed());

        service.transport().emit(BATTERY_POWER_STATE_UUID, &[0x41, 0x00, 0x42]);
        service.transport().emit(BATTERY_POWER_STATE_UUID, &[0x00; 50]);

        assert_eq!(service.shutdown().await, 2);
    }
}
