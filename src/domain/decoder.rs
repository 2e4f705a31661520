//! Notification Decoder
//!
//! Renders inbound payloads as a hex dump plus the printable bytes, and flags
//! lengths that look like a cut-off voice frame (full frames are ~102 bytes).

use crate::domain::models::NotificationEvent;
use std::fmt::{self, Write};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Lengths strictly inside this open interval are flagged.
pub const TRUNCATION_LOWER_BOUND: usize = 13;
pub const TRUNCATION_UPPER_BOUND: usize = 100;

pub const TRUNCATION_SUFFIX: &str = "...<- Voice data most likely truncated.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNotification {
    /// `" xx"` per byte, in payload order
    pub hex: String,
    /// Payload bytes as characters, NULs dropped
    pub printable: String,
    pub likely_truncated: bool,
}

impl fmt::Display for DecodedNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification :{}", self.hex)?;
        if self.likely_truncated {
            f.write_str(TRUNCATION_SUFFIX)?;
        }
        Ok(())
    }
}

pub fn decode(payload: &[u8]) -> DecodedNotification {
    let mut hex = String::with_capacity(payload.len() * 3);
    let mut printable = String::new();

    for &byte in payload {
        let _ = write!(hex, " {:02x}", byte);
        if byte != 0 {
            printable.push(byte as char);
        }
    }

    DecodedNotification {
        hex,
        printable,
        likely_truncated: payload.len() > TRUNCATION_LOWER_BOUND
            && payload.len() < TRUNCATION_UPPER_BOUND,
    }
}

/// Decode every event in arrival order until all senders are gone.
///
/// Returns the number of events decoded.
pub async fn run_decoder(mut receiver: mpsc::UnboundedReceiver<NotificationEvent>) -> usize {
    let mut decoded = 0;
    while let Some(event) = receiver.recv().await {
        let notification = decode(&event.payload);
        debug!(
            characteristic = %event.characteristic,
            "Value changed: {:?} ({} bytes)",
            notification.printable,
            event.payload.len()
        );
        info!("{}", notification);
        decoded += 1;
    }
    debug!("Notification stream closed after {} events", decoded);
    decoded
}
