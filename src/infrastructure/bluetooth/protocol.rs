//! Siri Remote trigger protocol
//!
//! The remote's HID channel is restricted; an external filter driver watches
//! writes to the Battery Level characteristic and redirects HID traffic to
//! Battery Power State notifications once it sees the magic packet.

use crate::domain::uuid::Uuid128;

/// Battery Service (0x180F)
pub const BATTERY_SERVICE_UUID: Uuid128 = Uuid128::from_short_id(0x180F);

/// Battery Power State (0x2A1A) - notifications are redirected here
pub const BATTERY_POWER_STATE_UUID: Uuid128 = Uuid128::from_short_id(0x2A1A);

/// Battery Level (0x2A19) - magic packets are written here
pub const BATTERY_LEVEL_UUID: Uuid128 = Uuid128::from_short_id(0x2A19);

/// Written to every descriptor of Battery Level
pub const DESCRIPTOR_TRIGGER: [u8; 2] = [0x01, 0x00];

/// Written to Battery Level itself, without response
pub const CHARACTERISTIC_TRIGGER: [u8; 1] = [0xAF];

/// Render bytes as `0x01, 0x00` for log lines.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:#04X}", b))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_uuids() {
        assert_eq!(
            BATTERY_SERVICE_UUID.to_string(),
            "0000180f-0000-1000-8000-00805f9b34fb"
        );
        assert_eq!(
            BATTERY_POWER_STATE_UUID,
            "00002a1a-0000-1000-8000-00805f9b34fb".parse::<Uuid128>().unwrap()
        );
        assert_eq!(
            BATTERY_LEVEL_UUID,
            "00002A19-0000-1000-8000-00805F9B34FB".parse::<Uuid128>().unwrap()
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(&DESCRIPTOR_TRIGGER), "0x01, 0x00");
        assert_eq!(format_bytes(&CHARACTERISTIC_TRIGGER), "0xAF");
    }
}
