//! Siri Remote voice trigger.
//!
//! Connects to a paired Siri Remote over Bluetooth LE, subscribes to Battery
//! Power State notifications and writes the magic packet to Battery Level so
//! a filter driver can redirect the remote's HID traffic. Notifications are
//! dumped as hex as they arrive.

pub mod domain;
pub mod infrastructure;
