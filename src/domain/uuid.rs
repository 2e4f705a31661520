//! UUID Classifier
//!
//! GATT UUIDs are kept in the byte order the platform serializes them in
//! (the mixed-endian GUID layout: first three fields little-endian, last
//! eight bytes as-is). The SIG short id therefore lives in bytes 0 and 1.

use std::fmt;
use std::str::FromStr;

/// A 128-bit attribute UUID in GUID byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuid128([u8; 16]);

/// `00000000-0000-1000-8000-00805F9B34FB`
pub const BLUETOOTH_BASE_UUID: Uuid128 = Uuid128::from_u128(0x00000000_0000_1000_8000_00805f9b34fb);

impl Uuid128 {
    /// Wrap bytes exactly as received from the transport.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Build from the canonical numeric form (as written in text).
    pub const fn from_u128(value: u128) -> Self {
        let be = value.to_be_bytes();
        Self([
            be[3], be[2], be[1], be[0], // data1
            be[5], be[4], // data2
            be[7], be[6], // data3
            be[8], be[9], be[10], be[11], be[12], be[13], be[14], be[15],
        ])
    }

    /// Substitute `short_id` into the Bluetooth Base UUID.
    pub const fn from_short_id(short_id: u16) -> Self {
        let mut bytes = BLUETOOTH_BASE_UUID.0;
        let le = short_id.to_le_bytes();
        bytes[0] = le[0];
        bytes[1] = le[1];
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// True iff this UUID differs from the Base UUID only in bytes 0 and 1.
    pub fn is_sig_defined(&self) -> bool {
        let mut bytes = self.0;
        bytes[0] = 0;
        bytes[1] = 0;
        bytes == BLUETOOTH_BASE_UUID.0
    }

    /// Little-endian read of bytes 0 and 1.
    ///
    /// No range validation; only meaningful after [`Uuid128::is_sig_defined`].
    pub fn to_short_id(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    /// Short id if SIG-defined, `None` for vendor UUIDs.
    pub fn sig_short_id(&self) -> Option<u16> {
        self.is_sig_defined().then(|| self.to_short_id())
    }
}

impl fmt::Display for Uuid128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ::uuid::Uuid::from_bytes_le(self.0))
    }
}

impl fmt::Debug for Uuid128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid128({})", self)
    }
}

impl FromStr for Uuid128 {
    type Err = ::uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = ::uuid::Uuid::parse_str(s)?;
        Ok(Self(parsed.to_bytes_le()))
    }
}
