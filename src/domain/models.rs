use crate::domain::attribute::{Attribute, AttributeKind};
use crate::domain::errors::IdentityError;
use crate::domain::uuid::Uuid128;

/// The device the caller expects the transport to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Expected advertised name
    pub name: String,
    /// MAC as supplied, quotes removed
    pub mac: String,
    /// Uppercase hex, no separators
    pub address: String,
    /// 48-bit address value
    pub address_value: u64,
}

impl DeviceIdentity {
    pub fn parse(name: &str, mac: &str) -> Result<Self, IdentityError> {
        let name = name.replace('"', "");
        if name.is_empty() {
            return Err(IdentityError::EmptyName);
        }

        let mac = mac.replace('"', "");
        let address = mac.replace(':', "").to_uppercase();
        if address.len() != 12 || !address.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdentityError::InvalidMac(mac));
        }
        let address_value =
            u64::from_str_radix(&address, 16).map_err(|_| IdentityError::InvalidMac(mac.clone()))?;

        Ok(Self {
            name,
            mac,
            address,
            address_value,
        })
    }

    /// Whether a resolved device name belongs to this identity.
    pub fn matches(&self, reported_name: &str) -> bool {
        reported_name == self.name
            || reported_name.contains(&self.address)
            || reported_name.contains(&self.mac)
    }
}

/// Characteristic capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacteristicProperties(u32);

impl CharacteristicProperties {
    pub const BROADCAST: Self = Self(0x0001);
    pub const READ: Self = Self(0x0002);
    pub const WRITE_WITHOUT_RESPONSE: Self = Self(0x0004);
    pub const WRITE: Self = Self(0x0008);
    pub const NOTIFY: Self = Self(0x0010);
    pub const INDICATE: Self = Self(0x0020);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for CharacteristicProperties {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A device handle resolved by address.
#[derive(Debug, Clone)]
pub struct ConnectedDevice<D> {
    pub name: String,
    pub address: u64,
    pub handle: D,
}

#[derive(Debug, Clone)]
pub struct GattService<S> {
    pub uuid: Uuid128,
    pub handle: S,
}

#[derive(Debug, Clone)]
pub struct GattCharacteristic<C> {
    pub uuid: Uuid128,
    pub attribute_handle: u16,
    pub properties: CharacteristicProperties,
    pub user_description: Option<String>,
    pub handle: C,
}

impl<C> GattCharacteristic<C> {
    pub fn name(&self) -> String {
        Attribute::new(
            AttributeKind::Characteristic,
            self.uuid,
            self.user_description.as_deref(),
        )
        .name()
    }
}

#[derive(Debug, Clone)]
pub struct GattDescriptor<D> {
    pub uuid: Uuid128,
    pub attribute_handle: u16,
    pub handle: D,
}

impl<D> GattDescriptor<D> {
    pub fn name(&self) -> String {
        Attribute::new(AttributeKind::Descriptor, self.uuid, None).name()
    }
}

/// One inbound value change, decoded once and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub characteristic: Uuid128,
    pub payload: Vec<u8>,
}
