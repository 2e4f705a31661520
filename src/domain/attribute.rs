//! Attribute Name Resolver
//!
//! Maps a discovered attribute to the name printed in diagnostics: the SIG
//! registry name when the UUID is SIG-defined, otherwise the device-supplied
//! user description or a raw-UUID label.

use crate::domain::registry;
use crate::domain::uuid::Uuid128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Service,
    Characteristic,
    Descriptor,
}

/// An attribute as seen by the resolver, carrying only what naming needs.
#[derive(Debug, Clone, Copy)]
pub enum Attribute<'a> {
    Service {
        uuid: Uuid128,
    },
    Characteristic {
        uuid: Uuid128,
        user_description: Option<&'a str>,
    },
    Descriptor {
        uuid: Uuid128,
    },
}

const INVALID: &str = "Invalid";

impl<'a> Attribute<'a> {
    /// Tag a UUID with its kind. The description only applies to characteristics.
    pub fn new(kind: AttributeKind, uuid: Uuid128, user_description: Option<&'a str>) -> Self {
        match kind {
            AttributeKind::Service => Self::Service { uuid },
            AttributeKind::Characteristic => Self::Characteristic {
                uuid,
                user_description,
            },
            AttributeKind::Descriptor => Self::Descriptor { uuid },
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Service { .. } => AttributeKind::Service,
            Self::Characteristic { .. } => AttributeKind::Characteristic,
            Self::Descriptor { .. } => AttributeKind::Descriptor,
        }
    }

    pub fn uuid(&self) -> Uuid128 {
        match *self {
            Self::Service { uuid }
            | Self::Characteristic { uuid, .. }
            | Self::Descriptor { uuid } => uuid,
        }
    }

    /// Human-readable name. Deterministic for identical inputs.
    pub fn name(&self) -> String {
        match *self {
            Self::Service { uuid } => match uuid.sig_short_id() {
                Some(id) => registry::service_name(id).unwrap_or(INVALID).to_string(),
                None => format!("Custom Service: {}", uuid),
            },
            Self::Characteristic {
                uuid,
                user_description,
            } => {
                let description = user_description.filter(|d| !d.is_empty());
                match uuid.sig_short_id() {
                    Some(id) => match (registry::characteristic_name(id), description) {
                        (Some(name), Some(description)) => format!("{} ({})", name, description),
                        (Some(name), None) => name.to_string(),
                        (None, _) => INVALID.to_string(),
                    },
                    None => match description {
                        Some(description) => description.to_string(),
                        None => format!("Custom Characteristic: {}", uuid),
                    },
                }
            }
            Self::Descriptor { uuid } => match uuid.sig_short_id() {
                Some(id) => registry::descriptor_name(id).unwrap_or(INVALID).to_string(),
                None => format!("Custom Descriptor: {}", uuid),
            },
        }
    }
}

/// Resolve the display name of an attribute of the given kind.
pub fn resolve_name(kind: AttributeKind, uuid: Uuid128, user_description: Option<&str>) -> String {
    Attribute::new(kind, uuid, user_description).name()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATTERY_LEVEL: Uuid128 = Uuid128::from_short_id(0x2A19);
    const VENDOR: Uuid128 = Uuid128::from_u128(0xc8c51726_81bc_483b_a052_f7a14ea3d281);

    #[test]
    fn test_characteristic_registry_name() {
        assert_eq!(
            resolve_name(AttributeKind::Characteristic, BATTERY_LEVEL, Some("")),
            "BatteryLevel"
        );
        assert_eq!(
            resolve_name(AttributeKind::Characteristic, BATTERY_LEVEL, None),
            "BatteryLevel"
        );
    }

    #[test]
    fn test_characteristic_with_user_description() {
        assert_eq!(
            resolve_name(AttributeKind::Characteristic, BATTERY_LEVEL, Some("Foo")),
            "BatteryLevel (Foo)"
        );
    }

    #[test]
    fn test_unregistered_sig_ids_are_invalid() {
        let unregistered = Uuid128::from_short_id(0x1234);
        assert_eq!(resolve_name(AttributeKind::Service, unregistered, None), "Invalid");
        assert_eq!(
            resolve_name(AttributeKind::Characteristic, unregistered, Some("Foo")),
            "Invalid"
        );
        assert_eq!(resolve_name(AttributeKind::Descriptor, unregistered, None), "Invalid");
    }

    #[test]
    fn test_custom_service_uses_full_uuid_text() {
        assert_eq!(
            resolve_name(AttributeKind::Service, VENDOR, Some("ignored")),
            "Custom Service: c8c51726-81bc-483b-a052-f7a14ea3d281"
        );
    }

    #[test]
    fn test_custom_characteristic_prefers_description() {
        assert_eq!(
            resolve_name(AttributeKind::Characteristic, VENDOR, Some("Voice")),
            "Voice"
        );
        assert_eq!(
            resolve_name(AttributeKind::Characteristic, VENDOR, Some("")),
            "Custom Characteristic: c8c51726-81bc-483b-a052-f7a14ea3d281"
        );
    }

    #[test]
    fn test_descriptors_resolve_like_services() {
        assert_eq!(
            resolve_name(AttributeKind::Descriptor, Uuid128::from_short_id(0x2902), None),
            "ClientCharacteristicConfiguration"
        );
        assert_eq!(
            resolve_name(AttributeKind::Descriptor, VENDOR, None),
            "Custom Descriptor: c8c51726-81bc-483b-a052-f7a14ea3d281"
        );
    }

    #[test]
    fn test_kind_round_trip() {
        let attribute = Attribute::new(AttributeKind::Service, VENDOR, Some("dropped"));
        assert_eq!(attribute.kind(), AttributeKind::Service);
        assert_eq!(attribute.uuid(), VENDOR);
    }
}
