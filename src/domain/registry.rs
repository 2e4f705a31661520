//! Bluetooth SIG assigned-number tables.
//!
//! One table per attribute kind, keyed by the 16-bit short id.
//! A missing key is what the resolver reports as `"Invalid"`.

/// Service names.
/// Reference: https://www.bluetooth.com/specifications/assigned-numbers/
pub fn service_name(short_id: u16) -> Option<&'static str> {
    let name = match short_id {
        0x0000 => "None",
        0x1811 => "AlertNotification",
        0x180F => "Battery",
        0x1810 => "BloodPressure",
        0x181E => "BondManagementService",
        0x1805 => "CurrentTimeService",
        0x1816 => "CyclingSpeedandCadence",
        0x180A => "DeviceInformation",
        0x1800 => "GenericAccess",
        0x1801 => "GenericAttribute",
        0x1808 => "Glucose",
        0x1809 => "HealthThermometer",
        0x180D => "HeartRate",
        0x1812 => "HumanInterfaceDevice",
        0x1802 => "ImmediateAlert",
        0x1803 => "LinkLoss",
        0x1807 => "NextDSTChange",
        0x180E => "PhoneAlertStatus",
        0x1806 => "ReferenceTimeUpdateService",
        0x1814 => "RunningSpeedandCadence",
        0x1813 => "ScanParameters",
        0x1804 => "TxPower",
        0xFFE0 => "SimpleKeyService",
        _ => return None,
    };
    Some(name)
}

/// Characteristic names.
pub fn characteristic_name(short_id: u16) -> Option<&'static str> {
    let name = match short_id {
        0x0000 => "None",
        0x2A43 => "AlertCategoryID",
        0x2A42 => "AlertCategoryIDBitMask",
        0x2A06 => "AlertLevel",
        0x2A44 => "AlertNotificationControlPoint",
        0x2A3F => "AlertStatus",
        0x2A01 => "Appearance",
        0x2A19 => "BatteryLevel",
        0x2A49 => "BloodPressureFeature",
        0x2A35 => "BloodPressureMeasurement",
        0x2A38 => "BodySensorLocation",
        0x2A22 => "BootKeyboardInputReport",
        0x2A32 => "BootKeyboardOutputReport",
        0x2A33 => "BootMouseInputReport",
        0x2AA4 => "BondManagementControlPoint",
        0x2AA5 => "BondManagementFeatures",
        0x2A5C => "CSCFeature",
        0x2A5B => "CSCMeasurement",
        0x2A2B => "CurrentTime",
        0x2A08 => "DateTime",
        0x2A0A => "DayDateTime",
        0x2A09 => "DayofWeek",
        0x2A00 => "DeviceName",
        0x2A0D => "DSTOffset",
        0x2A0C => "ExactTime256",
        0x2A26 => "FirmwareRevisionString",
        0x2A51 => "GlucoseFeature",
        0x2A18 => "GlucoseMeasurement",
        0x2A34 => "GlucoseMeasurementContext",
        0x2A27 => "HardwareRevisionString",
        0x2A39 => "HeartRateControlPoint",
        0x2A37 => "HeartRateMeasurement",
        0x2A4C => "HIDControlPoint",
        0x2A4A => "HIDInformation",
        0x2A2A => "IEEE11073_20601RegulatoryCertificationDataList",
        0x2A36 => "IntermediateCuffPressure",
        0x2A1E => "IntermediateTemperature",
        0x2A0F => "LocalTimeInformation",
        0x2A29 => "ManufacturerNameString",
        0x2A21 => "MeasurementInterval",
        0x2A24 => "ModelNumberString",
        0x2A46 => "NewAlert",
        0x2A04 => "PeripheralPreferredConnectionParameters",
        0x2A02 => "PeripheralPrivacyFlag",
        0x2A50 => "PnPID",
        0x2A4E => "ProtocolMode",
        0x2A03 => "ReconnectionAddress",
        0x2A52 => "RecordAccessControlPoint",
        0x2A14 => "ReferenceTimeInformation",
        0x2A4D => "Report",
        0x2A4B => "ReportMap",
        0x2A40 => "RingerControlPoint",
        0x2A41 => "RingerSetting",
        0x2A54 => "RSCFeature",
        0x2A53 => "RSCMeasurement",
        0x2A55 => "SCControlPoint",
        0x2A4F => "ScanIntervalWindow",
        0x2A31 => "ScanRefresh",
        0x2A5D => "SensorLocation",
        0x2A25 => "SerialNumberString",
        0x2A05 => "ServiceChanged",
        0x2A28 => "SoftwareRevisionString",
        0x2A47 => "SupportedNewAlertCategory",
        0x2A48 => "SupportedUnreadAlertCategory",
        0x2A23 => "SystemID",
        0x2A1C => "TemperatureMeasurement",
        0x2A1D => "TemperatureType",
        0x2A12 => "TimeAccuracy",
        0x2A13 => "TimeSource",
        0x2A16 => "TimeUpdateControlPoint",
        0x2A17 => "TimeUpdateState",
        0x2A11 => "TimewithDST",
        0x2A0E => "TimeZone",
        0x2A07 => "TxPowerLevel",
        0x2A45 => "UnreadAlertStatus",
        0x2A5A => "AggregateInput",
        0x2A58 => "AnalogInput",
        0x2A59 => "AnalogOutput",
        0x2A66 => "CyclingPowerControlPoint",
        0x2A65 => "CyclingPowerFeature",
        0x2A63 => "CyclingPowerMeasurement",
        0x2A64 => "CyclingPowerVector",
        0x2A56 => "DigitalInput",
        0x2A57 => "DigitalOutput",
        0x2A0B => "ExactTime100",
        0x2A6B => "LNControlPoint",
        0x2A6A => "LNFeature",
        0x2A67 => "LocationandSpeed",
        0x2A68 => "Navigation",
        0x2A3E => "NetworkAvailability",
        0x2A69 => "PositionQuality",
        0x2A3C => "ScientificTemperatureinCelsius",
        0x2A10 => "SecondaryTimeZone",
        0x2A3D => "String",
        0x2A1F => "TemperatureinCelsius",
        0x2A20 => "TemperatureinFahrenheit",
        0x2A15 => "TimeBroadcast",
        0x2A1B => "BatteryLevelState",
        0x2A1A => "BatteryPowerState",
        0x2A5F => "PulseOximetryContinuousMeasurement",
        0x2A62 => "PulseOximetryControlPoint",
        0x2A61 => "PulseOximetryFeatures",
        0x2A60 => "PulseOximetryPulsatileEvent",
        0xFFE1 => "SimpleKeyState",
        _ => return None,
    };
    Some(name)
}

/// Descriptor names.
pub fn descriptor_name(short_id: u16) -> Option<&'static str> {
    let name = match short_id {
        0x2900 => "CharacteristicExtendedProperties",
        0x2901 => "CharacteristicUserDescription",
        0x2902 => "ClientCharacteristicConfiguration",
        0x2903 => "ServerCharacteristicConfiguration",
        0x2904 => "CharacteristicPresentationFormat",
        0x2905 => "CharacteristicAggregateFormat",
        0x2906 => "ValidRange",
        0x2907 => "ExternalReportReference",
        0x2908 => "ReportReference",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_entries() {
        assert_eq!(service_name(0x180F), Some("Battery"));
        assert_eq!(characteristic_name(0x2A19), Some("BatteryLevel"));
        assert_eq!(characteristic_name(0x2A1A), Some("BatteryPowerState"));
    }

    #[test]
    fn test_tables_are_kind_specific() {
        assert_eq!(service_name(0x2A19), None);
        assert_eq!(characteristic_name(0x180F), None);
        assert_eq!(descriptor_name(0x2902), Some("ClientCharacteristicConfiguration"));
        assert_eq!(descriptor_name(0x0000), None);
    }
}
