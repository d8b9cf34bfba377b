//! Register map of the VCNL4040
//!
//! Every field is a `const` accessor, so a layout that does not fit its register fails to compile.

use crate::field::{Accessor, Bit, Bits, Unary};
use crate::register::{ByteOrder::LsbFirst, Register, RegisterWidth::Two};

// ID_L / ID_M
pub const DEVICE_ID: Unary = Unary::read_only(Register::ID, Two, LsbFirst);

// PS_CONF1 / PS_CONF2
pub const PROXIMITY_SHUTDOWN: Bit = Bit::new(Register::PsConf1Conf2, 0, Two, LsbFirst);
pub const PROXIMITY_INTEGRATION_TIME: Bits = Bits::new(3, Register::PsConf1Conf2, 1, Two, LsbFirst);
pub const LED_DUTY_CYCLE: Bits = Bits::new(2, Register::PsConf1Conf2, 6, Two, LsbFirst);
pub const PROXIMITY_INTERRUPT: Bits = Bits::new(2, Register::PsConf1Conf2, 8, Two, LsbFirst);
pub const PROXIMITY_BITS: Bit = Bit::new(Register::PsConf1Conf2, 11, Two, LsbFirst);

// PS_CONF3 / PS_MS
pub const LED_CURRENT: Bits = Bits::new(3, Register::PsConf3Ms, 8, Two, LsbFirst);
pub const WHITE_SHUTDOWN: Bit = Bit::new(Register::PsConf3Ms, 15, Two, LsbFirst);

pub const PROXIMITY_LOW_THRESHOLD: Unary = Unary::new(Register::PsThresholdLow, Two, LsbFirst);
pub const PROXIMITY_HIGH_THRESHOLD: Unary = Unary::new(Register::PsThresholdHigh, Two, LsbFirst);
pub const PROXIMITY: Unary = Unary::read_only(Register::PsData, Two, LsbFirst);

pub const INTERRUPT_STATUS: Unary = Unary::read_only(Register::IntFlag, Two, LsbFirst);

// ALS_CONF
pub const LIGHT_SHUTDOWN: Bit = Bit::new(Register::AlsConf, 0, Two, LsbFirst);
pub const LIGHT_INTERRUPT: Bit = Bit::new(Register::AlsConf, 1, Two, LsbFirst);
pub const LIGHT_INTEGRATION_TIME: Bits = Bits::new(2, Register::AlsConf, 6, Two, LsbFirst);

pub const LIGHT_LOW_THRESHOLD: Unary = Unary::new(Register::AlsThresholdLow, Two, LsbFirst);
pub const LIGHT_HIGH_THRESHOLD: Unary = Unary::new(Register::AlsThresholdHigh, Two, LsbFirst);
pub const LIGHT: Unary = Unary::read_only(Register::AlsData, Two, LsbFirst);

pub const RAW_WHITE: Unary = Unary::read_only(Register::WhiteData, Two, LsbFirst);

/// Name of every field in the register map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    DeviceId,
    Proximity,
    ProximityShutdown,
    ProximityIntegrationTime,
    ProximityInterrupt,
    ProximityBits,
    ProximityLowThreshold,
    ProximityHighThreshold,
    InterruptStatus,
    LedCurrent,
    LedDutyCycle,
    Light,
    LightShutdown,
    LightIntegrationTime,
    LightInterrupt,
    LightLowThreshold,
    LightHighThreshold,
    RawWhite,
    WhiteShutdown,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::DeviceId,
        Field::Proximity,
        Field::ProximityShutdown,
        Field::ProximityIntegrationTime,
        Field::ProximityInterrupt,
        Field::ProximityBits,
        Field::ProximityLowThreshold,
        Field::ProximityHighThreshold,
        Field::InterruptStatus,
        Field::LedCurrent,
        Field::LedDutyCycle,
        Field::Light,
        Field::LightShutdown,
        Field::LightIntegrationTime,
        Field::LightInterrupt,
        Field::LightLowThreshold,
        Field::LightHighThreshold,
        Field::RawWhite,
        Field::WhiteShutdown,
    ];

    pub const fn accessor(self) -> Accessor {
        match self {
            Field::DeviceId => Accessor::Unary(DEVICE_ID),
            Field::Proximity => Accessor::Unary(PROXIMITY),
            Field::ProximityShutdown => Accessor::Bit(PROXIMITY_SHUTDOWN),
            Field::ProximityIntegrationTime => Accessor::Bits(PROXIMITY_INTEGRATION_TIME),
            Field::ProximityInterrupt => Accessor::Bits(PROXIMITY_INTERRUPT),
            Field::ProximityBits => Accessor::Bit(PROXIMITY_BITS),
            Field::ProximityLowThreshold => Accessor::Unary(PROXIMITY_LOW_THRESHOLD),
            Field::ProximityHighThreshold => Accessor::Unary(PROXIMITY_HIGH_THRESHOLD),
            Field::InterruptStatus => Accessor::Unary(INTERRUPT_STATUS),
            Field::LedCurrent => Accessor::Bits(LED_CURRENT),
            Field::LedDutyCycle => Accessor::Bits(LED_DUTY_CYCLE),
            Field::Light => Accessor::Unary(LIGHT),
            Field::LightShutdown => Accessor::Bit(LIGHT_SHUTDOWN),
            Field::LightIntegrationTime => Accessor::Bits(LIGHT_INTEGRATION_TIME),
            Field::LightInterrupt => Accessor::Bit(LIGHT_INTERRUPT),
            Field::LightLowThreshold => Accessor::Unary(LIGHT_LOW_THRESHOLD),
            Field::LightHighThreshold => Accessor::Unary(LIGHT_HIGH_THRESHOLD),
            Field::RawWhite => Accessor::Unary(RAW_WHITE),
            Field::WhiteShutdown => Accessor::Bit(WHITE_SHUTDOWN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_fields() {
        let read_only = [
            Field::DeviceId,
            Field::Proximity,
            Field::InterruptStatus,
            Field::Light,
            Field::RawWhite,
        ];

        for field in Field::ALL {
            assert_eq!(
                field.accessor().is_writable(),
                !read_only.contains(&field),
                "{:?}",
                field
            );
        }
    }

    #[test]
    fn test_addresses() {
        assert_eq!(Field::DeviceId.accessor().register() as u8, 0x0C);
        assert_eq!(Field::LedCurrent.accessor().register() as u8, 0x04);
        assert_eq!(Field::LedDutyCycle.accessor().register() as u8, 0x03);
        assert_eq!(Field::LightHighThreshold.accessor().register() as u8, 0x01);
        assert_eq!(Field::LightLowThreshold.accessor().register() as u8, 0x02);
        assert_eq!(Field::RawWhite.accessor().register() as u8, 0x0A);
    }

    #[test]
    fn test_field_widths() {
        assert_eq!(PROXIMITY_INTEGRATION_TIME.max_value(), 7);
        assert_eq!(LED_CURRENT.max_value(), 7);
        assert_eq!(LIGHT_INTEGRATION_TIME.max_value(), 3);
        assert_eq!(PROXIMITY_INTERRUPT.max_value(), 3);
        assert_eq!(LED_DUTY_CYCLE.max_value(), 3);
    }
}
