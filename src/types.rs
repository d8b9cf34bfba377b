//! Typed option values of the configuration fields.
//!
//! Every enum decodes totally from the bits of its field, so reading a setting back never fails.

/// Ambient light sensor integration time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LightIntegrationTime {
    Ms80 = 0x0,
    Ms160 = 0x1,
    Ms320 = 0x2,
    Ms640 = 0x3,
}

impl LightIntegrationTime {
    pub fn into_reg_value(self) -> u16 {
        self as u16
    }

    pub fn from_reg_value(bits: u16) -> Self {
        match bits & 0x3 {
            0x0 => LightIntegrationTime::Ms80,
            0x1 => LightIntegrationTime::Ms160,
            0x2 => LightIntegrationTime::Ms320,
            _ => LightIntegrationTime::Ms640,
        }
    }

    /// Integration period in milliseconds.
    pub fn as_ms(self) -> u32 {
        10 * (8 << self as u32)
    }

    /// Lux per raw count at this integration time.
    pub fn lux_per_count(self) -> f32 {
        0.1 / (1u32 << self as u32) as f32
    }
}

/// Proximity sensor integration time, in multiples of the base period T.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ProximityIntegrationTime {
    T1 = 0x0,
    T1_5 = 0x1,
    T2 = 0x2,
    T2_5 = 0x3,
    T3 = 0x4,
    T3_5 = 0x5,
    T4 = 0x6,
    T8 = 0x7,
}

impl ProximityIntegrationTime {
    pub fn into_reg_value(self) -> u16 {
        self as u16
    }

    pub fn from_reg_value(bits: u16) -> Self {
        match bits & 0x7 {
            0x0 => ProximityIntegrationTime::T1,
            0x1 => ProximityIntegrationTime::T1_5,
            0x2 => ProximityIntegrationTime::T2,
            0x3 => ProximityIntegrationTime::T2_5,
            0x4 => ProximityIntegrationTime::T3,
            0x5 => ProximityIntegrationTime::T3_5,
            0x6 => ProximityIntegrationTime::T4,
            _ => ProximityIntegrationTime::T8,
        }
    }
}

/// IR LED drive current.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LedCurrent {
    Ma50 = 0x0,
    Ma75 = 0x1,
    Ma100 = 0x2,
    Ma120 = 0x3,
    Ma140 = 0x4,
    Ma160 = 0x5,
    Ma180 = 0x6,
    Ma200 = 0x7,
}

impl LedCurrent {
    pub fn into_reg_value(self) -> u16 {
        self as u16
    }

    pub fn from_reg_value(bits: u16) -> Self {
        match bits & 0x7 {
            0x0 => LedCurrent::Ma50,
            0x1 => LedCurrent::Ma75,
            0x2 => LedCurrent::Ma100,
            0x3 => LedCurrent::Ma120,
            0x4 => LedCurrent::Ma140,
            0x5 => LedCurrent::Ma160,
            0x6 => LedCurrent::Ma180,
            _ => LedCurrent::Ma200,
        }
    }
}

impl From<LedCurrent> for u16 {
    fn from(current: LedCurrent) -> Self {
        match current {
            LedCurrent::Ma50 => 50,
            LedCurrent::Ma75 => 75,
            LedCurrent::Ma100 => 100,
            LedCurrent::Ma120 => 120,
            LedCurrent::Ma140 => 140,
            LedCurrent::Ma160 => 160,
            LedCurrent::Ma180 => 180,
            LedCurrent::Ma200 => 200,
        }
    }
}

/// Proximity IR LED on/off duty ratio.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LedDutyCycle {
    Ratio1_40 = 0x0,
    Ratio1_80 = 0x1,
    Ratio1_160 = 0x2,
    Ratio1_320 = 0x3,
}

impl LedDutyCycle {
    pub fn into_reg_value(self) -> u16 {
        self as u16
    }

    pub fn from_reg_value(bits: u16) -> Self {
        match bits & 0x3 {
            0x0 => LedDutyCycle::Ratio1_40,
            0x1 => LedDutyCycle::Ratio1_80,
            0x2 => LedDutyCycle::Ratio1_160,
            _ => LedDutyCycle::Ratio1_320,
        }
    }
}

/// Which proximity events raise an interrupt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ProximityInterrupt {
    Disable = 0x0,
    Close = 0x1,
    Away = 0x2,
    CloseAway = 0x3,
}

impl ProximityInterrupt {
    pub fn into_reg_value(self) -> u16 {
        self as u16
    }

    pub fn from_reg_value(bits: u16) -> Self {
        match bits & 0x3 {
            0x0 => ProximityInterrupt::Disable,
            0x1 => ProximityInterrupt::Close,
            0x2 => ProximityInterrupt::Away,
            _ => ProximityInterrupt::CloseAway,
        }
    }
}

/// Proximity output size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProximityResolution {
    Bits12,
    Bits16,
}

impl From<bool> for ProximityResolution {
    fn from(bit: bool) -> Self {
        if bit {
            ProximityResolution::Bits16
        } else {
            ProximityResolution::Bits12
        }
    }
}

impl From<ProximityResolution> for bool {
    fn from(resolution: ProximityResolution) -> Self {
        resolution == ProximityResolution::Bits16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_integration_time() {
        assert_eq!(LightIntegrationTime::Ms80.as_ms(), 80);
        assert_eq!(LightIntegrationTime::Ms640.as_ms(), 640);
        assert_eq!(LightIntegrationTime::Ms80.lux_per_count(), 0.1);
        assert_eq!(LightIntegrationTime::Ms640.lux_per_count(), 0.0125);
        assert_eq!(
            LightIntegrationTime::from_reg_value(2),
            LightIntegrationTime::Ms320
        );
    }

    #[test]
    fn test_reg_values() {
        assert_eq!(ProximityIntegrationTime::T8.into_reg_value(), 7);
        assert_eq!(
            ProximityIntegrationTime::from_reg_value(5),
            ProximityIntegrationTime::T3_5
        );
        assert_eq!(LedCurrent::from_reg_value(3), LedCurrent::Ma120);
        assert_eq!(u16::from(LedCurrent::Ma180), 180);
        assert_eq!(LedDutyCycle::Ratio1_160.into_reg_value(), 2);
        assert_eq!(
            ProximityInterrupt::from_reg_value(3),
            ProximityInterrupt::CloseAway
        );
        assert_eq!(ProximityResolution::from(true), ProximityResolution::Bits16);
        assert!(!bool::from(ProximityResolution::Bits12));
    }
}
