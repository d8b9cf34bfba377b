//! This crate provides a platform agnostic no_std driver for the VCNL4040 proximity and ambient
//! light sensor. The driver is compatible with the [`embedded-hal`](https://crates.io/crates/embedded-hal) traits.
//!
//! The datasheet of the sensor can be found [here](https://www.vishay.com/docs/84274/vcnl4040.pdf).
//!
//! ## Supported features
//! * Reading proximity, ambient light and white channel data
//! * Converting the raw light values into lux for the current integration time
//! * Configurable integration times, LED current and LED duty cycle
//! * Proximity and ambient light interrupt thresholds
//! * Latched interrupt flags that are not lost when the hardware clears them
//! * Generic access to every register field by name
//!
//! ## Unsupported features
//! * The hardware interrupt pin (only the status register is read)
//! * Async
//!
//! ## Usage
//!
//! ### Creating a driver instance
//!
//! ```ignore
//! use vcnl4040::VCNL4040;
//!
//! fn main() {
//!     let mut i2c = hal::I2cdev::new("/dev/i2c-1").unwrap();
//!
//!     // Checks the device ID and powers on proximity, ambient light and white channel
//!     let mut sensor = VCNL4040::new(&mut i2c).unwrap();
//! }
//! ```
//!
//! ### Reading the ambient light intensity
//!
//! ```ignore
//! use vcnl4040::{LightIntegrationTime, VCNL4040};
//!
//! fn main() {
//!     let mut i2c = hal::I2cdev::new("/dev/i2c-1").unwrap();
//!     let mut delay = hal::Delay;
//!     let mut sensor = VCNL4040::new(&mut i2c).unwrap();
//!
//!     // Blocks until the sensor has settled on the new integration time
//!     sensor
//!         .set_light_integration_time(LightIntegrationTime::Ms640, &mut delay, &mut i2c)
//!         .unwrap();
//!
//!     let lux = sensor.lux(&mut i2c).unwrap();
//!     println!("Ambient light intensity: {} lux", lux);
//! }
//! ```
//!
//! ### Proximity interrupts
//!
//! ```ignore
//! use vcnl4040::{ProximityInterrupt, VCNL4040};
//!
//! fn main() {
//!     let mut i2c = hal::I2cdev::new("/dev/i2c-1").unwrap();
//!     let mut sensor = VCNL4040::new(&mut i2c).unwrap();
//!
//!     sensor.set_proximity_high_threshold(1000, &mut i2c).unwrap();
//!     sensor
//!         .set_proximity_interrupt(ProximityInterrupt::Close, &mut i2c)
//!         .unwrap();
//!
//!     // Returns true once per close event, even if the sensor already cleared its flag
//!     if sensor.proximity_high_interrupt(&mut i2c).unwrap() {
//!         println!("Something came close");
//!     }
//! }
//! ```
//!
//! ## Concurrency
//!
//! Bit and bit-field setters read the whole register, change their bits and write it back.
//! Setters of fields sharing a register must be serialized by the caller when the sensor is
//! used from more than one execution context.

#![cfg_attr(not(test), no_std)]

pub mod field;
pub mod interrupt;
pub mod map;
pub mod register;
pub mod types;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};

pub use field::{Accessor, Bit, Bits, FieldTooWide, Unary};
pub use interrupt::{InterruptCache, InterruptFlag};
pub use map::Field;
pub use register::{ByteOrder, Register, RegisterWidth};
pub use types::{
    LedCurrent, LedDutyCycle, LightIntegrationTime, ProximityIntegrationTime, ProximityInterrupt,
    ProximityResolution,
};

/// Default I2C address for the VCNL4040 sensor.
pub const VCNL4040_ADDR: u8 = 0x60;

/// Content of the ID register of a VCNL4040.
pub const VCNL4040_DEVICE_ID: u16 = 0x186;

/// Represents an I2C-connected VCNL4040 sensor.
#[derive(Copy, Clone, Debug)]
pub struct VCNL4040<I2C> {
    /// I2C Interface for communicating with the sensor.
    _i2c: core::marker::PhantomData<I2C>,

    /// 7-bit I2C address of the sensor.
    address: u8,

    /// Interrupt flags seen but not yet consumed.
    interrupts: InterruptCache,
}

impl<I2C, E> VCNL4040<I2C>
where
    I2C: WriteRead<Error = E> + Write<Error = E>,
{
    /// Creates a connection with a VCNL4040 sensor at the default address.
    ///
    /// See [`VCNL4040::with_address`].
    pub fn new(i2c: &mut I2C) -> Result<Self, E> {
        Self::with_address(VCNL4040_ADDR, i2c)
    }

    /// Creates a connection with a VCNL4040 sensor at `address`.
    ///
    /// Fails with [`VCNL4040Error::DeviceNotFound`] if the ID register does not identify a
    /// VCNL4040; nothing is written to the device in that case. Otherwise proximity, ambient
    /// light and white channel are powered on.
    pub fn with_address(address: u8, i2c: &mut I2C) -> Result<Self, E> {
        let device_id = map::DEVICE_ID.read(address, i2c)?;
        if device_id != VCNL4040_DEVICE_ID {
            log::error!(
                "No VCNL4040 at 0x{:02X}: device ID 0x{:04X} - check wiring!",
                address,
                device_id
            );
            return Err(VCNL4040Error::DeviceNotFound(device_id));
        }

        let mut sensor = Self {
            _i2c: core::marker::PhantomData,
            address,
            interrupts: InterruptCache::new(),
        };

        sensor.set_proximity_shutdown(false, i2c)?;
        sensor.set_light_shutdown(false, i2c)?;
        sensor.set_white_shutdown(false, i2c)?;

        log::info!("VCNL4040 found at 0x{:02X}", address);

        Ok(sensor)
    }

    /// The I2C address of the sensor.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reads any field of the register map. Single bits read as `0` or `1`.
    pub fn read_field(&mut self, field: Field, i2c: &mut I2C) -> Result<u16, E> {
        field.accessor().read(self.address, i2c)
    }

    /// Writes any field of the register map.
    ///
    /// Read-only fields fail with [`VCNL4040Error::ImmutableField`], values that do not fit the
    /// field with [`VCNL4040Error::ValueOutOfRange`], both before touching the bus.
    pub fn write_field(&mut self, field: Field, value: u16, i2c: &mut I2C) -> Result<(), E> {
        field.accessor().write(self.address, value, i2c)
    }

    fn read_flag(&mut self, field: Field, i2c: &mut I2C) -> Result<bool, E> {
        Ok(self.read_field(field, i2c)? != 0)
    }

    fn write_flag(&mut self, field: Field, value: bool, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(field, u16::from(value), i2c)
    }

    /// Reads the device ID, `0x186` for a VCNL4040.
    pub fn device_id(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::DeviceId, i2c)
    }

    /// Reads the raw proximity data. Larger values mean closer objects.
    pub fn proximity(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::Proximity, i2c)
    }

    /// Whether the proximity sensor is shut down.
    pub fn proximity_shutdown(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.read_flag(Field::ProximityShutdown, i2c)
    }

    /// Shuts the proximity sensor down (`true`) or powers it on (`false`).
    pub fn set_proximity_shutdown(&mut self, shutdown: bool, i2c: &mut I2C) -> Result<(), E> {
        self.write_flag(Field::ProximityShutdown, shutdown, i2c)
    }

    pub fn proximity_integration_time(
        &mut self,
        i2c: &mut I2C,
    ) -> Result<ProximityIntegrationTime, E> {
        let bits = self.read_field(Field::ProximityIntegrationTime, i2c)?;
        Ok(ProximityIntegrationTime::from_reg_value(bits))
    }

    pub fn set_proximity_integration_time(
        &mut self,
        time: ProximityIntegrationTime,
        i2c: &mut I2C,
    ) -> Result<(), E> {
        self.write_field(Field::ProximityIntegrationTime, time.into_reg_value(), i2c)
    }

    /// Reads which proximity events raise an interrupt.
    pub fn proximity_interrupt(&mut self, i2c: &mut I2C) -> Result<ProximityInterrupt, E> {
        let bits = self.read_field(Field::ProximityInterrupt, i2c)?;
        Ok(ProximityInterrupt::from_reg_value(bits))
    }

    /// Selects which proximity events raise an interrupt.
    pub fn set_proximity_interrupt(
        &mut self,
        interrupt: ProximityInterrupt,
        i2c: &mut I2C,
    ) -> Result<(), E> {
        self.write_field(Field::ProximityInterrupt, interrupt.into_reg_value(), i2c)
    }

    /// Reads whether proximity data is 12 or 16 bits wide.
    pub fn proximity_resolution(&mut self, i2c: &mut I2C) -> Result<ProximityResolution, E> {
        Ok(self.read_flag(Field::ProximityBits, i2c)?.into())
    }

    pub fn set_proximity_resolution(
        &mut self,
        resolution: ProximityResolution,
        i2c: &mut I2C,
    ) -> Result<(), E> {
        self.write_flag(Field::ProximityBits, resolution.into(), i2c)
    }

    pub fn proximity_low_threshold(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::ProximityLowThreshold, i2c)
    }

    pub fn set_proximity_low_threshold(&mut self, threshold: u16, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(Field::ProximityLowThreshold, threshold, i2c)
    }

    pub fn proximity_high_threshold(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::ProximityHighThreshold, i2c)
    }

    pub fn set_proximity_high_threshold(&mut self, threshold: u16, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(Field::ProximityHighThreshold, threshold, i2c)
    }

    pub fn led_current(&mut self, i2c: &mut I2C) -> Result<LedCurrent, E> {
        let bits = self.read_field(Field::LedCurrent, i2c)?;
        Ok(LedCurrent::from_reg_value(bits))
    }

    pub fn set_led_current(&mut self, current: LedCurrent, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(Field::LedCurrent, current.into_reg_value(), i2c)
    }

    pub fn led_duty_cycle(&mut self, i2c: &mut I2C) -> Result<LedDutyCycle, E> {
        let bits = self.read_field(Field::LedDutyCycle, i2c)?;
        Ok(LedDutyCycle::from_reg_value(bits))
    }

    pub fn set_led_duty_cycle(&mut self, duty_cycle: LedDutyCycle, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(Field::LedDutyCycle, duty_cycle.into_reg_value(), i2c)
    }

    /// Reads the raw ambient light data. Use [`VCNL4040::lux`] for a value independent of the
    /// integration time.
    pub fn light(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::Light, i2c)
    }

    /// Reads the ambient light intensity in lux, scaled for the current integration time.
    pub fn lux(&mut self, i2c: &mut I2C) -> Result<f32, E> {
        let raw = self.light(i2c)?;
        let time = self.light_integration_time(i2c)?;

        Ok(raw as f32 * time.lux_per_count())
    }

    /// Whether the ambient light sensor is shut down.
    pub fn light_shutdown(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.read_flag(Field::LightShutdown, i2c)
    }

    pub fn set_light_shutdown(&mut self, shutdown: bool, i2c: &mut I2C) -> Result<(), E> {
        self.write_flag(Field::LightShutdown, shutdown, i2c)
    }

    pub fn light_integration_time(&mut self, i2c: &mut I2C) -> Result<LightIntegrationTime, E> {
        let bits = self.read_field(Field::LightIntegrationTime, i2c)?;
        Ok(LightIntegrationTime::from_reg_value(bits))
    }

    /// Write the ambient light integration time to the sensor.
    ///
    /// The sensor needs both the old and the new integration period to settle, so this blocks
    /// for their sum plus one millisecond before returning. Light readings taken afterwards use
    /// the new setting.
    pub fn set_light_integration_time<D>(
        &mut self,
        time: LightIntegrationTime,
        delay: &mut D,
        i2c: &mut I2C,
    ) -> Result<(), E>
    where
        D: DelayMs<u32>,
    {
        let old_time = self.light_integration_time(i2c)?;
        self.write_field(Field::LightIntegrationTime, time.into_reg_value(), i2c)?;

        let settle_ms = old_time.as_ms() + time.as_ms() + 1;
        log::info!(
            "Light integration time {:?} -> {:?}, settling for {} ms",
            old_time,
            time,
            settle_ms
        );
        delay.delay_ms(settle_ms);

        Ok(())
    }

    /// Whether the ambient light threshold interrupt is enabled.
    pub fn light_interrupt(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.read_flag(Field::LightInterrupt, i2c)
    }

    pub fn set_light_interrupt(&mut self, enable: bool, i2c: &mut I2C) -> Result<(), E> {
        self.write_flag(Field::LightInterrupt, enable, i2c)
    }

    pub fn light_low_threshold(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::LightLowThreshold, i2c)
    }

    pub fn set_light_low_threshold(&mut self, threshold: u16, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(Field::LightLowThreshold, threshold, i2c)
    }

    pub fn light_high_threshold(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::LightHighThreshold, i2c)
    }

    pub fn set_light_high_threshold(&mut self, threshold: u16, i2c: &mut I2C) -> Result<(), E> {
        self.write_field(Field::LightHighThreshold, threshold, i2c)
    }

    pub fn raw_white(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::RawWhite, i2c)
    }

    /// Reads the white channel, scaled like [`VCNL4040::lux`].
    pub fn white(&mut self, i2c: &mut I2C) -> Result<f32, E> {
        let raw = self.raw_white(i2c)?;
        let time = self.light_integration_time(i2c)?;

        Ok(raw as f32 * time.lux_per_count())
    }

    /// Whether the white channel is shut down.
    pub fn white_shutdown(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.read_flag(Field::WhiteShutdown, i2c)
    }

    pub fn set_white_shutdown(&mut self, shutdown: bool, i2c: &mut I2C) -> Result<(), E> {
        self.write_flag(Field::WhiteShutdown, shutdown, i2c)
    }

    /// Reads the raw interrupt status register without touching the latched flags.
    pub fn interrupt_status(&mut self, i2c: &mut I2C) -> Result<u16, E> {
        self.read_field(Field::InterruptStatus, i2c)
    }

    /// Reads the interrupt status and latches every flag that is set.
    pub fn refresh_interrupts(&mut self, i2c: &mut I2C) -> Result<(), E> {
        let status = self.interrupt_status(i2c)?;
        self.interrupts.update(status);
        Ok(())
    }

    /// Returns whether `flag` fired since it was last taken, and clears it.
    ///
    /// The status register is refreshed first, so an event pending in hardware is not missed.
    pub fn take_interrupt(&mut self, flag: InterruptFlag, i2c: &mut I2C) -> Result<bool, E> {
        self.refresh_interrupts(i2c)?;
        Ok(self.interrupts.take(flag))
    }

    /// Proximity rose above the high threshold. Needs [`ProximityInterrupt::Close`] or
    /// [`ProximityInterrupt::CloseAway`].
    pub fn proximity_high_interrupt(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.take_interrupt(InterruptFlag::ProximityClose, i2c)
    }

    /// Proximity dropped below the low threshold. Needs [`ProximityInterrupt::Away`] or
    /// [`ProximityInterrupt::CloseAway`].
    pub fn proximity_low_interrupt(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.take_interrupt(InterruptFlag::ProximityAway, i2c)
    }

    /// Ambient light exceeded the high threshold.
    pub fn light_high_interrupt(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.take_interrupt(InterruptFlag::LightHigh, i2c)
    }

    /// Ambient light dropped below the low threshold.
    pub fn light_low_interrupt(&mut self, i2c: &mut I2C) -> Result<bool, E> {
        self.take_interrupt(InterruptFlag::LightLow, i2c)
    }
}

/// Shorthand for all functions returning an error in this crate.
type Result<T, E> = core::result::Result<T, VCNL4040Error<E>>;

/// Represents any error that may happen when talking to the sensor.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum VCNL4040Error<E> {
    /// An error occurred while reading from the sensor.
    ReadI2CError(E),
    /// An error occurred while writing to the sensor.
    WriteI2CError(E),
    /// The ID register did not identify a VCNL4040; holds the ID that was read.
    DeviceNotFound(u16),
    /// The field is read-only.
    ImmutableField,
    /// A bit-field does not fit into its register.
    FieldTooWide,
    /// The value does not fit into the field.
    ValueOutOfRange,
}
