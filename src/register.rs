//! Register addresses of the VCNL4040 and the raw bus helpers used by every field accessor.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::{Result, VCNL4040Error};

/// Largest register of the VCNL4040 in bytes.
pub const MAX_REGISTER_WIDTH: usize = 2;

// All registers of the VCNL4040 sensor used by this driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// ALS integration time, persistence, interrupt and shutdown
    AlsConf = 0x00,

    /// ALS high interrupt threshold
    AlsThresholdHigh = 0x01,

    /// ALS low interrupt threshold
    AlsThresholdLow = 0x02,

    /// PS duty ratio, integration time, persistence, shutdown, interrupt and output size
    PsConf1Conf2 = 0x03,

    /// PS smart persistence, active force mode, LED current and white channel shutdown
    PsConf3Ms = 0x04,

    /// PS low interrupt threshold
    PsThresholdLow = 0x06,

    /// PS high interrupt threshold
    PsThresholdHigh = 0x07,

    /// PS output data
    PsData = 0x08,

    /// ALS output data
    AlsData = 0x09,

    /// White channel output data
    WhiteData = 0x0A,

    /// Interrupt flags
    IntFlag = 0x0B,

    /// Device ID
    ID = 0x0C,
}

/// Byte count of a register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RegisterWidth {
    One = 1,
    Two = 2,
}

impl RegisterWidth {
    pub const fn bytes(self) -> usize {
        self as usize
    }

    pub const fn bits(self) -> u32 {
        self as u32 * 8
    }
}

/// Which physical byte of a multi-byte register holds the least significant bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// The first byte on the bus is the least significant one.
    #[default]
    LsbFirst,
    /// The first byte on the bus is the most significant one.
    MsbFirst,
}

impl ByteOrder {
    /// Reassembles the register bytes into one integer.
    pub(crate) fn assemble(self, bytes: &[u8]) -> u16 {
        let fold = |reg: u16, byte: &u8| (reg << 8) | *byte as u16;
        match self {
            ByteOrder::LsbFirst => bytes.iter().rev().fold(0, fold),
            ByteOrder::MsbFirst => bytes.iter().fold(0, fold),
        }
    }

    /// Splits `value` back into register bytes, the inverse of [`ByteOrder::assemble`].
    pub(crate) fn disassemble(self, mut value: u16, bytes: &mut [u8]) {
        let len = bytes.len();
        for i in 0..len {
            let index = match self {
                ByteOrder::LsbFirst => i,
                ByteOrder::MsbFirst => len - 1 - i,
            };
            bytes[index] = (value & 0xFF) as u8;
            value >>= 8;
        }
    }
}

/// Reads `buffer.len()` bytes starting at `register` in one write-then-read transaction.
pub(crate) fn read_register<I2C, E>(
    address: u8,
    register: Register,
    buffer: &mut [u8],
    i2c: &mut I2C,
) -> Result<(), E>
where
    I2C: WriteRead<Error = E>,
{
    i2c.write_read(address, &[register as u8], buffer)
        .map_err(VCNL4040Error::ReadI2CError)?;

    log::debug!("Read {:?}: {:?}", register, buffer);

    Ok(())
}

/// Writes `data` starting at `register` in one transaction.
pub(crate) fn write_register<I2C, E>(
    address: u8,
    register: Register,
    data: &[u8],
    i2c: &mut I2C,
) -> Result<(), E>
where
    I2C: Write<Error = E>,
{
    let mut write_data = [0u8; MAX_REGISTER_WIDTH + 1];
    let len = data.len().min(MAX_REGISTER_WIDTH);
    write_data[0] = register as u8;
    write_data[1..=len].copy_from_slice(&data[..len]);

    log::debug!("Write {:?}: {:?}", register, &data[..len]);

    i2c.write(address, &write_data[..=len])
        .map_err(VCNL4040Error::WriteI2CError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_first_assembly() {
        assert_eq!(ByteOrder::LsbFirst.assemble(&[0x86, 0x01]), 0x0186);
        assert_eq!(ByteOrder::LsbFirst.assemble(&[0x42]), 0x42);

        let mut bytes = [0u8; 2];
        ByteOrder::LsbFirst.disassemble(0x0186, &mut bytes);
        assert_eq!(bytes, [0x86, 0x01]);
    }

    #[test]
    fn test_msb_first_assembly() {
        assert_eq!(ByteOrder::MsbFirst.assemble(&[0x01, 0x86]), 0x0186);

        let mut bytes = [0u8; 2];
        ByteOrder::MsbFirst.disassemble(0x0186, &mut bytes);
        assert_eq!(bytes, [0x01, 0x86]);
    }

    #[test]
    fn test_register_width() {
        assert_eq!(RegisterWidth::One.bits(), 8);
        assert_eq!(RegisterWidth::Two.bytes(), 2);
    }
}
