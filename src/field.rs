//! Register field accessors
//!
//! Every logical setting of the sensor is described by one of three accessor kinds:
//! * [`Unary`] - a whole register holding one unsigned value
//! * [`Bit`] - a single bit anywhere inside a register
//! * [`Bits`] - a contiguous run of bits inside a register
//!
//! The accessors only describe the layout. Each `read` performs exactly one register read,
//! each `write` either one register write ([`Unary`]) or a read-modify-write of the whole
//! register ([`Bit`], [`Bits`]). The read-modify-write is not atomic: two fields living in the
//! same register must not be written concurrently from different contexts.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::register::{
    read_register, write_register, ByteOrder, Register, RegisterWidth, MAX_REGISTER_WIDTH,
};
use crate::{Result, VCNL4040Error};

/// A bit-field descriptor does not fit into its register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldTooWide;

/// Whether a register may be written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// A whole register interpreted as one unsigned integer.
///
/// A write replaces every byte of the register, so a `Unary` must only describe registers
/// without any other live field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unary {
    register: Register,
    width: RegisterWidth,
    order: ByteOrder,
    access: Access,
}

impl Unary {
    /// A read-write register.
    pub const fn new(register: Register, width: RegisterWidth, order: ByteOrder) -> Self {
        Self {
            register,
            width,
            order,
            access: Access::ReadWrite,
        }
    }

    /// A register the hardware only allows to be read.
    pub const fn read_only(register: Register, width: RegisterWidth, order: ByteOrder) -> Self {
        Self {
            register,
            width,
            order,
            access: Access::ReadOnly,
        }
    }

    pub const fn register(&self) -> Register {
        self.register
    }

    pub const fn access(&self) -> Access {
        self.access
    }

    /// Largest value the register can hold.
    pub const fn max_value(&self) -> u16 {
        (((1u32) << self.width.bits()) - 1) as u16
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> u16 {
        self.order.assemble(bytes)
    }

    pub(crate) fn encode<E>(&self, value: u16, bytes: &mut [u8]) -> Result<(), E> {
        if self.access == Access::ReadOnly {
            return Err(VCNL4040Error::ImmutableField);
        }
        if value > self.max_value() {
            return Err(VCNL4040Error::ValueOutOfRange);
        }
        self.order.disassemble(value, bytes);
        Ok(())
    }

    pub fn read<I2C, E>(&self, address: u8, i2c: &mut I2C) -> Result<u16, E>
    where
        I2C: WriteRead<Error = E>,
    {
        let mut buffer = [0u8; MAX_REGISTER_WIDTH];
        let buffer = &mut buffer[..self.width.bytes()];
        read_register(address, self.register, buffer, i2c)?;

        Ok(self.decode(buffer))
    }

    /// Writes `value`, failing with [`VCNL4040Error::ImmutableField`] on read-only registers
    /// before anything is sent on the bus.
    pub fn write<I2C, E>(&self, address: u8, value: u16, i2c: &mut I2C) -> Result<(), E>
    where
        I2C: Write<Error = E>,
    {
        let mut buffer = [0u8; MAX_REGISTER_WIDTH];
        let buffer = &mut buffer[..self.width.bytes()];
        self.encode::<E>(value, buffer)?;

        write_register(address, self.register, buffer, i2c)
    }
}

/// A single bit of a register. `bit` counts across the whole register, not within a byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bit {
    register: Register,
    width: RegisterWidth,
    byte: usize,
    mask: u8,
}

impl Bit {
    /// Panics if `bit` lies outside the register; in a `const` item this is a compile error.
    pub const fn new(register: Register, bit: u8, width: RegisterWidth, order: ByteOrder) -> Self {
        match Self::try_new(register, bit, width, order) {
            Ok(field) => field,
            Err(_) => panic!("bit outside of register"),
        }
    }

    pub const fn try_new(
        register: Register,
        bit: u8,
        width: RegisterWidth,
        order: ByteOrder,
    ) -> core::result::Result<Self, FieldTooWide> {
        if bit as u32 >= width.bits() {
            return Err(FieldTooWide);
        }

        let byte = match order {
            ByteOrder::LsbFirst => bit as usize / 8,
            ByteOrder::MsbFirst => width.bytes() - 1 - bit as usize / 8,
        };

        Ok(Self {
            register,
            width,
            byte,
            mask: 1 << (bit % 8),
        })
    }

    pub const fn register(&self) -> Register {
        self.register
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> bool {
        bytes[self.byte] & self.mask != 0
    }

    pub(crate) fn encode(&self, value: bool, bytes: &mut [u8]) {
        if value {
            bytes[self.byte] |= self.mask;
        } else {
            bytes[self.byte] &= !self.mask;
        }
    }

    pub fn read<I2C, E>(&self, address: u8, i2c: &mut I2C) -> Result<bool, E>
    where
        I2C: WriteRead<Error = E>,
    {
        let mut buffer = [0u8; MAX_REGISTER_WIDTH];
        let buffer = &mut buffer[..self.width.bytes()];
        read_register(address, self.register, buffer, i2c)?;

        Ok(self.decode(buffer))
    }

    /// Sets or clears the bit, leaving every other bit of the register as read.
    pub fn write<I2C, E>(&self, address: u8, value: bool, i2c: &mut I2C) -> Result<(), E>
    where
        I2C: WriteRead<Error = E> + Write<Error = E>,
    {
        let mut buffer = [0u8; MAX_REGISTER_WIDTH];
        let buffer = &mut buffer[..self.width.bytes()];
        read_register(address, self.register, buffer, i2c)?;

        self.encode(value, buffer);

        write_register(address, self.register, buffer, i2c)
    }
}

/// A contiguous run of `num_bits` bits starting at `lowest_bit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bits {
    register: Register,
    width: RegisterWidth,
    order: ByteOrder,
    lowest_bit: u8,
    mask: u16,
}

impl Bits {
    /// Panics if the field does not fit the register; in a `const` item this is a compile error.
    pub const fn new(
        num_bits: u8,
        register: Register,
        lowest_bit: u8,
        width: RegisterWidth,
        order: ByteOrder,
    ) -> Self {
        match Self::try_new(num_bits, register, lowest_bit, width, order) {
            Ok(field) => field,
            Err(_) => panic!("field wider than register"),
        }
    }

    pub const fn try_new(
        num_bits: u8,
        register: Register,
        lowest_bit: u8,
        width: RegisterWidth,
        order: ByteOrder,
    ) -> core::result::Result<Self, FieldTooWide> {
        if num_bits == 0 || num_bits as u32 + lowest_bit as u32 > width.bits() {
            return Err(FieldTooWide);
        }

        let mask = ((1u32 << num_bits) - 1) << lowest_bit;

        Ok(Self {
            register,
            width,
            order,
            lowest_bit,
            mask: mask as u16,
        })
    }

    pub const fn register(&self) -> Register {
        self.register
    }

    /// Largest value the field can hold.
    pub const fn max_value(&self) -> u16 {
        self.mask >> self.lowest_bit
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> u16 {
        (self.order.assemble(bytes) & self.mask) >> self.lowest_bit
    }

    pub(crate) fn encode<E>(&self, value: u16, bytes: &mut [u8]) -> Result<(), E> {
        if value > self.max_value() {
            return Err(VCNL4040Error::ValueOutOfRange);
        }

        let mut reg = self.order.assemble(bytes);
        reg &= !self.mask;
        reg |= value << self.lowest_bit;
        self.order.disassemble(reg, bytes);

        Ok(())
    }

    pub fn read<I2C, E>(&self, address: u8, i2c: &mut I2C) -> Result<u16, E>
    where
        I2C: WriteRead<Error = E>,
    {
        let mut buffer = [0u8; MAX_REGISTER_WIDTH];
        let buffer = &mut buffer[..self.width.bytes()];
        read_register(address, self.register, buffer, i2c)?;

        Ok(self.decode(buffer))
    }

    /// Replaces the field with `value`, leaving the rest of the register as read.
    ///
    /// Values above [`Bits::max_value`] are rejected before the register is read.
    pub fn write<I2C, E>(&self, address: u8, value: u16, i2c: &mut I2C) -> Result<(), E>
    where
        I2C: WriteRead<Error = E> + Write<Error = E>,
    {
        if value > self.max_value() {
            return Err(VCNL4040Error::ValueOutOfRange);
        }

        let mut buffer = [0u8; MAX_REGISTER_WIDTH];
        let buffer = &mut buffer[..self.width.bytes()];
        read_register(address, self.register, buffer, i2c)?;

        self.encode::<E>(value, buffer)?;

        write_register(address, self.register, buffer, i2c)
    }
}

/// One entry of the register map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Accessor {
    Unary(Unary),
    Bit(Bit),
    Bits(Bits),
}

impl Accessor {
    pub const fn register(&self) -> Register {
        match self {
            Accessor::Unary(field) => field.register(),
            Accessor::Bit(field) => field.register(),
            Accessor::Bits(field) => field.register(),
        }
    }

    pub const fn is_writable(&self) -> bool {
        match self {
            Accessor::Unary(field) => matches!(field.access(), Access::ReadWrite),
            _ => true,
        }
    }

    /// Reads the field; single bits read as `0` or `1`.
    pub fn read<I2C, E>(&self, address: u8, i2c: &mut I2C) -> Result<u16, E>
    where
        I2C: WriteRead<Error = E>,
    {
        match self {
            Accessor::Unary(field) => field.read(address, i2c),
            Accessor::Bit(field) => field.read(address, i2c).map(u16::from),
            Accessor::Bits(field) => field.read(address, i2c),
        }
    }

    /// Writes the field; single bits only accept `0` or `1`.
    pub fn write<I2C, E>(&self, address: u8, value: u16, i2c: &mut I2C) -> Result<(), E>
    where
        I2C: WriteRead<Error = E> + Write<Error = E>,
    {
        match self {
            Accessor::Unary(field) => field.write(address, value, i2c),
            Accessor::Bit(field) => match value {
                0 => field.write(address, false, i2c),
                1 => field.write(address, true, i2c),
                _ => Err(VCNL4040Error::ValueOutOfRange),
            },
            Accessor::Bits(field) => field.write(address, value, i2c),
        }
    }
}

impl<E> From<FieldTooWide> for VCNL4040Error<E> {
    fn from(_: FieldTooWide) -> Self {
        VCNL4040Error::FieldTooWide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::i2c::Mock as I2cMock;
    use embedded_hal_mock::i2c::Transaction as I2cTransaction;
    use embedded_hal_mock::MockError;

    const ADDR: u8 = 0x60;

    const REG: Register = Register::PsConf1Conf2;

    #[test]
    fn test_unary_read_write() {
        let field = Unary::new(Register::PsThresholdLow, RegisterWidth::Two, ByteOrder::LsbFirst);

        let expectations = [
            I2cTransaction::write_read(ADDR, [0x06].to_vec(), [0x34, 0x12].to_vec()),
            I2cTransaction::write(ADDR, [0x06, 0x34, 0x12].to_vec()),
        ];
        let mut i2c_mock = I2cMock::new(&expectations);

        // Writing back what was read leaves the register unchanged
        let value = field.read(ADDR, &mut i2c_mock).unwrap();
        assert_eq!(value, 0x1234);
        field.write(ADDR, value, &mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_unary_msb_first() {
        let field = Unary::new(Register::PsThresholdLow, RegisterWidth::Two, ByteOrder::MsbFirst);

        let expectations = [
            I2cTransaction::write_read(ADDR, [0x06].to_vec(), [0x12, 0x34].to_vec()),
            I2cTransaction::write(ADDR, [0x06, 0xAB, 0xCD].to_vec()),
        ];
        let mut i2c_mock = I2cMock::new(&expectations);

        assert_eq!(field.read(ADDR, &mut i2c_mock).unwrap(), 0x1234);
        field.write(ADDR, 0xABCD, &mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_unary_single_byte_range() {
        let field = Unary::new(Register::AlsConf, RegisterWidth::One, ByteOrder::LsbFirst);
        let expectations: [I2cTransaction; 0] = [];
        let mut i2c_mock = I2cMock::new(&expectations);

        let result = field.write(ADDR, 0x100, &mut i2c_mock);
        assert!(matches!(result, Err(VCNL4040Error::ValueOutOfRange)));

        i2c_mock.done();
    }

    #[test]
    fn test_read_only_unary_rejects_write() {
        let field = Unary::read_only(Register::PsData, RegisterWidth::Two, ByteOrder::LsbFirst);

        // No transaction may reach the bus
        let expectations: [I2cTransaction; 0] = [];
        let mut i2c_mock = I2cMock::new(&expectations);

        let result = field.write(ADDR, 0x0001, &mut i2c_mock);
        assert!(matches!(result, Err(VCNL4040Error::ImmutableField)));

        i2c_mock.done();
    }

    #[test]
    fn test_bit_set_then_clear_restores_register() {
        let field = Bit::new(REG, 11, RegisterWidth::Two, ByteOrder::LsbFirst);

        let expectations = [
            I2cTransaction::write_read(ADDR, [0x03].to_vec(), [0xA5, 0x30].to_vec()),
            I2cTransaction::write(ADDR, [0x03, 0xA5, 0x38].to_vec()),
            I2cTransaction::write_read(ADDR, [0x03].to_vec(), [0xA5, 0x38].to_vec()),
            I2cTransaction::write(ADDR, [0x03, 0xA5, 0x30].to_vec()),
        ];
        let mut i2c_mock = I2cMock::new(&expectations);

        field.write(ADDR, true, &mut i2c_mock).unwrap();
        field.write(ADDR, false, &mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_bit_read() {
        let low = Bit::new(REG, 0, RegisterWidth::Two, ByteOrder::LsbFirst);
        let high = Bit::new(Register::PsConf3Ms, 15, RegisterWidth::Two, ByteOrder::LsbFirst);

        let expectations = [
            I2cTransaction::write_read(ADDR, [0x03].to_vec(), [0x01, 0x00].to_vec()),
            I2cTransaction::write_read(ADDR, [0x04].to_vec(), [0xFF, 0x7F].to_vec()),
        ];
        let mut i2c_mock = I2cMock::new(&expectations);

        assert!(low.read(ADDR, &mut i2c_mock).unwrap());
        assert!(!high.read(ADDR, &mut i2c_mock).unwrap());

        i2c_mock.done();
    }

    #[test]
    fn test_bit_msb_first_byte_selection() {
        let field = Bit::new(REG, 15, RegisterWidth::Two, ByteOrder::MsbFirst);

        let expectations = [
            I2cTransaction::write_read(ADDR, [0x03].to_vec(), [0x00, 0x00].to_vec()),
            I2cTransaction::write(ADDR, [0x03, 0x80, 0x00].to_vec()),
        ];
        let mut i2c_mock = I2cMock::new(&expectations);

        field.write(ADDR, true, &mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_bits_round_trip_all_values() {
        let field = Bits::new(3, REG, 1, RegisterWidth::Two, ByteOrder::LsbFirst);
        let original = [0xF1u8, 0xFF];

        for value in 0..=field.max_value() {
            let mut bytes = original;
            field.encode::<MockError>(value, &mut bytes).unwrap();
            assert_eq!(field.decode(&bytes), value);
            // Neighbouring bits are untouched
            assert_eq!(bytes[0] & !0x0E, original[0] & !0x0E);
            assert_eq!(bytes[1], original[1]);
        }
    }

    #[test]
    fn test_bits_write_across_bytes() {
        let field = Bits::new(4, REG, 6, RegisterWidth::Two, ByteOrder::LsbFirst);

        let expectations = [
            I2cTransaction::write_read(ADDR, [0x03].to_vec(), [0x00, 0xF0].to_vec()),
            I2cTransaction::write(ADDR, [0x03, 0xC0, 0xF3].to_vec()),
        ];
        let mut i2c_mock = I2cMock::new(&expectations);

        field.write(ADDR, 0x0F, &mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_bits_read() {
        let field = Bits::new(2, Register::AlsConf, 6, RegisterWidth::Two, ByteOrder::LsbFirst);

        let expectations = [I2cTransaction::write_read(
            ADDR,
            [0x00].to_vec(),
            [0xC1, 0x00].to_vec(),
        )];
        let mut i2c_mock = I2cMock::new(&expectations);

        assert_eq!(field.read(ADDR, &mut i2c_mock).unwrap(), 3);

        i2c_mock.done();
    }

    #[test]
    fn test_bits_value_out_of_range() {
        let field = Bits::new(2, REG, 6, RegisterWidth::Two, ByteOrder::LsbFirst);
        let expectations: [I2cTransaction; 0] = [];
        let mut i2c_mock = I2cMock::new(&expectations);

        let result = field.write(ADDR, 4, &mut i2c_mock);
        assert!(matches!(result, Err(VCNL4040Error::ValueOutOfRange)));

        i2c_mock.done();
    }

    #[test]
    fn test_field_too_wide() {
        assert_eq!(
            Bits::try_new(3, REG, 14, RegisterWidth::Two, ByteOrder::LsbFirst),
            Err(FieldTooWide)
        );
        assert_eq!(
            Bits::try_new(9, REG, 0, RegisterWidth::One, ByteOrder::LsbFirst),
            Err(FieldTooWide)
        );
        assert_eq!(
            Bit::try_new(REG, 8, RegisterWidth::One, ByteOrder::LsbFirst),
            Err(FieldTooWide)
        );
        assert!(Bits::try_new(16, REG, 0, RegisterWidth::Two, ByteOrder::LsbFirst).is_ok());

        let error: VCNL4040Error<MockError> = FieldTooWide.into();
        assert!(matches!(error, VCNL4040Error::FieldTooWide));
    }

    #[test]
    #[should_panic(expected = "field wider than register")]
    fn test_field_too_wide_panics() {
        let num_bits = 4;
        Bits::new(num_bits, REG, 13, RegisterWidth::Two, ByteOrder::LsbFirst);
    }

    #[test]
    fn test_read_error() {
        let field = Bits::new(2, REG, 6, RegisterWidth::Two, ByteOrder::LsbFirst);

        let expectations = [I2cTransaction::write_read(
            ADDR,
            [0x03].to_vec(),
            [0x00, 0x00].to_vec(),
        )
        .with_error(MockError::Io(std::io::ErrorKind::Other))];
        let mut i2c_mock = I2cMock::new(&expectations);

        let result = field.write(ADDR, 1, &mut i2c_mock);
        assert!(matches!(result, Err(VCNL4040Error::ReadI2CError(_))));

        i2c_mock.done();
    }
}
