//! Register-level bus access.
//!
//! The driver talks to the device only through [`Transport`], so the bus can
//! be a real [embedded-hal] I²C peripheral, the fixed-value [`StubTransport`]
//! used when no bus is present, or any of those wrapped in [`Traced`].
//!
//! [embedded-hal]: https://docs.rs/embedded-hal

use core::convert::Infallible;
use core::fmt::{self, Debug};

use embedded_hal::i2c::I2c;

/// Byte and block access to a register-addressed peripheral
pub trait Transport {
    /// Error reported by the underlying bus
    type Error: Debug;

    /// Read a single register at `offset`
    fn read_byte(&mut self, addr: u8, offset: u8) -> Result<u8, Self::Error>;

    /// Fill `buf` from consecutive registers starting at `offset`
    fn read_block(&mut self, addr: u8, offset: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write a single register at `offset`
    fn write_byte(&mut self, addr: u8, offset: u8, val: u8) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self, addr: u8, offset: u8) -> Result<u8, Self::Error> {
        T::read_byte(self, addr, offset)
    }

    fn read_block(&mut self, addr: u8, offset: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read_block(self, addr, offset, buf)
    }

    fn write_byte(&mut self, addr: u8, offset: u8, val: u8) -> Result<(), Self::Error> {
        T::write_byte(self, addr, offset, val)
    }
}

/// Transport over an `embedded-hal` I²C bus
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C> I2cTransport<I2C> {
    /// Wrap the given `I2C` peripheral
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Return the `I2C` bus instance
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = I2C::Error;

    #[inline]
    fn read_byte(&mut self, addr: u8, offset: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(addr, &[offset], &mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_block(&mut self, addr: u8, offset: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(addr, &[offset], buf)
    }

    #[inline]
    fn write_byte(&mut self, addr: u8, offset: u8, val: u8) -> Result<(), Self::Error> {
        self.i2c.write(addr, &[offset, val])
    }
}

/// Value returned by [`StubTransport::read_byte`], which also satisfies the
/// identity check
pub const STUB_BYTE: u8 = 0x33;

/// Value filling every buffer returned by [`StubTransport::read_block`]
pub const STUB_BLOCK_BYTE: u8 = 0x01;

/// Stand-in bus used when no physical bus is available.
///
/// Reads return fixed values regardless of address and offset, writes are
/// discarded, and nothing ever fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubTransport;

impl Transport for StubTransport {
    type Error = Infallible;

    fn read_byte(&mut self, _addr: u8, _offset: u8) -> Result<u8, Self::Error> {
        Ok(STUB_BYTE)
    }

    fn read_block(&mut self, _addr: u8, _offset: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        buf.fill(STUB_BLOCK_BYTE);
        Ok(())
    }

    fn write_byte(&mut self, _addr: u8, _offset: u8, _val: u8) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Bus operation reported to a trace callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp<'a> {
    /// Single register read
    ReadByte {
        /// Slave address
        addr: u8,
        /// Register offset
        offset: u8,
        /// Value read
        value: u8,
    },
    /// Consecutive register read
    ReadBlock {
        /// Slave address
        addr: u8,
        /// Register offset of the first byte
        offset: u8,
        /// Bytes read, one per register
        data: &'a [u8],
    },
    /// Single register write
    WriteByte {
        /// Slave address
        addr: u8,
        /// Register offset
        offset: u8,
        /// Value written
        value: u8,
    },
}

impl fmt::Display for BusOp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BusOp::ReadByte {
                addr,
                offset,
                value,
            } => write!(f, "read({:#04x}, {:#04x}) => {:#04x}", addr, offset, value),
            BusOp::ReadBlock { addr, offset, data } => {
                write!(f, "read({:#04x}, {:#04x}, {}) =>", addr, offset, data.len())?;
                for b in data {
                    write!(f, " {:#04x}", b)?;
                }
                Ok(())
            }
            BusOp::WriteByte {
                addr,
                offset,
                value,
            } => write!(f, "write({:#04x}, {:#04x}, {:#04x})", addr, offset, value),
        }
    }
}

/// Transport wrapper handing every bus operation to a callback.
///
/// The callback only observes: values and errors pass through untouched.
/// Writes are reported before they are issued, so a failed write still shows
/// up; reads are reported once their data is in, so a failed read does not.
pub struct Traced<T, F> {
    inner: T,
    trace: F,
}

impl<T, F> Traced<T, F>
where
    T: Transport,
    F: FnMut(&BusOp<'_>),
{
    /// Wrap `inner`, reporting operations to `trace`
    pub fn new(inner: T, trace: F) -> Self {
        Self { inner, trace }
    }

    /// Return the wrapped transport
    pub fn destroy(self) -> T {
        self.inner
    }
}

impl<T, F> Transport for Traced<T, F>
where
    T: Transport,
    F: FnMut(&BusOp<'_>),
{
    type Error = T::Error;

    fn read_byte(&mut self, addr: u8, offset: u8) -> Result<u8, Self::Error> {
        let value = self.inner.read_byte(addr, offset)?;
        (self.trace)(&BusOp::ReadByte {
            addr,
            offset,
            value,
        });
        Ok(value)
    }

    fn read_block(&mut self, addr: u8, offset: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read_block(addr, offset, buf)?;
        (self.trace)(&BusOp::ReadBlock {
            addr,
            offset,
            data: &*buf,
        });
        Ok(())
    }

    fn write_byte(&mut self, addr: u8, offset: u8, val: u8) -> Result<(), Self::Error> {
        (self.trace)(&BusOp::WriteByte {
            addr,
            offset,
            value: val,
        });
        self.inner.write_byte(addr, offset, val)
    }
}
