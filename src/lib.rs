//! Platform-agnostic LIS3DH accelerometer driver which talks to the device
//! through a small register [`Transport`] and implements the
//! [`RawAccelerometer` trait][trait] from the `accelerometer` crate.
//!
//! Any [embedded-hal] I²C bus can be used via [`I2cTransport`]; the
//! [`StubTransport`] stands in when no bus is present, and [`Traced`] reports
//! every bus operation to a callback.
//!
//! ```
//! use lis3dh::{Lis3dh, SlaveAddr, StubTransport};
//!
//! let mut dev = Lis3dh::new(StubTransport, SlaveAddr::Alternative(true)).unwrap();
//! let sample = dev.read_accel().unwrap();
//! assert_eq!((sample.x, sample.y, sample.z), (257, 257, 257));
//! ```
//!
//! [embedded-hal]: https://docs.rs/embedded-hal
//! [trait]: https://docs.rs/accelerometer/latest/accelerometer/trait.RawAccelerometer.html
//!

#![deny(missing_docs)]
#![deny(warnings)]
#![no_std]
#![forbid(unsafe_code)]

mod reg;
pub mod transport;

pub use accelerometer::vector::I16x3;
pub use accelerometer::{Error, ErrorKind, RawAccelerometer};
use cast::u16;

use crate::reg::*;
pub use crate::transport::{BusOp, I2cTransport, StubTransport, Traced, Transport};

/// Possible slave addresses
pub enum SlaveAddr {
    /// Default slave address
    Default,
    /// Alternative slave address providing bit value for `SA0`
    Alternative(bool),
}

impl SlaveAddr {
    /// 7-bit bus address selected by the `SA0` strap
    pub fn addr(self) -> u8 {
        match self {
            SlaveAddr::Default => I2C_SAD,
            SlaveAddr::Alternative(sa0) => I2C_SAD | sa0 as u8,
        }
    }
}

/// Decode one little-endian two's-complement output register pair
#[inline]
pub fn decode_s16(lo: u8, hi: u8) -> i16 {
    (u16(lo) | (u16(hi) << 8)) as i16
}

/// `LIS3DH` driver
pub struct Lis3dh<T> {
    /// The register transport
    bus: T,
    /// The I²C device slave address
    addr: u8,
}

impl<T, E> Lis3dh<T>
where
    T: Transport<Error = E>,
    E: core::fmt::Debug,
{
    /// Create a new `LIS3DH` driver on the given transport.
    ///
    /// Checks `WHO_AM_I`, then enables X/Y/Z at 200 Hz through `CTRL_REG1`.
    /// A device reporting the wrong identity yields [`ErrorKind::Device`]
    /// and is left unconfigured.
    pub fn new(bus: T, addr: SlaveAddr) -> Result<Self, Error<E>> {
        let mut dev = Self {
            bus,
            addr: addr.addr(),
        };

        // Ensure we have the correct device ID
        if dev.get_device_id()? != DEVICE_ID {
            ErrorKind::Device.err()?;
        }

        dev.write_reg(Register::CTRL_REG1, CTRL_REG1_ENABLE)?;

        Ok(dev)
    }

    /// Destroy driver instance, return the transport
    pub fn destroy(self) -> T {
        self.bus
    }

    /// The 7-bit slave address this driver talks to
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// `WHO_AM_I` register
    pub fn get_device_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(Register::WHO_AM_I).map_err(Into::into)
    }

    /// Raw acceleration,
    /// `OUT_X_L` .. `OUT_Z_H` decoded as (x, y, z)
    pub fn read_accel(&mut self) -> Result<I16x3, Error<E>> {
        let mut buf = [0u8; 6];
        self.read_regs(Register::OUT_X_L, &mut buf)?;

        Ok(I16x3::new(
            decode_s16(buf[0], buf[1]),
            decode_s16(buf[2], buf[3]),
            decode_s16(buf[4], buf[5]),
        ))
    }

    #[inline]
    fn read_reg(&mut self, reg: Register) -> Result<u8, E> {
        self.bus.read_byte(self.addr, reg.addr())
    }

    #[inline]
    fn read_regs(&mut self, reg: Register, buffer: &mut [u8]) -> Result<(), E> {
        self.bus.read_block(self.addr, reg.addr(), buffer)
    }

    #[inline]
    fn write_reg(&mut self, reg: Register, val: u8) -> Result<(), E> {
        self.bus.write_byte(self.addr, reg.addr(), val)
    }
}

impl<T, E> RawAccelerometer<I16x3> for Lis3dh<T>
where
    T: Transport<Error = E>,
    E: core::fmt::Debug,
{
    type Error = E;

    /// Get acceleration reading from the accelerometer
    fn accel_raw(&mut self) -> Result<I16x3, Error<E>> {
        self.read_accel()
    }
}
