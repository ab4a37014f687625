//! Read one sample from a LIS3DH on `/dev/i2c-1`, or from the stub bus when
//! no I²C device is available, and print it as `(x, y, z)`.

use std::process::ExitCode;

use lis3dh::{BusOp, Lis3dh, SlaveAddr, StubTransport, Traced, Transport};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// I²C character device the sensor sits on
const I2C_BUS_PATH: &str = "/dev/i2c-1";

/// State of the `SA0` address-select strap
const SA0: bool = true;

#[cfg(target_os = "linux")]
mod linux {
    use i2cdev::core::I2CDevice;
    use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
    use lis3dh::Transport;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum BusError {
        #[error("I2C communication failed: {0}")]
        I2c(#[from] LinuxI2CError),

        #[error("short block read at {offset:#04x}: expected {expected} bytes, got {actual}")]
        ShortRead {
            offset: u8,
            expected: usize,
            actual: usize,
        },
    }

    /// SMBus register access on a Linux I²C character device
    pub struct LinuxBus {
        device: LinuxI2CDevice,
    }

    impl LinuxBus {
        pub fn new(path: &str, address: u8) -> Result<Self, BusError> {
            let device = LinuxI2CDevice::new(path, address as u16)?;
            Ok(Self { device })
        }
    }

    /// Copy a block read result into `buf`, rejecting partial transfers
    pub(crate) fn fill_exact(offset: u8, data: &[u8], buf: &mut [u8]) -> Result<(), BusError> {
        if data.len() != buf.len() {
            return Err(BusError::ShortRead {
                offset,
                expected: buf.len(),
                actual: data.len(),
            });
        }
        buf.copy_from_slice(data);
        Ok(())
    }

    impl Transport for LinuxBus {
        type Error = BusError;

        fn read_byte(&mut self, addr: u8, offset: u8) -> Result<u8, BusError> {
            self.device.set_slave_address(addr as u16)?;
            Ok(self.device.smbus_read_byte_data(offset)?)
        }

        fn read_block(&mut self, addr: u8, offset: u8, buf: &mut [u8]) -> Result<(), BusError> {
            self.device.set_slave_address(addr as u16)?;
            let data = self
                .device
                .smbus_read_i2c_block_data(offset, buf.len() as u8)?;
            fill_exact(offset, &data, buf)
        }

        fn write_byte(&mut self, addr: u8, offset: u8, val: u8) -> Result<(), BusError> {
            self.device.set_slave_address(addr as u16)?;
            Ok(self.device.smbus_write_byte_data(offset, val)?)
        }
    }
}

fn trace_bus(op: &BusOp<'_>) {
    info!("[bus] {}", op);
}

fn read_once<T: Transport>(bus: T) -> ExitCode {
    let bus = Traced::new(bus, trace_bus);
    let mut dev = match Lis3dh::new(bus, SlaveAddr::Alternative(SA0)) {
        Ok(dev) => dev,
        Err(e) => {
            error!("[lis3dh] initialization failed: {:?}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("[lis3dh] ready at {:#04x}", dev.address());

    match dev.read_accel() {
        Ok(acc) => {
            println!("({}, {}, {})", acc.x, acc.y, acc.z);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("[lis3dh] read failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    // RUST_LOG=warn silences the bus trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let addr = SlaveAddr::Alternative(SA0).addr();

    #[cfg(target_os = "linux")]
    {
        match linux::LinuxBus::new(I2C_BUS_PATH, addr) {
            Ok(bus) => {
                info!("[i2c] using {}", I2C_BUS_PATH);
                return read_once(bus);
            }
            Err(e) => warn!("[i2c] {} unavailable ({}), using stub bus", I2C_BUS_PATH, e),
        }
    }

    #[cfg(not(target_os = "linux"))]
    warn!(
        "[i2c] {} (address {:#04x}) not supported on this platform, using stub bus",
        I2C_BUS_PATH, addr
    );

    read_once(StubTransport)
}
