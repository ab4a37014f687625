#![allow(dead_code)]

pub use lis3dh::{I2cTransport, Lis3dh, SlaveAddr};

use embedded_hal_mock as hal;
pub use hal::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV_ADDR: u8 = 0b001_1000;

pub type MockDev = Lis3dh<I2cTransport<I2cMock>>;

pub fn trans_who_am_i() -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![0x0F], vec![0b0011_0011])
}

pub fn trans_enable() -> I2cTrans {
    // write CTRL_REG1: ODR=200Hz, Zen, Yen, Xen
    I2cTrans::write(DEV_ADDR, vec![0x20, 0b0110_0111])
}

pub fn new_dev(mock: I2cMock) -> MockDev {
    Lis3dh::new(I2cTransport::new(mock), SlaveAddr::Default).unwrap()
}

pub fn done(dev: MockDev) {
    dev.destroy().destroy().done();
}
