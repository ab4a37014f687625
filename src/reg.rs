#![allow(non_upper_case_globals)]

/// I2C slave address
pub const I2C_SAD: u8 = 0b001_1000;

/// Register mapping
#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    WHO_AM_I = 0x0F,
    CTRL_REG1 = 0x20,
    OUT_X_L = 0x28,
    OUT_X_H = 0x29,
    OUT_Y_L = 0x2A,
    OUT_Y_H = 0x2B,
    OUT_Z_L = 0x2C,
    OUT_Z_H = 0x2D,
}

impl Register {
    /// Get register address
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// === WHO_AM_I (0Fh) ===

/// WHO_AM_I device identification register
pub const DEVICE_ID: u8 = 0b0011_0011;

// === CTRL_REG1 (20h) ===

/// ODR = 200 Hz
pub const ODR_200HZ: u8 = 0b0110_0000;

pub const Zen: u8 = 0b0000_0100;
pub const Yen: u8 = 0b0000_0010;
pub const Xen: u8 = 0b0000_0001;

/// Value written to CTRL_REG1 on start-up: 200 Hz, normal mode, X/Y/Z enabled
pub const CTRL_REG1_ENABLE: u8 = ODR_200HZ | Zen | Yen | Xen;
