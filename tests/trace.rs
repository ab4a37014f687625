mod common;

use common::*;
use embedded_hal::i2c::ErrorKind as BusErrorKind;
use lis3dh::{BusOp, StubTransport, Traced, Transport};

fn record(log: &mut Vec<String>) -> impl FnMut(&BusOp<'_>) + '_ {
    move |op: &BusOp<'_>| log.push(op.to_string())
}

#[test]
fn trace_stub_session() {
    let mut log = Vec::new();
    {
        let bus = Traced::new(StubTransport, record(&mut log));
        let mut dev = Lis3dh::new(bus, SlaveAddr::Alternative(true)).unwrap();
        dev.read_accel().unwrap();
    }
    assert_eq!(
        log,
        [
            "read(0x19, 0x0f) => 0x33",
            "write(0x19, 0x20, 0x67)",
            "read(0x19, 0x28, 6) => 0x01 0x01 0x01 0x01 0x01 0x01",
        ]
    );
}

#[test]
fn trace_ops() {
    let mut ops = Vec::new();
    let mut bus = Traced::new(StubTransport, |op: &BusOp<'_>| match *op {
        BusOp::ReadBlock { addr, offset, data } => ops.push((addr, offset, data.len())),
        BusOp::ReadByte { addr, offset, .. } | BusOp::WriteByte { addr, offset, .. } => {
            ops.push((addr, offset, 1))
        }
    });
    let mut buf = [0u8; 3];
    bus.read_block(0x18, 0x28, &mut buf).unwrap();
    bus.write_byte(0x18, 0x20, 0x00).unwrap();
    drop(bus);
    assert_eq!(ops, [(0x18, 0x28, 3), (0x18, 0x20, 1)]);
}

#[test]
fn trace_passes_values_through() {
    let trans = [
        trans_who_am_i(),
        trans_enable(),
        I2cTrans::write_read(DEV_ADDR, vec![0x28], vec![0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F]),
    ];
    let mut count = 0;
    let bus = Traced::new(I2cTransport::new(I2cMock::new(&trans)), |_: &BusOp<'_>| {
        count += 1
    });
    let mut dev = Lis3dh::new(bus, SlaveAddr::Default).unwrap();
    let acc = dev.read_accel().unwrap();
    assert_eq!((acc.x, acc.y, acc.z), (-1, -32768, 32767));
    dev.destroy().destroy().destroy().done();
    assert_eq!(count, 3);
}

#[test]
fn trace_skips_failed_ops() {
    let trans = [trans_who_am_i().with_error(BusErrorKind::Other)];
    let mut log = Vec::new();
    let mut bus = Traced::new(I2cTransport::new(I2cMock::new(&trans)), record(&mut log));
    let err = bus.read_byte(DEV_ADDR, 0x0F).unwrap_err();
    assert_eq!(err, BusErrorKind::Other);
    bus.destroy().destroy().done();
    assert!(log.is_empty());
}

#[test]
fn trace_reports_failed_write() {
    let trans = [I2cTrans::write(DEV_ADDR, vec![0x20, 0x67]).with_error(BusErrorKind::Other)];
    let mut log = Vec::new();
    let mut bus = Traced::new(I2cTransport::new(I2cMock::new(&trans)), record(&mut log));
    let err = bus.write_byte(DEV_ADDR, 0x20, 0x67).unwrap_err();
    assert_eq!(err, BusErrorKind::Other);
    bus.destroy().destroy().done();
    assert_eq!(log, ["write(0x18, 0x20, 0x67)"]);
}
