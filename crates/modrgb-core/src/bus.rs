//! Raw SMBus transactions consumed by the controller.

use std::io;

/// Byte-level access to an I2C/SMBus adapter.
///
/// Addresses handed to a `Bus` have already been validated. Every call is a
/// single transaction that either completes or fails; implementations must
/// not retry.
pub trait Bus {
    /// SMBus "send byte".
    fn write_command(&mut self, address: u8, opcode: u8) -> io::Result<()>;

    /// I2C block write of `data` after `opcode`.
    fn write_block(&mut self, address: u8, opcode: u8, data: &[u8]) -> io::Result<()>;

    /// SMBus "write byte data".
    fn write_register(&mut self, address: u8, opcode: u8, value: u8) -> io::Result<()>;

    /// SMBus "read byte data".
    fn read_register(&mut self, address: u8, opcode: u8) -> io::Result<u8>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn write_command(&mut self, address: u8, opcode: u8) -> io::Result<()> {
        (**self).write_command(address, opcode)
    }

    fn write_block(&mut self, address: u8, opcode: u8, data: &[u8]) -> io::Result<()> {
        (**self).write_block(address, opcode, data)
    }

    fn write_register(&mut self, address: u8, opcode: u8, value: u8) -> io::Result<()> {
        (**self).write_register(address, opcode, value)
    }

    fn read_register(&mut self, address: u8, opcode: u8) -> io::Result<u8> {
        (**self).read_register(address, opcode)
    }
}
