/// Command opcodes understood by the MOD-RGB firmware.
pub mod opcode {
    pub const GET_ID: u8 = 0x20;
    pub const START_PWM: u8 = 0x01;
    pub const STOP_PWM: u8 = 0x02;
    /// Followed by a 3-byte block: red, green, blue.
    pub const SET_RGB: u8 = 0x03;
    /// Followed by the new 7-bit address. Only honoured while DMX_EN is closed.
    pub const SET_ADDRESS: u8 = 0xF0;
}

/// Value returned by [`opcode::GET_ID`] on a MOD-RGB board.
pub const MOD_RGB_ID: u8 = 0x64;

/// Exclusive upper bound of the 7-bit address space.
pub const ADDRESS_LIMIT: i64 = 128;

/// Exclusive upper bound of a color channel value.
pub const CHANNEL_LIMIT: i64 = 256;
