use std::io;

use thiserror::Error;

use crate::address::{Address, Channel};
use crate::protocol::MOD_RGB_ID;
use crate::reserved::Reservation;

#[derive(Debug, Error)]
pub enum Error {
    #[error("address {address} out of range 0-127 (0x00-0x7f)")]
    AddressRange { address: i64 },

    #[error("{channel} value {value} out of range 0-255")]
    ChannelRange { channel: Channel, value: i64 },

    #[error("address {address} is reserved: {reservation}")]
    AddressReserved {
        address: Address,
        reservation: Reservation,
    },

    #[error("device at address {address} has unexpected identity 0x{identity:02x}, not 0x{expected:02x}", expected = MOD_RGB_ID)]
    Compatibility { address: Address, identity: u8 },

    #[error("I/O error on address {address}: {source}")]
    Io {
        address: Address,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
