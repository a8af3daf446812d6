use std::fmt;

use crate::error::{Error, Result};
use crate::protocol::{ADDRESS_LIMIT, CHANNEL_LIMIT};
use crate::reserved::{self, Reservation};

/// A validated 7-bit bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u8);

impl Address {
    pub const MIN: Address = Address(0);
    pub const MAX: Address = Address((ADDRESS_LIMIT - 1) as u8);

    pub fn new(value: impl Into<i64>) -> Result<Self> {
        let value = value.into();
        if (0..ADDRESS_LIMIT).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::AddressRange { address: value })
        }
    }

    /// Every address in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Address> {
        (0..ADDRESS_LIMIT as u8).map(Address)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn i2c_reservation(self) -> Option<Reservation> {
        reserved::classify_i2c(self.0)
    }

    pub fn smbus_reservation(self) -> Option<Reservation> {
        reserved::classify_smbus(self.0)
    }

    /// Reservation under either specification, I2C first.
    pub fn reservation(self) -> Option<Reservation> {
        self.i2c_reservation().or_else(|| self.smbus_reservation())
    }

    pub fn is_reserved(self) -> bool {
        self.reservation().is_some()
    }
}

impl TryFrom<u8> for Address {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Address {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Address> for u8 {
    fn from(address: Address) -> u8 {
        address.0
    }
}

impl From<Address> for i64 {
    fn from(address: Address) -> i64 {
        i64::from(address.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02x})", self.0, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }

    /// Checks that `value` fits in one channel byte.
    pub fn check(self, value: impl Into<i64>) -> Result<u8> {
        let value = value.into();
        if (0..CHANNEL_LIMIT).contains(&value) {
            Ok(value as u8)
        } else {
            Err(Error::ChannelRange { channel: self, value })
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
