//! Reserved addresses of the I2C and SMBus specifications.
//!
//! Assigning one of these to a MOD-RGB board can collide with a standard bus
//! role, so reprogramming refuses them.

use std::fmt;

use crate::address::Address;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specification {
    I2c,
    Smbus,
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specification::I2c => f.write_str("I2C"),
            Specification::Smbus => f.write_str("SMBus"),
        }
    }
}

/// Why an address is unavailable for general device addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub spec: Specification,
    pub reason: &'static str,
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reason, self.spec)
    }
}

const GROUP_MASK: u8 = 0b111_1100;

pub(crate) fn classify_i2c(address: u8) -> Option<Reservation> {
    let reason = match address {
        0b000_0000 => "General Call Address/START byte",
        0b000_0001 => "CBUS address",
        0b000_0010 => "Address reserved for different bus format",
        0b000_0011 => "Reserved for future use",
        _ => match address & GROUP_MASK {
            0b000_0100 => "Reserved for future use",
            0b111_1000 => "10-bit slave addressing",
            0b111_1100 => "Reserved for future use",
            _ => return None,
        },
    };
    Some(Reservation {
        spec: Specification::I2c,
        reason,
    })
}

pub(crate) fn classify_smbus(address: u8) -> Option<Reservation> {
    let reason = match address {
        0b000_1000 => "SMBus Host",
        0b000_1100 => "SMBus Alert Response Address",
        0b110_0001 => "SMBus Device Default Address",
        0b010_1000 => "Reserved for ACCESS.bus host",
        0b011_0111 => "Reserved for ACCESS.bus default address",
        _ => return None,
    };
    Some(Reservation {
        spec: Specification::Smbus,
        reason,
    })
}

/// Reservation of `address` under the I2C specification.
pub fn i2c_reservation(address: impl Into<i64>) -> Result<Option<Reservation>> {
    Ok(Address::new(address)?.i2c_reservation())
}

/// Reservation of `address` under the SMBus specification.
pub fn smbus_reservation(address: impl Into<i64>) -> Result<Option<Reservation>> {
    Ok(Address::new(address)?.smbus_reservation())
}

/// Reservation of `address` under either specification.
pub fn reservation(address: impl Into<i64>) -> Result<Option<Reservation>> {
    Ok(Address::new(address)?.reservation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const I2C_SINGLE: [u8; 4] = [0x00, 0x01, 0x02, 0x03];
    const SMBUS: [(u8, &str); 5] = [
        (0x08, "SMBus Host"),
        (0x0c, "SMBus Alert Response Address"),
        (0x61, "SMBus Device Default Address"),
        (0x28, "Reserved for ACCESS.bus host"),
        (0x37, "Reserved for ACCESS.bus default address"),
    ];

    fn i2c_listed(address: u8) -> bool {
        address <= 0x07 || address >= 0x78
    }

    fn smbus_listed(address: u8) -> bool {
        SMBUS.iter().any(|(a, _)| *a == address)
    }

    #[test]
    fn i2c_fixed_addresses() {
        let reasons: Vec<_> = I2C_SINGLE
            .iter()
            .map(|&a| i2c_reservation(a).unwrap().unwrap().reason)
            .collect();
        assert_eq!(
            reasons,
            [
                "General Call Address/START byte",
                "CBUS address",
                "Address reserved for different bus format",
                "Reserved for future use",
            ]
        );
    }

    #[test]
    fn i2c_masked_groups() {
        for address in 0x04..=0x07u8 {
            assert_eq!(
                i2c_reservation(address).unwrap().unwrap().reason,
                "Reserved for future use"
            );
        }
        for address in 0x78..=0x7bu8 {
            assert_eq!(
                i2c_reservation(address).unwrap().unwrap().reason,
                "10-bit slave addressing"
            );
        }
        for address in 0x7c..=0x7fu8 {
            assert_eq!(
                i2c_reservation(address).unwrap().unwrap().reason,
                "Reserved for future use"
            );
        }
    }

    #[test]
    fn smbus_fixed_addresses() {
        for (address, reason) in SMBUS {
            let r = smbus_reservation(address).unwrap().unwrap();
            assert_eq!(r.reason, reason);
            assert_eq!(r.spec, Specification::Smbus);
            assert_eq!(i2c_reservation(address).unwrap(), None);
        }
    }

    #[test]
    fn each_specification_only_reports_its_own_entries() {
        for address in 0..128u8 {
            let i2c = i2c_reservation(address).unwrap();
            let smbus = smbus_reservation(address).unwrap();
            assert_eq!(i2c.is_some(), i2c_listed(address), "i2c {address:#04x}");
            assert_eq!(smbus.is_some(), smbus_listed(address), "smbus {address:#04x}");
            for r in i2c.iter().chain(smbus.iter()) {
                assert!(!r.reason.is_empty());
            }
        }
    }

    #[test]
    fn union_prefers_i2c_and_covers_both() {
        for address in 0..128u8 {
            let combined = reservation(address).unwrap();
            assert_eq!(
                combined.is_some(),
                i2c_listed(address) || smbus_listed(address)
            );
        }
        assert_eq!(reservation(0x00).unwrap().unwrap().spec, Specification::I2c);
        assert_eq!(reservation(0x61).unwrap().unwrap().spec, Specification::Smbus);
        assert_eq!(reservation(0x20).unwrap(), None);
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert!(matches!(i2c_reservation(128), Err(Error::AddressRange { address: 128 })));
        assert!(matches!(smbus_reservation(-1), Err(Error::AddressRange { address: -1 })));
        assert!(matches!(reservation(300), Err(Error::AddressRange { address: 300 })));
    }
}
