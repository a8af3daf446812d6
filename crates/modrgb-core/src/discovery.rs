use std::iter::FusedIterator;

use crate::address::Address;
use crate::bus::Bus;
use crate::control::ModRgb;
use crate::protocol::{ADDRESS_LIMIT, MOD_RGB_ID};

/// Which reserved addresses a scan leaves alone.
///
/// The default skips everything reserved under either specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedFilter {
    i2c: bool,
    smbus: bool,
}

impl ReservedFilter {
    pub const NONE: ReservedFilter = ReservedFilter {
        i2c: false,
        smbus: false,
    };

    pub const ALL: ReservedFilter = ReservedFilter {
        i2c: true,
        smbus: true,
    };

    pub fn new(i2c: bool, smbus: bool) -> Self {
        Self {
            i2c: i2c || smbus,
            smbus,
        }
    }

    pub fn skips_i2c(&self) -> bool {
        self.i2c
    }

    pub fn skips_smbus(&self) -> bool {
        self.smbus
    }

    pub fn skips(&self, address: Address) -> bool {
        (self.i2c && address.i2c_reservation().is_some())
            || (self.smbus && address.smbus_reservation().is_some())
    }
}

impl Default for ReservedFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Lazy bus scan returned by [`ModRgb::find_devices`].
///
/// Each call to `next` probes addresses until one answers with the MOD-RGB
/// identity. Addresses that fail to answer are treated as empty.
pub struct FindDevices<'a, B: Bus> {
    controller: &'a mut ModRgb<B>,
    filter: ReservedFilter,
    cursor: u8,
}

impl<'a, B: Bus> FindDevices<'a, B> {
    pub(crate) fn new(controller: &'a mut ModRgb<B>, filter: ReservedFilter) -> Self {
        Self {
            controller,
            filter,
            cursor: 0,
        }
    }

    pub fn filter(&self) -> ReservedFilter {
        self.filter
    }

    /// Starts the scan again from address 0.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn remaining(&self) -> usize {
        ADDRESS_LIMIT as usize - self.cursor as usize
    }
}

impl<B: Bus> Iterator for FindDevices<'_, B> {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        while i64::from(self.cursor) < ADDRESS_LIMIT {
            let address = Address::new(self.cursor).ok()?;
            self.cursor += 1;

            if self.filter.skips(address) {
                continue;
            }

            match self.controller.read_identity(address) {
                Ok(MOD_RGB_ID) => return Some(address),
                Ok(identity) => {
                    log::debug!("{address}: identity 0x{identity:02x}, skipping");
                }
                Err(e) => {
                    log::debug!("{address}: no answer ({e})");
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<B: Bus> FusedIterator for FindDevices<'_, B> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smbus_implies_i2c() {
        let filter = ReservedFilter::new(false, true);
        assert!(filter.skips_i2c());
        assert!(filter.skips_smbus());
        assert!(filter.skips(Address::new(0x00).unwrap()));
        assert!(filter.skips(Address::new(0x61).unwrap()));
    }

    #[test]
    fn i2c_only_keeps_smbus_addresses() {
        let filter = ReservedFilter::new(true, false);
        assert!(filter.skips(Address::new(0x7f).unwrap()));
        assert!(!filter.skips(Address::new(0x08).unwrap()));
    }

    #[test]
    fn none_skips_nothing() {
        assert!(Address::all().all(|a| !ReservedFilter::NONE.skips(a)));
    }

    #[test]
    fn default_skips_every_reserved_address() {
        let filter = ReservedFilter::default();
        assert_eq!(filter, ReservedFilter::new(true, true));
        assert!(filter.skips(Address::new(0x00).unwrap()));
        assert!(filter.skips(Address::new(0x08).unwrap()));
        for address in Address::all() {
            assert_eq!(filter.skips(address), address.is_reserved(), "{address}");
        }
    }
}
