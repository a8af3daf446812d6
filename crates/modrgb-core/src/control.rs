//! MOD-RGB device commands.
//!
//! Every entry point validates its arguments before touching the bus, issues
//! at most one transaction and never retries.

use crate::address::{Address, Channel};
use crate::bus::Bus;
use crate::discovery::{FindDevices, ReservedFilter};
use crate::error::{Error, Result};
use crate::protocol::{opcode, MOD_RGB_ID};

pub struct ModRgb<B: Bus> {
    bus: B,
}

impl<B: Bus> ModRgb<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    pub fn start_pwm(&mut self, address: impl Into<i64>) -> Result<()> {
        let address = Address::new(address)?;
        self.bus
            .write_command(address.value(), opcode::START_PWM)
            .map_err(|source| Error::Io { address, source })
    }

    pub fn stop_pwm(&mut self, address: impl Into<i64>) -> Result<()> {
        let address = Address::new(address)?;
        self.bus
            .write_command(address.value(), opcode::STOP_PWM)
            .map_err(|source| Error::Io { address, source })
    }

    /// Sets the output color. Channels are checked red, green, blue.
    pub fn set_color(
        &mut self,
        address: impl Into<i64>,
        red: impl Into<i64>,
        green: impl Into<i64>,
        blue: impl Into<i64>,
    ) -> Result<()> {
        let address = Address::new(address)?;
        let rgb = [
            Channel::Red.check(red)?,
            Channel::Green.check(green)?,
            Channel::Blue.check(blue)?,
        ];
        self.bus
            .write_block(address.value(), opcode::SET_RGB, &rgb)
            .map_err(|source| Error::Io { address, source })
    }

    /// Reads the identity register.
    pub fn identity(&mut self, address: impl Into<i64>) -> Result<u8> {
        let address = Address::new(address)?;
        self.read_identity(address)
    }

    pub fn is_device(&mut self, address: impl Into<i64>) -> Result<bool> {
        Ok(self.identity(address)? == MOD_RGB_ID)
    }

    /// Fails with [`Error::Compatibility`] unless a MOD-RGB answers at `address`.
    pub fn ensure_device(&mut self, address: impl Into<i64>) -> Result<()> {
        let address = Address::new(address)?;
        let identity = self.read_identity(address)?;
        if identity != MOD_RGB_ID {
            return Err(Error::Compatibility { address, identity });
        }
        Ok(())
    }

    /// Moves the device at `old` to `new`.
    ///
    /// The board only accepts the command while its DMX_EN jumper is closed.
    /// With `apply == false` everything is validated but nothing is written.
    pub fn change_address(
        &mut self,
        old: impl Into<i64>,
        new: impl Into<i64>,
        apply: bool,
    ) -> Result<()> {
        let old = Address::new(old)?;
        let new = Address::new(new)?;

        if let Some(reservation) = new.reservation() {
            return Err(Error::AddressReserved {
                address: new,
                reservation,
            });
        }

        if !apply {
            return Ok(());
        }

        self.bus
            .write_register(old.value(), opcode::SET_ADDRESS, new.value())
            .map_err(|source| Error::Io {
                address: old,
                source,
            })
    }

    /// Scans the bus for MOD-RGB boards, lowest address first.
    ///
    /// Skipping SMBus-reserved addresses implies skipping I2C-reserved ones.
    pub fn find_devices(
        &mut self,
        skip_reserved_i2c: bool,
        skip_reserved_smbus: bool,
    ) -> FindDevices<'_, B> {
        self.find_devices_with(ReservedFilter::new(skip_reserved_i2c, skip_reserved_smbus))
    }

    /// Scans with an explicit filter; `ReservedFilter::default()` skips every
    /// reserved address.
    pub fn find_devices_with(&mut self, filter: ReservedFilter) -> FindDevices<'_, B> {
        FindDevices::new(self, filter)
    }

    pub(crate) fn read_identity(&mut self, address: Address) -> Result<u8> {
        self.bus
            .read_register(address.value(), opcode::GET_ID)
            .map_err(|source| Error::Io { address, source })
    }
}
