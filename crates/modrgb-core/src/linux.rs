use std::io;
use std::path::{Path, PathBuf};

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

use crate::bus::Bus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusInfo {
    pub number: u32,
    pub path: PathBuf,
}

/// An I2C adapter exposed by the kernel as `/dev/i2c-N`.
pub struct LinuxBus {
    path: PathBuf,
    device: LinuxI2CDevice,
    current: u8,
}

impl LinuxBus {
    pub fn list_buses() -> Vec<BusInfo> {
        let mut buses: Vec<BusInfo> = std::fs::read_dir("/dev")
            .map(|dir| {
                dir.filter_map(|entry| entry.ok())
                    .filter_map(|entry| {
                        let name = entry.file_name();
                        let number = name.to_str()?.strip_prefix("i2c-")?.parse().ok()?;
                        Some(BusInfo {
                            number,
                            path: entry.path(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        buses.sort_by_key(|b| b.number);
        buses
    }

    /// Opens `/dev/i2c-<number>`.
    pub fn open(number: u32) -> io::Result<Self> {
        Self::open_path(format!("/dev/i2c-{number}"))
    }

    pub fn open_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let device = LinuxI2CDevice::new(&path, 0).map_err(io::Error::from)?;
        log::debug!("opened {}", path.display());
        Ok(Self {
            path,
            device,
            current: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn select(&mut self, address: u8) -> io::Result<&mut LinuxI2CDevice> {
        if address != self.current {
            self.device
                .set_slave_address(u16::from(address))
                .map_err(io::Error::from)?;
            log::trace!("{}: slave address 0x{address:02x}", self.path.display());
            self.current = address;
        }
        Ok(&mut self.device)
    }
}

impl Bus for LinuxBus {
    fn write_command(&mut self, address: u8, opcode: u8) -> io::Result<()> {
        self.select(address)?
            .smbus_write_byte(opcode)
            .map_err(io::Error::from)
    }

    fn write_block(&mut self, address: u8, opcode: u8, data: &[u8]) -> io::Result<()> {
        self.select(address)?
            .smbus_write_i2c_block_data(opcode, data)
            .map_err(io::Error::from)
    }

    fn write_register(&mut self, address: u8, opcode: u8, value: u8) -> io::Result<()> {
        self.select(address)?
            .smbus_write_byte_data(opcode, value)
            .map_err(io::Error::from)
    }

    fn read_register(&mut self, address: u8, opcode: u8) -> io::Result<u8> {
        self.select(address)?
            .smbus_read_byte_data(opcode)
            .map_err(io::Error::from)
    }
}
