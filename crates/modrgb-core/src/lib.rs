//! MOD-RGB control over I2C/SMBus: address rules, identity checks, commands, discovery.

pub mod address;
pub mod bus;
pub mod control;
pub mod discovery;
pub mod error;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod protocol;
pub mod reserved;
pub mod translog;

pub use address::{Address, Channel};
pub use bus::Bus;
pub use control::ModRgb;
pub use discovery::{FindDevices, ReservedFilter};
pub use error::{Error, Result};
#[cfg(target_os = "linux")]
pub use linux::{BusInfo, LinuxBus};
pub use reserved::{Reservation, Specification};
pub use translog::{LogEntry, Outcome, RecordingBus, Transaction, TransactionLog};
