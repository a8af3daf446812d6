//! Shared plumbing for the MOD-RGB command-line tools.

pub mod settings;
pub mod workflow;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ValueEnum};
use modrgb_core::{Error, ModRgb, RecordingBus};

pub use settings::Settings;

/// sysexits(3) codes.
pub mod exit {
    pub const USAGE: u8 = 64;
    pub const DATAERR: u8 = 65;
    pub const UNAVAILABLE: u8 = 69;
    pub const IOERR: u8 = 74;
}

const TRACE_CAPACITY: usize = 4096;

#[cfg(target_os = "linux")]
pub type SystemBus = modrgb_core::LinuxBus;

#[cfg(not(target_os = "linux"))]
pub type SystemBus = unsupported::NoBus;

#[cfg(not(target_os = "linux"))]
mod unsupported {
    use std::io;

    use modrgb_core::Bus;

    /// Placeholder on platforms without an i2c-dev interface; never constructed.
    pub enum NoBus {}

    impl NoBus {
        pub fn open(_number: u32) -> io::Result<Self> {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "I2C access is only implemented for Linux i2c-dev",
            ))
        }
    }

    impl Bus for NoBus {
        fn write_command(&mut self, _: u8, _: u8) -> io::Result<()> {
            match *self {}
        }

        fn write_block(&mut self, _: u8, _: u8, _: &[u8]) -> io::Result<()> {
            match *self {}
        }

        fn write_register(&mut self, _: u8, _: u8, _: u8) -> io::Result<()> {
            match *self {}
        }

        fn read_register(&mut self, _: u8, _: u8) -> io::Result<u8> {
            match *self {}
        }
    }
}

/// Options every tool accepts.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// I2C bus number [default: from settings, else 1]
    #[arg(long, value_name = "dev-num")]
    pub device: Option<u32>,

    /// Settings file [default: <config dir>/mod-rgb/settings.json]
    #[arg(long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Print bus transactions to stderr before exiting
    #[arg(long)]
    pub trace: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReservedSpec {
    I2c,
    Smbus,
}

impl ReservedSpec {
    /// `(skip_reserved_i2c, skip_reserved_smbus)` for a scan.
    pub fn skip_flags(spec: Option<ReservedSpec>) -> (bool, bool) {
        match spec {
            None => (false, false),
            Some(ReservedSpec::I2c) => (true, false),
            Some(ReservedSpec::Smbus) => (false, true),
        }
    }
}

/// An open bus wrapped in a controller that records every transaction.
pub struct Session {
    pub controller: ModRgb<RecordingBus<SystemBus>>,
    pub settings: Settings,
    trace: bool,
}

impl Session {
    /// Sets up logging, loads settings and opens the bus.
    pub fn start(common: &CommonArgs) -> Result<Self, ExitCode> {
        init_logging(common.verbose);

        let settings = Settings::load(common.config.as_deref()).map_err(|e| {
            eprintln!("{e:#}");
            ExitCode::from(exit::DATAERR)
        })?;

        let number = common.device.unwrap_or(settings.device);
        let bus = SystemBus::open(number).map_err(|e| {
            eprintln!("Could not attach to I2C/SMBus {number}: {e}");
            #[cfg(target_os = "linux")]
            {
                let buses: Vec<String> = modrgb_core::LinuxBus::list_buses()
                    .iter()
                    .map(|b| b.number.to_string())
                    .collect();
                if !buses.is_empty() {
                    eprintln!("Available bus numbers: {}", buses.join(", "));
                }
            }
            ExitCode::from(exit::IOERR)
        })?;
        log::info!("using I2C bus {number}");

        Ok(Self {
            controller: ModRgb::new(RecordingBus::new(bus, TRACE_CAPACITY)),
            settings,
            trace: common.trace,
        })
    }

    /// Dumps the transaction log if requested and passes `code` through.
    pub fn finish(self, code: ExitCode) -> ExitCode {
        if self.trace {
            eprint!("{}", self.controller.bus().log().to_text(true));
        }
        code
    }
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Prints a clap error; help and version are not failures.
pub fn usage_error(e: clap::Error) -> ExitCode {
    let _ = e.print();
    if e.use_stderr() {
        ExitCode::from(exit::USAGE)
    } else {
        ExitCode::SUCCESS
    }
}

pub fn exit_status(err: &Error) -> u8 {
    match err {
        Error::AddressRange { .. } | Error::AddressReserved { .. } => exit::USAGE,
        Error::ChannelRange { .. } => exit::DATAERR,
        Error::Compatibility { .. } => exit::UNAVAILABLE,
        Error::Io { .. } => exit::IOERR,
    }
}

/// Prints `err` and returns the matching exit status.
pub fn report_status(err: &Error) -> u8 {
    eprintln!("{err}");
    exit_status(err)
}

/// Parses an integer the way Python's `int(s, 0)` does: optional sign, then
/// decimal or a `0x`/`0o`/`0b` prefixed literal.
pub fn parse_int(text: &str) -> Result<i64, String> {
    let invalid = || format!("invalid integer {text:?}");
    let trimmed = text.trim();
    let (negative, body) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let lower = body.to_ascii_lowercase();
    // A prefix may be followed by a single underscore: `0x_1f`.
    let (radix, digits) = if let Some(d) = lower.strip_prefix("0x") {
        (16, d.strip_prefix('_').unwrap_or(d))
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d.strip_prefix('_').unwrap_or(d))
    } else if let Some(d) = lower.strip_prefix("0b") {
        (2, d.strip_prefix('_').unwrap_or(d))
    } else {
        let leading_zero = lower.starts_with('0') && lower.bytes().any(|b| !matches!(b, b'0' | b'_'));
        if leading_zero {
            return Err(invalid());
        }
        (10, lower.as_str())
    };

    // Underscores only ever sit between two digits.
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid());
    }
    let digits = digits.replace('_', "");
    if !digits.bytes().next().is_some_and(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid());
    }
    let magnitude = i64::from_str_radix(&digits, radix).map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Maps `value` from 0..=255 onto 0..=`full_scale`, rounding down.
pub fn scale_channel(value: u8, full_scale: u8) -> u8 {
    (u16::from(value) * u16::from(full_scale) / 255) as u8
}

/// Prints `message` and blocks until the user presses RETURN.
pub fn wait_for_return(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{message}")?;
    writeln!(stdout, "Press RETURN to continue.")?;
    stdout.flush()?;
    drop(stdout);

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
