use std::process::ExitCode;

use clap::Parser;
use modrgb_cli::{usage_error, CommonArgs, ReservedSpec, Session};

/// Find all MOD-RGB device addresses
#[derive(Parser, Debug)]
#[command(name = "find-mod-rgb", version, about, long_about = None)]
struct Args {
    /// Skip addresses reserved according to either the 'I2C' or 'SMBus' specification
    #[arg(long, value_name = "spec", value_enum, ignore_case = true)]
    reserved: Option<ReservedSpec>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return usage_error(e),
    };

    let mut session = match Session::start(&args.common) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let (skip_i2c, skip_smbus) = ReservedSpec::skip_flags(args.reserved);
    let mut found = 0usize;
    for address in session.controller.find_devices(skip_i2c, skip_smbus) {
        println!("0x{:02x}", address.value());
        found += 1;
    }
    log::info!("found {found} MOD-RGB device(s)");

    session.finish(ExitCode::SUCCESS)
}
