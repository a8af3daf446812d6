use std::process::ExitCode;

use clap::Parser;
use modrgb_cli::{parse_int, usage_error, workflow, CommonArgs, Session};

/// Set MOD-RGB output color
#[derive(Parser, Debug)]
#[command(name = "set-mod-rgb", version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Address of the device
    #[arg(value_parser = parse_int)]
    address: i64,

    /// Red brightness 0-255
    #[arg(value_parser = parse_int, required_unless_present = "stop")]
    red: Option<i64>,

    /// Green brightness 0-255
    #[arg(value_parser = parse_int, required_unless_present = "stop")]
    green: Option<i64>,

    /// Blue brightness 0-255
    #[arg(value_parser = parse_int, required_unless_present = "stop")]
    blue: Option<i64>,

    /// Stop PWM output instead of setting a color
    #[arg(long, conflicts_with_all = ["red", "green", "blue"])]
    stop: bool,

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

    let status = match (args.red, args.green, args.blue) {
        (Some(red), Some(green), Some(blue)) if !args.stop => workflow::set_color(
            &mut session.controller,
            &session.settings,
            args.address,
            [red, green, blue],
        ),
        _ => workflow::stop(&mut session.controller, args.address),
    };
    session.finish(ExitCode::from(status))
}
