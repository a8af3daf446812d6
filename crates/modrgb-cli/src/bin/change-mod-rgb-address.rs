use std::process::ExitCode;

use clap::Parser;
use modrgb_cli::{parse_int, usage_error, wait_for_return, workflow, CommonArgs, Session};

/// Change MOD-RGB address
#[derive(Parser, Debug)]
#[command(name = "change-mod-rgb-address", version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Current address of the device
    #[arg(value_name = "old-address", value_parser = parse_int)]
    old_address: i64,

    /// Address to assign
    #[arg(value_name = "new-address", value_parser = parse_int)]
    new_address: i64,

    /// Do not prompt for jumper changes
    #[arg(short, long)]
    quiet: bool,

    /// Omit the reprogramming command
    #[arg(short = 'n', long)]
    no_action: bool,

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

    let prompt = !args.quiet && session.settings.prompt;
    let status = workflow::reprogram(
        &mut session.controller,
        args.old_address,
        args.new_address,
        !args.no_action,
        |message| if prompt { wait_for_return(message) } else { Ok(()) },
    );
    session.finish(ExitCode::from(status))
}
