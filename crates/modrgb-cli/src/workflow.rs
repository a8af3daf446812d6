//! Bus sequences behind the tools, returning sysexits status codes.

use std::io;

use modrgb_core::{Address, Bus, Channel, Error, ModRgb, Result};

use crate::{exit, report_status, scale_channel, Settings};

pub const OK: u8 = 0;

/// Validates both addresses and the reserved-address rule without writing.
fn rehearse<B: Bus>(
    controller: &mut ModRgb<B>,
    old: i64,
    new: i64,
) -> Result<(Address, Address)> {
    let old = Address::new(old)?;
    let new = Address::new(new)?;
    controller.change_address(old, new, false)?;
    Ok((old, new))
}

/// Moves the device at `old` to `new`, asking `confirm` to wait for the
/// DMX_EN jumper before and after the write.
pub fn reprogram<B: Bus>(
    controller: &mut ModRgb<B>,
    old: i64,
    new: i64,
    apply: bool,
    mut confirm: impl FnMut(&str) -> io::Result<()>,
) -> u8 {
    // Bad arguments must never reach the jumper prompts.
    let (old, new) = match rehearse(controller, old, new) {
        Ok(pair) => pair,
        Err(e) => return report_status(&e),
    };

    if let Err(e) = controller.ensure_device(old) {
        let status = report_status(&e);
        if e.is_io() {
            eprintln!("Incorrect <old-address> {old}?");
        }
        return status;
    }

    if let Err(e) = confirm(&format!("The DMX_EN jumper on device {old} must be closed")) {
        eprintln!("I/O error: {e}");
        return exit::IOERR;
    }

    if let Err(e) = controller.change_address(old, new, apply) {
        return report_status(&e);
    }

    if let Err(e) = confirm(&format!(
        "Now open the DMX_EN jumper on device {new} to avoid inadvertently changing it."
    )) {
        eprintln!("I/O error: {e}");
        return exit::IOERR;
    }

    // A dry run leaves the device where it was.
    let target = if apply { new } else { old };
    match controller.ensure_device(target) {
        Ok(()) => {
            if apply {
                log::info!("device {old} now answers at {new}");
            } else {
                log::info!("dry run: {old} -> {new} validated, nothing written");
            }
            OK
        }
        Err(e @ Error::Compatibility { .. }) => {
            eprintln!("Reprogramming FAILED!");
            report_status(&e)
        }
        Err(e) => {
            eprintln!("Device at <new-address> {target} did not verify");
            report_status(&e)
        }
    }
}

/// Verifies the device, starts PWM and sends the color with green and blue
/// scaled per `settings`. Raw channels are checked before anything is sent.
pub fn set_color<B: Bus>(
    controller: &mut ModRgb<B>,
    settings: &Settings,
    address: i64,
    [red, green, blue]: [i64; 3],
) -> u8 {
    let channels = Channel::Red
        .check(red)
        .and_then(|r| Ok((r, Channel::Green.check(green)?, Channel::Blue.check(blue)?)));
    let (r, g, b) = match channels {
        Ok(rgb) => rgb,
        Err(e) => return report_status(&e),
    };

    if let Err(e) = controller
        .ensure_device(address)
        .and_then(|()| controller.start_pwm(address))
    {
        return report_status(&e);
    }

    let g = scale_channel(g, settings.green_scale);
    let b = scale_channel(b, settings.blue_scale);
    log::info!("sending rgb ({r}, {g}, {b})");

    match controller.set_color(address, r, g, b) {
        Ok(()) => OK,
        Err(e) => report_status(&e),
    }
}

pub fn stop<B: Bus>(controller: &mut ModRgb<B>, address: i64) -> u8 {
    match controller
        .ensure_device(address)
        .and_then(|()| controller.stop_pwm(address))
    {
        Ok(()) => OK,
        Err(e) => report_status(&e),
    }
}
