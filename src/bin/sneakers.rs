// SPDX-License-Identifier: MIT
//
// sneakers — replays the Federal Reserve terminal scene from the film: the
// menu screen, sized to the terminal, scrambled and decrypted in blue on a
// keypress.

#[path = "../cli.rs"]
mod cli;

use std::process::ExitCode;

use clap::Parser;
use nms_effect::sneakers::menu_text;
use nms_effect::{Effect, EffectConfig};
use nms_term::{Capabilities, NamedColor};

/// Recreate the decryption scene from the 1992 movie Sneakers.
#[derive(Parser, Debug)]
#[command(name = "sneakers", version)]
struct Args {}

fn main() -> ExitCode {
    Args::parse();
    cli::init_logging();

    let caps = Capabilities::probe();
    let text = menu_text(caps.size.cols);

    let mut config = EffectConfig::new();
    config.set_clear_screen(true);
    config.set_foreground(NamedColor::Blue);
    config.set_auto_decrypt(false);

    cli::run_effect(Effect::new(config), &text, caps)
}
