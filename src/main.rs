// SPDX-License-Identifier: MIT
//
// nms — the "No More Secrets" decryption effect from Sneakers (1992).
//
// Reads text from the argument, a pipe, or a prompt, shows it scrambled,
// and decrypts it character by character:
//
//   input → scanner → reveal records → TypeOut → Jumble → Reveal → restore
//
// The crates:
//
//   nms-term   → escape sequences, raw-mode keypresses, interrupt handling
//   nms-effect → scanner, reveal state, the animation, input reading

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use nms_effect::input::read_input;
use nms_effect::scanner::has_escape_codes;
use nms_effect::{EffectConfig, InputError};
use nms_term::{Capabilities, Color, NamedColor, Style, ansi};
use tracing::warn;

const EXAMPLES: &str = "\
Examples:
  echo \"Hello World\" | nms
  cat file.txt | nms -a -f green
  nms \"Secret message\"
  echo \"Custom color\" | nms -a -x FF6600
  ls --color=always | nms -a -o    # keep the original colors";

/// Recreate the famous data decryption effect from the 1992 movie Sneakers.
#[derive(Parser, Debug)]
#[command(name = "nms", version, disable_version_flag = true, after_help = EXAMPLES)]
struct Args {
    /// Decrypt automatically instead of waiting for a keypress.
    #[arg(short, long)]
    auto: bool,

    /// Scramble blank spaces too.
    #[arg(short = 's', long)]
    mask_spaces: bool,

    /// Color of decrypted text: white, yellow, black, magenta, blue, green,
    /// red or cyan.
    #[arg(short, long, value_name = "COLOR", default_value = "blue")]
    foreground: String,

    /// Custom decrypted-text color as hex, e.g. FF0000 or '#00FF00'.
    #[arg(short = 'x', long = "hex", value_name = "RRGGBB")]
    hex: Option<String>,

    /// Keep the input's own colors (e.g. from `ls --color=always`).
    #[arg(short, long)]
    original: bool,

    /// Clear the screen before starting.
    #[arg(short, long)]
    clear_screen: bool,

    /// Scramble charset: full, no_control, printable, extended, box_drawing.
    #[arg(short = 'm', long, value_name = "MODE", default_value = "full")]
    charset: String,

    /// Print a color swatch and exit.
    #[arg(long)]
    test_colors: bool,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Text to decrypt (read from stdin when omitted).
    text: Option<String>,
}

impl Args {
    /// Turn the flags into an effect configuration, warning about (and
    /// replacing) any value that doesn't validate.
    ///
    /// Color precedence: `--original`, then `--hex`, then `--foreground`.
    fn effect_config(&self) -> EffectConfig {
        let mut config = EffectConfig::new();
        config.set_auto_decrypt(self.auto);
        config.set_mask_blank(self.mask_spaces);
        config.set_clear_screen(self.clear_screen);
        config.set_preserve_colors(self.original);

        if let Err(e) = config.set_charset_mode(&self.charset) {
            warn!("{e}");
        }

        if !self.original {
            let result = match &self.hex {
                Some(hex) => config.set_hex_color(clean_hex(hex)),
                None => config.set_foreground_color(&self.foreground),
            };
            if let Err(e) = result {
                warn!("{e}");
            }
        }

        config
    }
}

/// Strip the quotes and spaces shells sometimes leave around a hex value.
fn clean_hex(raw: &str) -> &str {
    raw.trim().trim_matches(['\'', '"']).trim()
}

fn print_test_colors() -> io::Result<()> {
    let swatches: [(&str, &str, Color); 9] = [
        ("White", "WHITE", NamedColor::White.into()),
        ("Red", "RED", NamedColor::Red.into()),
        ("Green", "GREEN", NamedColor::Green.into()),
        ("Blue", "BLUE", NamedColor::Blue.into()),
        ("Yellow", "YELLOW", NamedColor::Yellow.into()),
        ("Magenta", "MAGENTA", NamedColor::Magenta.into()),
        ("Cyan", "CYAN", NamedColor::Cyan.into()),
        ("Custom Orange", "ORANGE", Color::Rgb(255, 102, 0)),
        ("Custom Purple", "PURPLE", Color::Rgb(128, 0, 128)),
    ];

    let mut out = io::stdout().lock();
    writeln!(out, "Testing colors...")?;
    for (label, sample, color) in swatches {
        write!(out, "{label}: ")?;
        ansi::style(&mut out, Style::bright(color))?;
        out.write_all(sample.as_bytes())?;
        ansi::reset(&mut out)?;
        writeln!(out)?;
    }
    writeln!(out, "\nTo test with original colors, try:")?;
    writeln!(out, "  ls --color=always | nms -a -o")?;
    writeln!(out, "  tree -C | nms -a -o")?;
    out.flush()
}

fn print_no_colors_hint() {
    eprintln!("No colors detected in input. To force colors through pipes:");
    eprintln!("   ls --color=always | nms -a -o");
    eprintln!("   tree -C | nms -a -o");
    eprintln!();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging();

    if args.test_colors {
        return match print_test_colors() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let caps = Capabilities::probe();
    let text = match read_input(args.text.clone(), caps.stdin_tty) {
        Ok(text) => text,
        Err(InputError::Empty) => {
            eprintln!("Error: No input provided.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.original && !has_escape_codes(&text) {
        print_no_colors_hint();
    }

    let effect = nms_effect::Effect::new(args.effect_config());
    cli::run_effect(effect, &text, caps)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
