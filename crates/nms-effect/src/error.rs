// SPDX-License-Identifier: MIT
//
// Error types.
//
// Three families, matching who can do something about them:
//
//   ConfigError — a bad option value. Never fatal: the setter that reports
//   it has already substituted a default, the caller only decides how loudly
//   to warn.
//
//   EffectError — the animation did not finish. Either the user interrupted
//   it or the terminal stopped accepting output. The terminal has been
//   restored by the time one of these is returned.
//
//   InputError — there was no text to decrypt.

use std::io;

use thiserror::Error;

/// An option value was rejected and replaced by its default.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid hex color '{0}'. Use format like 'FF0000' or '#00FF00'")]
    InvalidHexColor(String),

    #[error(
        "Unknown color '{0}'. Valid colors: white, yellow, black, magenta, blue, green, red, cyan"
    )]
    UnknownColor(String),

    #[error(
        "Invalid charset mode '{0}'. Valid modes: full, no_control, printable, extended, box_drawing"
    )]
    InvalidCharsetMode(String),
}

/// The animation stopped before completing.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("Interrupted by user")]
    Interrupted,

    #[error("terminal output failed: {0}")]
    Io(#[from] io::Error),
}

impl EffectError {
    /// Whether this was a user interrupt rather than a failure.
    #[must_use]
    pub const fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

/// No usable input text.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No input provided. Use pipe or provide text.")]
    Empty,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}
