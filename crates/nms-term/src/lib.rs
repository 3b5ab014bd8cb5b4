// SPDX-License-Identifier: MIT
//
// nms-term — Terminal layer for nms.
//
// Everything the decryption effect needs from a live terminal, and nothing
// more: the byte encoding of the handful of control sequences it emits, a
// frame buffer so each redraw is one write, raw-mode single keypress reads,
// a capability probe, and interrupt handling that lets the animation unwind
// cleanly instead of dying with the screen still saved.
//
// Like the rest of this workspace it talks to the terminal directly through
// ANSI escape sequences and termios. No TUI framework sits in between.

pub mod ansi;
pub mod output;
pub mod signal;
pub mod style;
pub mod terminal;

pub use signal::CancelToken;
pub use style::{Attr, Color, NamedColor, Style};
pub use terminal::{Capabilities, KeyRead, KeySource, Platform, Size, Terminal};
