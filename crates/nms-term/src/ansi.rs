// SPDX-License-Identifier: MIT
//
// Control sequences, as bytes.
//
// Stateless writers for the few terminal commands the decryption effect
// emits: cursor homing and visibility, screen clear, the DEC mode 47
// save/restore pair, and SGR color. Deciding when to send them is the
// animation engine's job.
//
// Every writer forwards the `io::Result` of the sink. Into an
// `OutputBuffer` that is always `Ok`.

use std::io::{self, Write};

use crate::style::{Color, Style};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// `CUP` without parameters: row 1, column 1.
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// `DECTCEM` off.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// `DECTCEM` on.
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// `ED 2`: erase the whole display. The cursor stays where it is.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Switch to the alternate screen (DEC private mode 47).
///
/// Mode 47 rather than 1049: the effect homes the cursor itself and wants
/// the original cursor position back untouched when it restores.
#[inline]
pub fn save_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?47h")
}

/// Leave the alternate screen entered by [`save_screen`].
#[inline]
pub fn restore_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?47l")
}

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// `SGR 0`: back to the terminal's default rendition.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// One `SGR` sequence carrying `style`'s attributes, then its color.
///
/// Bold blue is `\x1b[1;34m`; bold orange `\x1b[1;38;2;255;102;0m`.
pub fn style(w: &mut impl Write, style: Style) -> io::Result<()> {
    let mut sep = "";
    w.write_all(b"\x1b[")?;
    for code in style.attrs.sgr_params() {
        write!(w, "{sep}{code}")?;
        sep = ";";
    }
    match style.fg {
        Color::Named(c) => write!(w, "{sep}{}m", c.sgr()),
        Color::Rgb(r, g, b) => write!(w, "{sep}38;2;{r};{g};{b}m"),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
