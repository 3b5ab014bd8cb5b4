// SPDX-License-Identifier: MIT
//
// Scramble source — the glyphs shown in place of hidden characters.
//
// The table is IBM code page 437, slot for slot: the smiley-face control
// glyphs, ASCII, the accented Latin block, the box-drawing block, and the
// Greek and math symbols. Each [`CharsetMode`] samples a contiguous slice
// of it, uniformly.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;

use crate::error::ConfigError;

/// Code page 437, indexed by byte value.
///
/// Slot 0 (NUL) is rendered blank, as the original hardware did.
#[rustfmt::skip]
pub static CP437: [char; 256] = [
    ' ', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', '⌂',
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

// ─── CharsetMode ─────────────────────────────────────────────────────────────

/// Which slice of [`CP437`] scrambled characters are drawn from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharsetMode {
    /// All 256 slots.
    #[default]
    Full,
    /// Everything from the space onward (no control glyphs).
    NoControl,
    /// Printable ASCII only.
    Printable,
    /// The upper half: accented letters, box drawing, Greek, math.
    Extended,
    /// Shades and box-drawing lines only.
    BoxDrawing,
}

impl CharsetMode {
    /// Every mode, in the order they're listed to users.
    pub const ALL: [Self; 5] = [
        Self::Full,
        Self::NoControl,
        Self::Printable,
        Self::Extended,
        Self::BoxDrawing,
    ];

    /// Table slots this mode samples from.
    #[must_use]
    pub const fn range(self) -> RangeInclusive<usize> {
        match self {
            Self::Full => 0..=255,
            Self::NoControl => 32..=255,
            Self::Printable => 32..=126,
            Self::Extended => 128..=255,
            Self::BoxDrawing => 176..=223,
        }
    }

    /// The glyphs this mode can produce.
    #[must_use]
    pub fn glyphs(self) -> &'static [char] {
        &CP437[self.range()]
    }

    /// Name as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::NoControl => "no_control",
            Self::Printable => "printable",
            Self::Extended => "extended",
            Self::BoxDrawing => "box_drawing",
        }
    }
}

impl fmt::Display for CharsetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharsetMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ConfigError::InvalidCharsetMode(s.to_string()))
    }
}

// ─── Sampling ────────────────────────────────────────────────────────────────

/// Draw one scramble glyph, uniformly from `mode`'s slice of the table.
pub fn scramble_char<R: Rng + ?Sized>(mode: CharsetMode, rng: &mut R) -> char {
    CP437[rng.gen_range(mode.range())]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
