// SPDX-License-Identifier: MIT
//
// Colors and SGR attributes for revealed text.
//
// The effect only ever paints one kind of styled run: a single character in
// a bold foreground color followed by a reset. The model is small: eight
// named colors that map straight to SGR 30–37 plus RGB for TrueColor, and a
// bitfield of the attributes we emit.
//
// "Bright" in the effect's vocabulary means bold + color.

use std::fmt;

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes, bit per SGR parameter we emit.
    ///
    /// ```
    /// use nms_term::style::Attr;
    ///
    /// assert_eq!(Attr::BOLD.sgr_params().collect::<Vec<_>>(), vec![1]);
    /// assert_eq!(Attr::empty().sgr_params().count(), 0);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1, increased intensity.
        const BOLD = 1 << 0;
    }
}

impl Attr {
    /// SGR parameters for the set attributes, in ascending order.
    pub fn sgr_params(self) -> impl Iterator<Item = u8> {
        [(Self::BOLD, 1)]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, code)| code)
    }
}

// ─── NamedColor ──────────────────────────────────────────────────────────────

/// One of the eight standard ANSI foreground colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    /// Every named color, in SGR order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// The SGR foreground parameter (30–37).
    #[must_use]
    pub const fn sgr(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }

    /// Lowercase name as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    /// Case-insensitive lookup by name, surrounding spaces ignored.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == lower)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A foreground color: one of the named eight, or 24-bit `TrueColor`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(c) => write!(f, "{c}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(c: NamedColor) -> Self {
        Self::Named(c)
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Attributes plus foreground color, emitted as one SGR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub attrs: Attr,
    pub fg: Color,
}

impl Style {
    /// Bold + `fg`: the "bright" style used for revealed characters.
    #[must_use]
    pub const fn bright(fg: Color) -> Self {
        Self {
            attrs: Attr::BOLD,
            fg,
        }
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse exactly six hex digits, with one optional leading `#`.
///
/// Shorthand (`#RGB`) and alpha (`#RRGGBBAA`) forms are rejected. Only a
/// single `#` is stripped, so `##FF0000` is rejected as well.
#[must_use]
pub fn parse_hex6(s: &str) -> Option<(u8, u8, u8)> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── NamedColor ──────────────────────────────────────────────────

    #[test]
    fn sgr_codes_follow_ansi_order() {
        let codes: Vec<u8> = NamedColor::ALL.iter().map(|c| c.sgr()).collect();
        assert_eq!(codes, vec![30, 31, 32, 33, 34, 35, 36, 37]);
    }

    #[test]
    fn lookup_named_color() {
        assert_eq!(NamedColor::from_name("red"), Some(NamedColor::Red));
        assert_eq!(NamedColor::from_name(" cyan "), Some(NamedColor::Cyan));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(NamedColor::from_name("GREEN"), Some(NamedColor::Green));
        assert_eq!(NamedColor::from_name("Magenta"), Some(NamedColor::Magenta));
    }

    #[test]
    fn lookup_unknown_color() {
        assert_eq!(NamedColor::from_name("invalid_color"), None);
        assert_eq!(NamedColor::from_name(""), None);
    }

    #[test]
    fn name_round_trips_through_display() {
        for c in NamedColor::ALL {
            assert_eq!(NamedColor::from_name(&c.to_string()), Some(c));
        }
    }

    // ── Attr ────────────────────────────────────────────────────────

    #[test]
    fn attr_params_empty() {
        assert_eq!(Attr::empty().sgr_params().count(), 0);
    }

    #[test]
    fn attr_params_bold() {
        let params: Vec<u8> = Attr::BOLD.sgr_params().collect();
        assert_eq!(params, vec![1]);
    }

    // ── Hex ─────────────────────────────────────────────────────────

    #[test]
    fn hex_plain() {
        assert_eq!(parse_hex6("FF0000"), Some((255, 0, 0)));
        assert_eq!(parse_hex6("0000FF"), Some((0, 0, 255)));
    }

    #[test]
    fn hex_with_hash_and_lowercase() {
        assert_eq!(parse_hex6("#00ff00"), Some((0, 255, 0)));
        assert_eq!(parse_hex6("#FFFFFF"), Some((255, 255, 255)));
    }

    #[test]
    fn hex_rejects_bad_digits() {
        assert_eq!(parse_hex6("GG0000"), None);
        assert_eq!(parse_hex6("#12345z"), None);
    }

    #[test]
    fn hex_rejects_wrong_length() {
        assert_eq!(parse_hex6(""), None);
        assert_eq!(parse_hex6("FF00"), None);
        assert_eq!(parse_hex6("#F00"), None);
        assert_eq!(parse_hex6("FF0000FF"), None);
    }

    #[test]
    fn hex_strips_only_one_hash() {
        assert_eq!(parse_hex6("##FF0000"), None);
        assert_eq!(parse_hex6("#FF0000#"), None);
    }

    #[test]
    fn color_debug_format() {
        assert_eq!(format!("{:?}", Color::Rgb(255, 128, 0)), "#ff8000");
        assert_eq!(format!("{:?}", Color::Named(NamedColor::Blue)), "blue");
    }

    #[test]
    fn bright_is_bold() {
        let s = Style::bright(NamedColor::Red.into());
        assert!(s.attrs.contains(Attr::BOLD));
        assert_eq!(s.fg, Color::Named(NamedColor::Red));
    }
}
