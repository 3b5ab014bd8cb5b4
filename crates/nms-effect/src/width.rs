// SPDX-License-Identifier: MIT
//
// Display width of one character: 1 or 2 terminal columns.
//
// East-Asian-width from `unicode-width` decides most characters, with two
// overrides that match how terminals actually draw things people pipe in:
// box drawing, block elements and geometric shapes are single width even
// where Unicode calls them ambiguous, and private-use code points (Nerd Font
// icons, mostly) are drawn double width.
//
// Zero-width and control characters still occupy a record, so they count as
// one column rather than zero.

use unicode_width::UnicodeWidthChar;

/// Columns `ch` occupies on screen. Always 1 or 2.
#[must_use]
pub fn char_width(ch: char) -> u8 {
    match u32::from(ch) {
        // Box drawing, block elements, geometric shapes.
        0x2500..=0x25FF => 1,
        // Private use: BMP area and the two supplementary planes.
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD => 2,
        _ => match UnicodeWidthChar::width(ch) {
            Some(2) => 2,
            _ => 1,
        },
    }
}
