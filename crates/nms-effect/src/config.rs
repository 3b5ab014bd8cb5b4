// SPDX-License-Identifier: MIT
//
// Effect configuration.
//
// Every textual option is validated once, here, and turned into a closed
// type (`NamedColor`, `CharsetMode`, an RGB triple). Setters never fail
// hard: a rejected value is replaced by its default and the `ConfigError`
// is handed back so the caller can warn about it.

use nms_term::style::parse_hex6;
use nms_term::{Color, NamedColor, Style};
use tracing::debug;

use crate::charset::CharsetMode;
use crate::error::ConfigError;

/// A validated custom reveal color.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HexColor {
    /// Six hex digits as given, without the `#`.
    digits: String,
    rgb: (u8, u8, u8),
}

/// Options for one run of the effect. Immutable once the animation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectConfig {
    auto_decrypt: bool,
    mask_blank: bool,
    clear_screen: bool,
    preserve_colors: bool,
    foreground: NamedColor,
    custom: Option<HexColor>,
    charset: CharsetMode,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            auto_decrypt: false,
            mask_blank: false,
            clear_screen: false,
            preserve_colors: false,
            foreground: NamedColor::Blue,
            custom: None,
            charset: CharsetMode::Full,
        }
    }
}

impl EffectConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Flags ───────────────────────────────────────────────────────────

    /// Start decrypting after a pause instead of waiting for a key.
    pub const fn set_auto_decrypt(&mut self, on: bool) {
        self.auto_decrypt = on;
    }

    /// Scramble literal spaces too. Tabs and newlines stay protected.
    pub const fn set_mask_blank(&mut self, on: bool) {
        self.mask_blank = on;
    }

    /// Clear the primary screen before saving it.
    pub const fn set_clear_screen(&mut self, on: bool) {
        self.clear_screen = on;
    }

    /// Reveal characters in the color they had in the input.
    pub const fn set_preserve_colors(&mut self, on: bool) {
        self.preserve_colors = on;
    }

    // ─── Colors ──────────────────────────────────────────────────────────

    /// Select the named reveal color. Clears any custom hex color.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownColor`] if `name` is not one of the eight
    /// terminal colors; blue is used instead.
    pub fn set_foreground_color(&mut self, name: &str) -> Result<(), ConfigError> {
        self.custom = None;
        match NamedColor::from_name(name) {
            Some(color) => {
                self.foreground = color;
                Ok(())
            }
            None => {
                debug!(name, "unknown foreground color, using blue");
                self.foreground = NamedColor::Blue;
                Err(ConfigError::UnknownColor(name.to_string()))
            }
        }
    }

    /// Typed form of [`set_foreground_color`](Self::set_foreground_color).
    pub fn set_foreground(&mut self, color: NamedColor) {
        self.custom = None;
        self.foreground = color;
    }

    /// Set a custom RGB reveal color from `RRGGBB` or `#RRGGBB`.
    ///
    /// The digits are kept as given (case preserved, `#` stripped).
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidHexColor`] if `hex` is not exactly six hex
    /// digits. Any previous custom color is cleared, so the named
    /// foreground color applies again.
    pub fn set_hex_color(&mut self, hex: &str) -> Result<(), ConfigError> {
        if let Some(rgb) = parse_hex6(hex) {
            let digits = hex.strip_prefix('#').unwrap_or(hex).to_string();
            self.custom = Some(HexColor { digits, rgb });
            Ok(())
        } else {
            debug!(hex, "invalid hex color, clearing custom color");
            self.custom = None;
            Err(ConfigError::InvalidHexColor(hex.to_string()))
        }
    }

    // ─── Charset ─────────────────────────────────────────────────────────

    /// Select the scramble charset by name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCharsetMode`] for an unknown name; `full` is
    /// used instead.
    pub fn set_charset_mode(&mut self, mode: &str) -> Result<(), ConfigError> {
        match mode.parse() {
            Ok(m) => {
                self.charset = m;
                Ok(())
            }
            Err(e) => {
                debug!(mode, "unknown charset mode, using full");
                self.charset = CharsetMode::Full;
                Err(e)
            }
        }
    }

    /// Typed form of [`set_charset_mode`](Self::set_charset_mode).
    pub const fn set_charset(&mut self, mode: CharsetMode) {
        self.charset = mode;
    }

    // ─── Getters ─────────────────────────────────────────────────────────

    #[must_use]
    pub const fn auto_decrypt(&self) -> bool {
        self.auto_decrypt
    }

    #[must_use]
    pub const fn mask_blank(&self) -> bool {
        self.mask_blank
    }

    #[must_use]
    pub const fn clear_screen(&self) -> bool {
        self.clear_screen
    }

    #[must_use]
    pub const fn preserve_colors(&self) -> bool {
        self.preserve_colors
    }

    #[must_use]
    pub const fn foreground(&self) -> NamedColor {
        self.foreground
    }

    #[must_use]
    pub const fn charset(&self) -> CharsetMode {
        self.charset
    }

    /// The custom hex digits, if a valid one is set.
    #[must_use]
    pub fn custom_hex(&self) -> Option<&str> {
        self.custom.as_ref().map(|c| c.digits.as_str())
    }

    /// The style revealed characters are drawn in when they carry no
    /// preserved color: the custom RGB value if set, else the bright
    /// variant of the named foreground color.
    #[must_use]
    pub fn reveal_style(&self) -> Style {
        let fg = match &self.custom {
            Some(HexColor { rgb: (r, g, b), .. }) => Color::Rgb(*r, *g, *b),
            None => Color::Named(self.foreground),
        };
        Style::bright(fg)
    }
}
