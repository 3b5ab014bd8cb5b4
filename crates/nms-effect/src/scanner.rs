// SPDX-License-Identifier: MIT
//
// ANSI scanner.
//
// Splits input text into visible characters and CSI control tokens
// (`ESC [ digits/semicolons letter`). Tokens never become characters, which
// keeps `ls --color=always | nms` from scrambling escape bytes. When color
// preservation is on, SGR tokens also set the "active color" that travels
// with each following character; `ESC[0m` (and its short form `ESC[m`)
// clears it.
//
// An ESC that doesn't start a well-formed token is an ordinary character.

use std::sync::LazyLock;

use regex::Regex;

/// One CSI token, anchored at the start of the haystack.
static CSI_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\x1b\[[0-9;]*[A-Za-z]").expect("CSI token pattern is valid")
});

/// Any CSI token, anywhere.
static CSI_ANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("CSI token pattern is valid")
});

const ESC: char = '\x1b';

/// A visible character and the color active where it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    pub ch: char,
    /// The SGR token in effect, verbatim (e.g. `"\x1b[31m"`).
    pub color: Option<String>,
}

/// Whether an SGR token resets all attributes.
fn is_reset(token: &str) -> bool {
    token == "\x1b[0m" || token == "\x1b[m"
}

/// Tokenize `text` into visible characters.
///
/// With `preserve_colors` off every character's color is `None`, but tokens
/// are still stripped.
#[must_use]
pub fn scan(text: &str, preserve_colors: bool) -> Vec<Scanned> {
    let mut out = Vec::with_capacity(text.len());
    let mut color: Option<String> = None;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == ESC {
            if let Some(m) = CSI_TOKEN.find(rest) {
                let token = m.as_str();
                if is_reset(token) {
                    color = None;
                } else if preserve_colors && token.ends_with('m') {
                    color = Some(token.to_string());
                }
                rest = &rest[m.end()..];
                continue;
            }
        }
        out.push(Scanned {
            ch,
            color: color.clone(),
        });
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// Remove every CSI token, leaving only visible text.
#[must_use]
pub fn strip_escapes(text: &str) -> String {
    CSI_ANY.replace_all(text, "").into_owned()
}

/// Whether `text` contains at least one CSI token.
#[must_use]
pub fn has_escape_codes(text: &str) -> bool {
    CSI_ANY.is_match(text)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
