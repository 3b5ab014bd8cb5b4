// SPDX-License-Identifier: MIT
//
// Per-character reveal state.
//
// One `RevealRecord` per visible input character. The sequence is built
// once, then owned by the animation engine, which mutates only the fields
// that change over time (`mask`, `reveal_delay`, `is_revealed`) by index.
// Order and count never change after construction.

/// Reveal state of one visible character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealRecord {
    /// The character that will eventually be shown.
    pub source: char,
    /// What is shown while hidden. Equal to `source` for protected whitespace.
    pub mask: char,
    /// Display columns of `source` (1 or 2).
    pub width: u8,
    /// Protected whitespace: never scrambled, never counted down.
    pub is_whitespace: bool,
    /// Countdown to reveal, in animation time units. May go negative.
    pub reveal_delay: i32,
    /// Set once `reveal_delay` has run out. Never cleared.
    pub is_revealed: bool,
    /// SGR token active at this position in the input, when colors are preserved.
    pub original_color: Option<String>,
}

/// What one reveal pass did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Protected whitespace; nothing to do.
    Whitespace,
    /// Still counting down.
    Hidden,
    /// The countdown ran out on this pass.
    JustRevealed,
    /// Revealed on an earlier pass.
    Revealed,
}

impl RevealStep {
    /// Whether the record should be drawn as its source in reveal color.
    #[must_use]
    pub const fn shows_source(self) -> bool {
        matches!(self, Self::JustRevealed | Self::Revealed)
    }
}

impl RevealRecord {
    /// Run one reveal pass over this record.
    ///
    /// A hidden record loses `step` from its countdown and stays hidden for
    /// the rest of this pass even if that empties it; it flips on the next
    /// pass. This keeps every character on screen scrambled for at least one
    /// frame after its countdown expires, so reveals land on frame edges.
    pub fn advance(&mut self, step: i32) -> RevealStep {
        if self.is_whitespace {
            RevealStep::Whitespace
        } else if self.reveal_delay > 0 {
            self.reveal_delay -= step;
            RevealStep::Hidden
        } else if self.is_revealed {
            RevealStep::Revealed
        } else {
            self.is_revealed = true;
            RevealStep::JustRevealed
        }
    }
}
