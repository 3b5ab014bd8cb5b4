// SPDX-License-Identifier: MIT
//
// Animation engine.
//
// Drives one decryption run over a terminal:
//
//   TypeOut  the scrambled text is typed in, one character at a time
//   Jumble   the whole text flickers through fresh random glyphs
//   Reveal   each character counts down and flips to its real value
//   Done     cursor shown, one last keypress
//
// The screen is saved on entry and restored on every exit path: normal
// completion, interrupt, or a failed write. Each redraw is assembled in an
// `OutputBuffer` and written in one go.
//
// Cancellation is cooperative. Pauses are sliced and check the
// `CancelToken` between slices, so a Ctrl-C during any phase reaches the
// restore sequence within a few milliseconds.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use nms_term::ansi;
use nms_term::output::OutputBuffer;
use nms_term::{CancelToken, KeyRead, KeySource, Style};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::builder;
use crate::charset::scramble_char;
use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::record::{RevealRecord, RevealStep};
use crate::scanner::scan;

/// Countdown decrement per reveal pass.
pub const REVEAL_STEP: i32 = 50;

/// Longest single sleep between cancellation checks.
const PAUSE_SLICE: Duration = Duration::from_millis(10);

// ─── Timing ──────────────────────────────────────────────────────────────────

/// Every wall-clock interval the animation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Between characters while typing out.
    pub type_out: Duration,
    /// Before the jumble, when auto-decrypting.
    pub auto_pause: Duration,
    /// Total length of the jumble phase.
    pub jumble: Duration,
    /// Between jumble frames.
    pub jumble_frame: Duration,
    /// Between reveal passes where nothing flipped.
    pub reveal_frame: Duration,
    /// Between reveal passes where something flipped.
    pub reveal_dwell: Duration,
    /// Stand-in for a keypress when no keyboard is available.
    pub key_fallback: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            type_out: Duration::from_millis(4),
            auto_pause: Duration::from_secs(1),
            jumble: Duration::from_secs(2),
            jumble_frame: Duration::from_millis(35),
            reveal_frame: Duration::from_millis(50),
            reveal_dwell: Duration::from_millis(150),
            key_fallback: Duration::from_secs(2),
        }
    }
}

impl Timing {
    /// No pauses at all. The jumble still draws one frame.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            type_out: Duration::ZERO,
            auto_pause: Duration::ZERO,
            jumble: Duration::ZERO,
            jumble_frame: Duration::ZERO,
            reveal_frame: Duration::ZERO,
            reveal_dwell: Duration::ZERO,
            key_fallback: Duration::ZERO,
        }
    }
}

// ─── Phase / Outcome ─────────────────────────────────────────────────────────

/// Where the animation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TypeOut,
    Jumble,
    Reveal,
    Done,
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All three phases ran and the final keypress arrived.
    Completed,
    /// The input had no visible non-whitespace text; nothing was drawn.
    NothingToReveal,
}

// ─── Effect ──────────────────────────────────────────────────────────────────

/// The decryption effect: configuration, timing, and a random source.
pub struct Effect<R = StdRng> {
    config: EffectConfig,
    timing: Timing,
    rng: R,
    phase: Phase,
}

impl Effect<StdRng> {
    /// An effect with default timing and an entropy-seeded RNG.
    #[must_use]
    pub fn new(config: EffectConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Effect<R> {
    /// An effect drawing all randomness from `rng`.
    pub fn with_rng(config: EffectConfig, rng: R) -> Self {
        Self {
            config,
            timing: Timing::default(),
            rng,
            phase: Phase::TypeOut,
        }
    }

    /// Replace the timing.
    #[must_use]
    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// The phase the last run reached.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the full animation for `text` on `out`.
    ///
    /// `keys` supplies the keypresses the animation waits for; `cancel` is
    /// polled between frames and during every pause.
    ///
    /// # Errors
    ///
    /// [`EffectError::Interrupted`] if `cancel` fired or the key source
    /// reported an interrupt; [`EffectError::Io`] if writing to `out`
    /// failed. In both cases the restore sequence has already been written
    /// (as far as `out` still accepts bytes).
    pub fn execute<W, K>(
        &mut self,
        text: &str,
        out: &mut W,
        keys: &mut K,
        cancel: &CancelToken,
    ) -> Result<Outcome, EffectError>
    where
        W: Write,
        K: KeySource + ?Sized,
    {
        let scanned = scan(text, self.config.preserve_colors());
        if scanned.iter().all(|s| s.ch.is_whitespace()) {
            debug!("input is blank, nothing to reveal");
            return Ok(Outcome::NothingToReveal);
        }

        let mut records = builder::build(&scanned, &self.config, &mut self.rng);
        debug!(records = records.len(), "built reveal state");

        let mut buf = OutputBuffer::new();
        let result = self
            .enter(&mut buf, out)
            .map_err(EffectError::from)
            .and_then(|()| self.run(&mut records, &mut buf, out, keys, cancel));

        buf.clear();
        let restored = leave(&mut buf, out);

        match (result, restored) {
            (Err(e), _) => {
                debug!(error = %e, phase = ?self.phase, "animation stopped early");
                Err(e)
            }
            (Ok(_), Err(e)) => Err(e.into()),
            (Ok(outcome), Ok(())) => Ok(outcome),
        }
    }

    // ─── Phases ──────────────────────────────────────────────────────────

    fn enter<W: Write>(&self, buf: &mut OutputBuffer, out: &mut W) -> std::io::Result<()> {
        if self.config.clear_screen() {
            ansi::clear_screen(buf)?;
            ansi::cursor_home(buf)?;
        }
        ansi::save_screen(buf)?;
        ansi::clear_screen(buf)?;
        ansi::cursor_home(buf)?;
        ansi::cursor_hide(buf)?;
        buf.flush_to(out)
    }

    fn run<W, K>(
        &mut self,
        records: &mut [RevealRecord],
        buf: &mut OutputBuffer,
        out: &mut W,
        keys: &mut K,
        cancel: &CancelToken,
    ) -> Result<Outcome, EffectError>
    where
        W: Write,
        K: KeySource + ?Sized,
    {
        self.set_phase(Phase::TypeOut);
        self.type_out(records, buf, out, cancel)?;

        if self.config.auto_decrypt() {
            pause(self.timing.auto_pause, cancel)?;
        } else {
            self.wait_for_key(keys, cancel)?;
        }

        self.set_phase(Phase::Jumble);
        self.jumble(records, buf, out, cancel)?;

        self.set_phase(Phase::Reveal);
        self.reveal(records, buf, out, cancel)?;

        self.set_phase(Phase::Done);
        ansi::cursor_show(buf)?;
        buf.flush_to(out)?;
        self.wait_for_key(keys, cancel)?;

        Ok(Outcome::Completed)
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    fn type_out<W: Write>(
        &self,
        records: &[RevealRecord],
        buf: &mut OutputBuffer,
        out: &mut W,
        cancel: &CancelToken,
    ) -> Result<(), EffectError> {
        ansi::cursor_home(buf)?;
        for r in records {
            draw_hidden(buf, r, r.mask);
            buf.flush_to(out)?;
            pause(self.timing.type_out, cancel)?;
        }
        Ok(())
    }

    fn jumble<W: Write>(
        &mut self,
        records: &[RevealRecord],
        buf: &mut OutputBuffer,
        out: &mut W,
        cancel: &CancelToken,
    ) -> Result<(), EffectError> {
        let charset = self.config.charset();
        let start = Instant::now();
        loop {
            ansi::cursor_home(buf)?;
            for r in records {
                let glyph = scramble_char(charset, &mut self.rng);
                draw_hidden(buf, r, glyph);
            }
            buf.flush_to(out)?;
            pause(self.timing.jumble_frame, cancel)?;
            if start.elapsed() >= self.timing.jumble {
                return Ok(());
            }
        }
    }

    fn reveal<W: Write>(
        &mut self,
        records: &mut [RevealRecord],
        buf: &mut OutputBuffer,
        out: &mut W,
        cancel: &CancelToken,
    ) -> Result<(), EffectError> {
        let charset = self.config.charset();
        let style = self.config.reveal_style();
        let preserve = self.config.preserve_colors();
        let mut passes = 0u32;

        loop {
            ansi::cursor_home(buf)?;
            let mut all_revealed = true;
            let mut any_changed = false;

            for r in records.iter_mut() {
                let step = r.advance(REVEAL_STEP);
                if step.shows_source() {
                    any_changed |= step == RevealStep::JustRevealed;
                    draw_revealed(buf, r, style, preserve)?;
                } else if step == RevealStep::Hidden {
                    if self.rng.gen_ratio(1, 6) {
                        r.mask = scramble_char(charset, &mut self.rng);
                    }
                    buf.write_char_padded(r.mask, r.width);
                    all_revealed = false;
                } else {
                    buf.write_char(r.source);
                }
            }
            buf.flush_to(out)?;
            passes += 1;

            if all_revealed {
                debug!(passes, "all characters revealed");
                return Ok(());
            }
            let wait = if any_changed {
                self.timing.reveal_dwell
            } else {
                self.timing.reveal_frame
            };
            pause(wait, cancel)?;
        }
    }

    // ─── Waiting ─────────────────────────────────────────────────────────

    fn wait_for_key<K: KeySource + ?Sized>(
        &self,
        keys: &mut K,
        cancel: &CancelToken,
    ) -> Result<(), EffectError> {
        if cancel.is_cancelled() {
            return Err(EffectError::Interrupted);
        }
        match keys.read_key() {
            KeyRead::Key(_) if !cancel.is_cancelled() => Ok(()),
            KeyRead::Key(_) | KeyRead::Interrupt => Err(EffectError::Interrupted),
            KeyRead::Unavailable => {
                debug!("no keyboard, pausing instead");
                pause(self.timing.key_fallback, cancel)
            }
        }
    }
}

/// Sleep for `d` in short slices, bailing out as soon as `cancel` fires.
fn pause(d: Duration, cancel: &CancelToken) -> Result<(), EffectError> {
    let deadline = Instant::now() + d;
    loop {
        if cancel.is_cancelled() {
            return Err(EffectError::Interrupted);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        thread::sleep((deadline - now).min(PAUSE_SLICE));
    }
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

/// A record as it looks while hidden: whitespace as itself, everything else
/// as `glyph` padded to the source's width.
fn draw_hidden(buf: &mut OutputBuffer, r: &RevealRecord, glyph: char) {
    if r.is_whitespace {
        buf.write_char(r.source);
    } else {
        buf.write_char_padded(glyph, r.width);
    }
}

/// A revealed record: its own color (when preserved) or the reveal style,
/// the source character, then a reset.
fn draw_revealed(
    buf: &mut OutputBuffer,
    r: &RevealRecord,
    style: Style,
    preserve: bool,
) -> std::io::Result<()> {
    match r.original_color.as_deref() {
        Some(color) if preserve && !color.is_empty() => buf.write_all(color.as_bytes())?,
        _ => ansi::style(buf, style)?,
    }
    buf.write_char(r.source);
    ansi::reset(buf)
}

/// Show the cursor, restore the saved screen, flush.
fn leave<W: Write>(buf: &mut OutputBuffer, out: &mut W) -> std::io::Result<()> {
    ansi::cursor_show(buf)?;
    ansi::restore_screen(buf)?;
    buf.flush_to(out)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::io;

    /// Keypresses from a script; `Unavailable` once it runs dry.
    struct ScriptedKeys {
        script: VecDeque<KeyRead>,
        reads: usize,
    }

    impl ScriptedKeys {
        fn new(script: &[KeyRead]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                reads: 0,
            }
        }
    }

    impl KeySource for ScriptedKeys {
        fn read_key(&mut self) -> KeyRead {
            self.reads += 1;
            self.script.pop_front().unwrap_or(KeyRead::Unavailable)
        }
    }

    /// Accepts `limit` bytes, then fails every write.
    struct Choke {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for Choke {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn effect(config: EffectConfig) -> Effect<StdRng> {
        Effect::with_rng(config, StdRng::seed_from_u64(7)).with_timing(Timing::instant())
    }

    fn auto() -> EffectConfig {
        let mut c = EffectConfig::new();
        c.set_auto_decrypt(true);
        c
    }

    fn run(
        fx: &mut Effect<StdRng>,
        text: &str,
        keys: &mut ScriptedKeys,
        cancel: &CancelToken,
    ) -> (Result<Outcome, EffectError>, String) {
        let mut out = Vec::new();
        let result = fx.execute(text, &mut out, keys, cancel);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    const RESTORE: &str = "\x1b[?25h\x1b[?47l";

    #[test]
    fn auto_decrypt_completes() {
        let mut fx = effect(auto());
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'q')]);
        let (result, out) = run(&mut fx, "Hi", &mut keys, &CancelToken::new());

        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(keys.reads, 1, "only the final keypress is read");
        assert_eq!(fx.phase(), Phase::Done);
        assert!(out.starts_with("\x1b[?47h\x1b[2J\x1b[H\x1b[?25l"));
        assert!(out.contains("\x1b[1;34mH\x1b[0m"));
        assert!(out.contains("\x1b[1;34mi\x1b[0m"));
        assert!(out.ends_with(RESTORE));
    }

    #[test]
    fn keypress_mode_waits_twice() {
        let mut fx = effect(EffectConfig::new());
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b' '), KeyRead::Key(b'\r')]);
        let (result, _) = run(&mut fx, "abc", &mut keys, &CancelToken::new());
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(keys.reads, 2);
    }

    #[test]
    fn blank_input_draws_nothing() {
        for text in ["", "   ", "\n\t ", "\x1b[31m  \x1b[0m"] {
            let mut fx = effect(auto());
            let mut keys = ScriptedKeys::new(&[]);
            let (result, out) = run(&mut fx, text, &mut keys, &CancelToken::new());
            assert_eq!(result.unwrap(), Outcome::NothingToReveal, "{text:?}");
            assert_eq!(out, "");
            assert_eq!(keys.reads, 0);
        }
    }

    #[test]
    fn cancelled_before_start_still_restores() {
        let mut fx = effect(auto());
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut keys = ScriptedKeys::new(&[]);
        let (result, out) = run(&mut fx, "secret", &mut keys, &cancel);

        assert!(result.unwrap_err().is_interrupt());
        assert!(out.ends_with(RESTORE));
        assert_eq!(fx.phase(), Phase::TypeOut);
    }

    #[test]
    fn interrupt_key_stops_before_jumble() {
        let mut fx = effect(EffectConfig::new());
        let mut keys = ScriptedKeys::new(&[KeyRead::Interrupt]);
        let (result, out) = run(&mut fx, "secret", &mut keys, &CancelToken::new());

        assert!(matches!(result, Err(EffectError::Interrupted)));
        assert_eq!(fx.phase(), Phase::TypeOut);
        assert!(!out.contains("\x1b[1;34m"));
        assert!(out.ends_with(RESTORE));
    }

    #[test]
    fn unavailable_keyboard_falls_back_to_pause() {
        let mut fx = effect(EffectConfig::new());
        let mut keys = ScriptedKeys::new(&[]);
        let (result, out) = run(&mut fx, "ok", &mut keys, &CancelToken::new());
        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(keys.reads, 2);
        assert!(out.ends_with(RESTORE));
    }

    #[test]
    fn whitespace_is_drawn_verbatim() {
        let mut fx = effect(auto());
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'x')]);
        let (result, out) = run(&mut fx, "a\tb", &mut keys, &CancelToken::new());
        result.unwrap();
        assert!(out.contains("\x1b[1;34ma\x1b[0m\t\x1b[1;34mb\x1b[0m"));
    }

    #[test]
    fn preserved_color_wins_over_reveal_style() {
        let mut cfg = auto();
        cfg.set_preserve_colors(true);
        cfg.set_foreground(nms_term::NamedColor::Green);
        let mut fx = effect(cfg);
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'x')]);
        let (result, out) = run(&mut fx, "\x1b[31mR\x1b[0mX", &mut keys, &CancelToken::new());
        result.unwrap();
        assert!(out.contains("\x1b[31mR\x1b[0m"));
        assert!(out.contains("\x1b[1;32mX\x1b[0m"));
    }

    #[test]
    fn custom_hex_color_is_used() {
        let mut cfg = auto();
        cfg.set_hex_color("#FF8800").unwrap();
        let mut fx = effect(cfg);
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'x')]);
        let (_, out) = run(&mut fx, "Z", &mut keys, &CancelToken::new());
        assert!(out.contains("\x1b[1;38;2;255;136;0mZ\x1b[0m"));
    }

    #[test]
    fn clear_screen_precedes_save() {
        let mut cfg = auto();
        cfg.set_clear_screen(true);
        let mut fx = effect(cfg);
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'x')]);
        let (_, out) = run(&mut fx, "Z", &mut keys, &CancelToken::new());
        assert!(out.starts_with("\x1b[2J\x1b[H\x1b[?47h"));
    }

    #[test]
    fn wide_characters_keep_their_footprint() {
        let mut fx = effect(auto());
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'x')]);
        let (_, out) = run(&mut fx, "中", &mut keys, &CancelToken::new());
        // The type-out frame is the mask plus one column of padding.
        let typed = out
            .strip_prefix("\x1b[?47h\x1b[2J\x1b[H\x1b[?25l\x1b[H")
            .unwrap();
        let mut chars = typed.chars();
        chars.next();
        assert_eq!(chars.next(), Some(' '));
    }

    #[test]
    fn write_failure_is_reported() {
        let mut fx = effect(auto());
        let mut out = Choke {
            written: Vec::new(),
            limit: 40,
        };
        let mut keys = ScriptedKeys::new(&[KeyRead::Key(b'x')]);
        let result = fx.execute("a longer secret message", &mut out, &mut keys, &CancelToken::new());
        assert!(matches!(result, Err(EffectError::Io(_))));
    }

    #[test]
    fn reveal_is_monotonic() {
        let cfg = auto();
        let mut rng = StdRng::seed_from_u64(99);
        let mut records = builder::build(&scan("decrypt me", false), &cfg, &mut rng);
        let mut was_revealed = vec![false; records.len()];
        for _ in 0..200 {
            for (r, seen) in records.iter_mut().zip(&mut was_revealed) {
                r.advance(REVEAL_STEP);
                assert!(!*seen || r.is_revealed);
                *seen = r.is_revealed;
            }
        }
        assert!(records.iter().all(|r| r.is_whitespace || r.is_revealed));
    }

    #[test]
    fn default_timing_matches_the_film_pace() {
        let t = Timing::default();
        assert_eq!(t.type_out, Duration::from_millis(4));
        assert_eq!(t.jumble, Duration::from_secs(2));
        assert_eq!(t.reveal_dwell, Duration::from_millis(150));
    }
}
