// SPDX-License-Identifier: MIT

//! Property tests for the scanner, the record builder, and the reveal
//! countdown:
//!
//! 1. One record per visible character; escape tokens contribute none.
//! 2. Stripping tokens and re-scanning gives the same characters.
//! 3. Without space masking, whitespace is protected and shown as itself.
//! 4. With space masking, only the literal space loses protection.
//! 5. Pre-clustering delays lie in 1000..=6000.
//! 6. Once revealed, a record stays revealed, and every record gets there.

use nms_effect::builder::{DELAY_RANGE, build, build_unclustered};
use nms_effect::engine::REVEAL_STEP;
use nms_effect::scanner::{scan, strip_escapes};
use nms_effect::{CharsetMode, EffectConfig};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Plain text (no ESC) interleaved with well-formed CSI tokens.
fn ansi_text() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        3 => "[^\x1b]{0,12}",
        1 => "\x1b\\[[0-9;]{0,8}[A-Za-z]",
        1 => Just("\x1b[0m".to_string()),
    ];
    prop::collection::vec(segment, 0..12).prop_map(|parts| parts.concat())
}

fn charset() -> impl Strategy<Value = CharsetMode> {
    prop::sample::select(CharsetMode::ALL.to_vec())
}

fn config(mask_blank: bool, preserve: bool, mode: CharsetMode) -> EffectConfig {
    let mut c = EffectConfig::new();
    c.set_mask_blank(mask_blank);
    c.set_preserve_colors(preserve);
    c.set_charset(mode);
    c
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Scanner
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn one_record_per_visible_char(
        text in ansi_text(),
        preserve in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let cfg = config(false, preserve, CharsetMode::Full);
        let scanned = scan(&text, preserve);
        let records = build(&scanned, &cfg, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(records.len(), strip_escapes(&text).chars().count());
        let sources: String = records.iter().map(|r| r.source).collect();
        prop_assert_eq!(sources, strip_escapes(&text));
    }

    #[test]
    fn strip_then_rescan_matches(text in ansi_text()) {
        let direct: Vec<char> = scan(&text, true).iter().map(|s| s.ch).collect();
        let stripped: Vec<char> = scan(&strip_escapes(&text), true).iter().map(|s| s.ch).collect();
        prop_assert_eq!(direct, stripped);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–5. Builder
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn whitespace_protected_without_masking(
        text in "[ \t\na-z]{0,40}",
        mode in charset(),
        seed in any::<u64>(),
    ) {
        let cfg = config(false, false, mode);
        let records = build(&scan(&text, false), &cfg, &mut StdRng::seed_from_u64(seed));
        for r in records.iter().filter(|r| r.source.is_whitespace()) {
            prop_assert!(r.is_whitespace);
            prop_assert_eq!(r.mask, r.source);
        }
    }

    #[test]
    fn masking_only_unprotects_spaces(
        text in "[ \t\na-z]{0,40}",
        mode in charset(),
        seed in any::<u64>(),
    ) {
        let cfg = config(true, false, mode);
        let records = build(&scan(&text, false), &cfg, &mut StdRng::seed_from_u64(seed));
        for r in &records {
            match r.source {
                ' ' => {
                    prop_assert!(!r.is_whitespace);
                    prop_assert!(mode.glyphs().contains(&r.mask));
                }
                '\t' | '\n' => prop_assert!(r.is_whitespace),
                _ => prop_assert!(!r.is_whitespace),
            }
        }
    }

    #[test]
    fn initial_delays_in_range(text in "[a-z ]{1,80}", seed in any::<u64>()) {
        let cfg = EffectConfig::new();
        let records = build_unclustered(&scan(&text, false), &cfg, &mut StdRng::seed_from_u64(seed));
        for r in &records {
            prop_assert!(DELAY_RANGE.contains(&r.reveal_delay), "delay {}", r.reveal_delay);
            prop_assert!(!r.is_revealed);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Reveal countdown
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reveal_is_monotonic_and_terminates(text in "[a-z \t]{1,40}", seed in any::<u64>()) {
        let cfg = EffectConfig::new();
        let mut records = build(&scan(&text, false), &cfg, &mut StdRng::seed_from_u64(seed));

        // Clustered delays top out at 6200; a few passes of slack past that.
        let passes = (DELAY_RANGE.end() + 200) / REVEAL_STEP + 3;
        let mut seen = vec![false; records.len()];
        for _ in 0..passes {
            for (r, was) in records.iter_mut().zip(seen.iter_mut()) {
                r.advance(REVEAL_STEP);
                prop_assert!(!*was || r.is_revealed);
                *was = r.is_revealed;
            }
        }
        prop_assert!(records.iter().all(|r| r.is_whitespace || r.is_revealed));
    }
}
