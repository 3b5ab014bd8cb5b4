// SPDX-License-Identifier: MIT
//
// Reveal-state builder.
//
// Turns scanned characters into `RevealRecord`s: a scramble mask, a display
// width, a random reveal delay, and the captured color. A clustering pass
// then pulls neighbouring delays together so characters pop in small bursts
// instead of one at a time.

use rand::Rng;

use crate::charset::scramble_char;
use crate::config::EffectConfig;
use crate::record::RevealRecord;
use crate::scanner::Scanned;
use crate::width::char_width;

/// Initial reveal delay range, in animation time units.
pub const DELAY_RANGE: std::ops::RangeInclusive<i32> = 1000..=6000;

/// Chance that a record seeds a cluster.
pub const CLUSTER_PROBABILITY: f64 = 0.3;

/// Cluster size drawn per seed (before halving into a radius).
const CLUSTER_SPAN: std::ops::RangeInclusive<usize> = 1..=3;

/// Jitter applied to each clustered delay.
const CLUSTER_JITTER: std::ops::RangeInclusive<i32> = -200..=200;

/// Whether `ch` is protected whitespace under the given masking setting.
///
/// With `mask_blank` on, only the literal space becomes maskable; tabs,
/// newlines and other whitespace stay protected so the layout holds.
#[must_use]
pub fn is_protected_whitespace(ch: char, mask_blank: bool) -> bool {
    ch.is_whitespace() && !(mask_blank && ch == ' ')
}

/// Build one record per scanned character, then cluster their delays.
pub fn build<R: Rng + ?Sized>(
    scanned: &[Scanned],
    config: &EffectConfig,
    rng: &mut R,
) -> Vec<RevealRecord> {
    let mut records = build_unclustered(scanned, config, rng);
    cluster(&mut records, rng);
    records
}

/// The records as built, before clustering.
pub fn build_unclustered<R: Rng + ?Sized>(
    scanned: &[Scanned],
    config: &EffectConfig,
    rng: &mut R,
) -> Vec<RevealRecord> {
    scanned
        .iter()
        .map(|s| {
            let is_whitespace = is_protected_whitespace(s.ch, config.mask_blank());
            let mask = if is_whitespace {
                s.ch
            } else {
                scramble_char(config.charset(), rng)
            };
            RevealRecord {
                source: s.ch,
                mask,
                width: char_width(s.ch),
                is_whitespace,
                reveal_delay: rng.gen_range(DELAY_RANGE),
                is_revealed: false,
                original_color: if config.preserve_colors() {
                    s.color.clone()
                } else {
                    None
                },
            }
        })
        .collect()
}

/// Synchronize nearby reveal delays.
///
/// Each non-whitespace record, with probability [`CLUSTER_PROBABILITY`],
/// draws a span `k` in 1..=3 and sets every non-whitespace record in
/// `i - k/2 ..= i + k/2` to its own pre-clustering delay plus jitter. Later
/// clusters overwrite earlier ones where they overlap.
pub fn cluster<R: Rng + ?Sized>(records: &mut [RevealRecord], rng: &mut R) {
    let original: Vec<i32> = records.iter().map(|r| r.reveal_delay).collect();
    let len = records.len();

    for i in 0..len {
        if records[i].is_whitespace || !rng.gen_bool(CLUSTER_PROBABILITY) {
            continue;
        }
        let half = rng.gen_range(CLUSTER_SPAN) / 2;
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(len - 1);
        for r in &mut records[lo..=hi] {
            if !r.is_whitespace {
                r.reveal_delay = original[i] + rng.gen_range(CLUSTER_JITTER);
            }
        }
    }
}
