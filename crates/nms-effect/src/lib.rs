// SPDX-License-Identifier: MIT

//! # nms-effect — Reveal engine for nms
//!
//! Everything between "a string" and "a decrypting terminal":
//!
//! - **[`scanner`]** — splits text into visible characters and ANSI tokens,
//!   tracking the active color
//! - **[`width`]** — display width (1 or 2 columns) of a character
//! - **[`charset`]** — the 256-glyph scramble table and its charset modes
//! - **[`record`]** — `RevealRecord`, the per-character reveal state
//! - **[`builder`]** — builds records from scanned text and clusters their
//!   reveal delays
//! - **[`config`]** — `EffectConfig`, validated options
//! - **[`engine`]** — `Effect`, the TypeOut → Jumble → Reveal animation
//! - **[`input`]** — argument / pipe / prompt input with encoding repair
//! - **[`sneakers`]** — the menu screen from the film
//! - **[`error`]** — error types

pub mod builder;
pub mod charset;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod record;
pub mod scanner;
pub mod sneakers;
pub mod width;

pub use charset::CharsetMode;
pub use config::EffectConfig;
pub use engine::{Effect, Outcome, Phase, Timing};
pub use error::{ConfigError, EffectError, InputError};
pub use record::RevealRecord;
