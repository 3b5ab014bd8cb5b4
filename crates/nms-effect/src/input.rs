// SPDX-License-Identifier: MIT
//
// Input reader.
//
// Text comes from, in order: the command-line argument, a pipe on stdin, or
// an interactive one-line prompt. Piped bytes are decoded leniently and run
// through `fix_encoding`, which repairs box-drawing characters that were
// decoded with the wrong code page somewhere upstream (`tree` output that
// passed through a Windows console, typically).

use std::io::{self, BufRead, Read, Write};

use tracing::debug;

use crate::error::InputError;

/// Prompt shown when reading interactively.
pub const PROMPT: &str = "Enter text: ";

/// Known mis-decodings of box-drawing glyphs, longest first so the
/// three-glyph tree branches are matched before their single pieces.
const GARBLED: [(&str, &str); 12] = [
    // UTF-8 bytes read as CP437.
    ("Γö£ΓöÇΓöÇ", "├──"),
    ("ΓööΓöÇΓöÇ", "└──"),
    ("Γöé", "│"),
    ("ΓöÇ", "─"),
    ("Γö£", "├"),
    ("Γöö", "└"),
    // UTF-8 bytes read as Windows-1252.
    ("â\"œâ\"€â\"€", "├──"),
    ("â\"‚", "│"),
    ("â\"\"â\"€â\"€", "└──"),
    ("â\"€", "─"),
    ("â\"œ", "├"),
    ("â\"\"", "└"),
];

/// Replace known garbled box-drawing sequences with the intended glyphs.
#[must_use]
pub fn fix_encoding(text: &str) -> String {
    GARBLED
        .iter()
        .fold(text.to_string(), |acc, (bad, good)| acc.replace(bad, good))
}

/// Read all of `reader` as lossy UTF-8 and repair its encoding.
///
/// # Errors
///
/// Any I/O error from `reader`.
pub fn read_piped(mut reader: impl Read) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!(bytes = bytes.len(), "read piped input");
    Ok(fix_encoding(&String::from_utf8_lossy(&bytes)))
}

/// Show [`PROMPT`] on `prompt_out` and read one line from `input`, without
/// its line ending.
///
/// # Errors
///
/// Any I/O error writing the prompt or reading the line.
pub fn read_prompted(mut input: impl BufRead, mut prompt_out: impl Write) -> io::Result<String> {
    prompt_out.write_all(PROMPT.as_bytes())?;
    prompt_out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Resolve the text to decrypt.
///
/// A non-empty `arg` wins. Otherwise stdin is read to the end when piped,
/// or prompted for one line when it is a terminal.
///
/// # Errors
///
/// [`InputError::Empty`] when the result has no non-whitespace characters,
/// [`InputError::Io`] when stdin can't be read.
pub fn read_input(arg: Option<String>, stdin_is_tty: bool) -> Result<String, InputError> {
    let text = match arg {
        Some(text) if !text.is_empty() => text,
        _ if stdin_is_tty => read_prompted(io::stdin().lock(), io::stderr())?,
        _ => read_piped(io::stdin().lock())?,
    };
    non_blank(text)
}

fn non_blank(text: String) -> Result<String, InputError> {
    if text.trim().is_empty() {
        Err(InputError::Empty)
    } else {
        Ok(text)
    }
}
