// SPDX-License-Identifier: MIT
//
// Frame buffer.
//
// Every frame of the effect redraws the whole text from the home position.
// Sent character by character that is thousands of tiny writes per frame
// and visible tearing on slow terminals, so a frame is collected here and
// handed to the terminal in one write.

use std::io::{self, Write};

/// Room for a full 80×24 screen where every cell is a revealed character
/// wrapped in its own color and reset.
const FRAME_CAPACITY: usize = 16_384;

/// Bytes of one frame, waiting to be written out.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(FRAME_CAPACITY),
        }
    }

    /// Append `ch` UTF-8 encoded.
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.buf
            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Append a one-column glyph followed by enough spaces to fill `width`
    /// columns, so a narrow stand-in covers the wide character it hides.
    pub fn write_char_padded(&mut self, ch: char, width: u8) {
        self.write_char(ch);
        let pad = usize::from(width.saturating_sub(1));
        self.buf.resize(self.buf.len() + pad, b' ');
    }

    /// Drop pending bytes. Capacity is kept for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Hand the frame to `w` in one write, flush `w`, and start over empty.
    ///
    /// # Errors
    ///
    /// Whatever writing to or flushing `w` reports. The buffer is left
    /// untouched when the write fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            self.buf.clear();
        }
        w.flush()
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Nothing leaves the buffer until [`OutputBuffer::flush_to`].
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
