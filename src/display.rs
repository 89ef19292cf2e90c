//! Frame output
//!
//! Frames are drawn by scrolling: `rows` blank lines push the previous
//! frame out of view, then every row is written top to bottom.

use std::fmt::Write as _;
use std::io::{self, Write};
use crate::rasterizer::FrameBuffer;

/// Write one frame to `out` and flush it
pub fn write_frame<W: Write>(fb: &FrameBuffer, out: &mut W) -> io::Result<()> {
    out.write_all(frame_to_string(fb).as_bytes())?;
    out.flush()
}

/// The exact bytes [`write_frame`] emits
pub fn frame_to_string(fb: &FrameBuffer) -> String {
    // ~10 bytes of escape codes per cell
    let mut s = String::with_capacity(fb.height * (fb.width * 12 + 2));
    for _ in 0..fb.height {
        s.push('\n');
    }
    for row in fb.rows().take(fb.height) {
        for cell in row {
            // Writing into a String cannot fail
            let _ = write!(s, "{}", cell);
        }
        s.push('\n');
    }
    s
}
