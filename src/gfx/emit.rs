//! Rendering of converted assets as Rust source text, for baking frames and transitions into a
//! firmware image as constants.
//!
//! The emitted constants reproduce the byte content and ordering of the in-memory structures
//! exactly; the generated file is expected to `use` this crate's `Transition` and `DiffEntry`
//! types. Wrapping the output in a module, adding attributes, and writing it to disk are the
//! packaging script's business, not this module's.

use core::fmt::{self, Write};

use crate::gfx::diff::FrameDiff;
use crate::gfx::layout::PageMajorBuffer;

/// Render a converted frame as a byte-array constant named `name`, 8 bytes per line.
pub fn emit_keyframe<W: Write>(out: &mut W, name: &str, frame: &PageMajorBuffer) -> fmt::Result {
    writeln!(out, "pub static {}: [u8; {}] = [", name, frame.len())?;
    for chunk in frame.as_bytes().chunks(8) {
        write!(out, "   ")?;
        for byte in chunk {
            write!(out, " 0x{:02x},", byte)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "];")
}

/// Render a frame transition as a `Transition` constant named `name`, holding the display
/// duration and the diff entries in ascending address order, 4 entries per line.
pub fn emit_transition<W: Write>(
    out: &mut W,
    name: &str,
    delay_ms: u16,
    diff: &FrameDiff,
) -> fmt::Result {
    writeln!(out, "pub static {}: Transition<'static> = Transition {{", name)?;
    writeln!(out, "    delay_ms: {},", delay_ms)?;
    writeln!(out, "    changes: &[")?;
    for chunk in diff.entries().chunks(4) {
        write!(out, "       ")?;
        for entry in chunk {
            write!(
                out,
                " DiffEntry {{ addr: {}, value: 0x{:02x} }},",
                entry.addr, entry.value
            )?;
        }
        writeln!(out)?;
    }
    writeln!(out, "    ],")?;
    writeln!(out, "}};")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::PixelCoord;
    use crate::gfx::diff::diff;
    use crate::gfx::layout::{convert, SourceBitmap};

    fn sample_frames() -> (PageMajorBuffer, PageMajorBuffer) {
        let zero = [0u8; 16];
        let mut one = [0u8; 16];
        one[5 * 2] = 1 << 3;
        let prev = convert(&SourceBitmap::new(PixelCoord(16, 8), &zero).unwrap()).unwrap();
        let next = convert(&SourceBitmap::new(PixelCoord(16, 8), &one).unwrap()).unwrap();
        (prev, next)
    }

    #[test]
    fn keyframe_text() {
        let (_, next) = sample_frames();
        let mut out = String::new();
        emit_keyframe(&mut out, "SPINNER_KEY", &next).unwrap();
        assert_eq!(
            out,
            "pub static SPINNER_KEY: [u8; 16] = [\n\
             \x20   0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00,\n\
             \x20   0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,\n\
             ];\n"
        );
    }

    #[test]
    fn transition_text() {
        let (prev, next) = sample_frames();
        let changes = diff(&prev, &next).unwrap();
        let mut out = String::new();
        emit_transition(&mut out, "SPINNER_T1", 500, &changes).unwrap();
        assert_eq!(
            out,
            "pub static SPINNER_T1: Transition<'static> = Transition {\n\
             \x20   delay_ms: 500,\n\
             \x20   changes: &[\n\
             \x20       DiffEntry { addr: 3, value: 0x20 },\n\
             \x20   ],\n\
             };\n"
        );
    }

    #[test]
    fn empty_transition_text() {
        let (prev, _) = sample_frames();
        let changes = diff(&prev, &prev).unwrap();
        let mut out = String::new();
        emit_transition(&mut out, "HOLD", 1000, &changes).unwrap();
        assert_eq!(
            out,
            "pub static HOLD: Transition<'static> = Transition {\n\
             \x20   delay_ms: 1000,\n\
             \x20   changes: &[\n\
             \x20   ],\n\
             };\n"
        );
    }
}
