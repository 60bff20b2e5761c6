//! Byte-level differencing between two converted frames.
//!
//! A frame transition is the list of RAM bytes that change between two page-major buffers.
//! Transmitting only those bytes is what makes animation playback viable on a slow bus; see
//! `gfx::playback` for the two ways a transition can be materialized on the panel.

#[cfg(feature = "std")]
use log::debug;

#[cfg(feature = "std")]
use crate::error::Error;
#[cfg(feature = "std")]
use crate::gfx::layout::PageMajorBuffer;

/// One changed byte: the linear RAM address and the value the new frame holds there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffEntry {
    pub addr: u16,
    pub value: u8,
}

/// An ordered list of byte changes between two frames of identical geometry. Entries are strictly
/// ascending by address; playback and emission rely on that ordering.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameDiff {
    entries: Vec<DiffEntry>,
}

#[cfg(feature = "std")]
impl FrameDiff {
    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the changes that turn the frame `prev` into the frame `next`. The two buffers must
/// describe the same display geometry.
#[cfg(feature = "std")]
pub fn diff(prev: &PageMajorBuffer, next: &PageMajorBuffer) -> Result<FrameDiff, Error> {
    if prev.width() != next.width() || prev.pages() != next.pages() {
        return Err(Error::DimensionMismatch);
    }
    diff_bytes(prev.as_bytes(), next.as_bytes())
}

/// Compute the changes that turn the byte buffer `prev` into `next`, for diffing a new frame
/// against a raw shadow buffer. The buffers must have identical length.
///
/// This is a dense linear scan, deliberately: frames are a few hundred bytes, so anything
/// cleverer costs more than it saves. The scan order makes the result ascending by address.
#[cfg(feature = "std")]
pub fn diff_bytes(prev: &[u8], next: &[u8]) -> Result<FrameDiff, Error> {
    if prev.len() != next.len() {
        return Err(Error::DimensionMismatch);
    }
    if prev.len() > usize::from(u16::MAX) + 1 {
        return Err(Error::OutOfRange);
    }
    let mut entries = Vec::new();
    for (addr, (&p, &n)) in prev.iter().zip(next.iter()).enumerate() {
        if p != n {
            entries.push(DiffEntry {
                addr: addr as u16,
                value: n,
            });
        }
    }
    debug!("{} of {} bytes changed", entries.len(), prev.len());
    Ok(FrameDiff { entries })
}
