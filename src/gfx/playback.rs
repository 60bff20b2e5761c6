//! Animation playback: a shadow copy of the controller's RAM, precompiled frame transitions, and
//! the two transmission strategies for materializing a transition on the panel.

use log::trace;

use crate::display::Display;
use crate::error::Error;
use crate::gfx::diff::DiffEntry;
use crate::interface::DisplayInterface;

/// How a frame transition is pushed to the panel.
///
/// `FullRewrite` patches the shadow buffer and retransmits it whole, which costs a fixed amount
/// of bus time regardless of how much changed. `Targeted` readdresses and writes each changed
/// byte individually, which costs time proportional to the change count plus cursor overhead per
/// byte. On measured hardware the break-even sits near 100 changed bytes per frame: sparser
/// transitions play faster targeted, denser ones as a full rewrite. The choice is fixed per
/// deployment when the `Player` is built; nothing switches strategy mid-stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStrategy {
    FullRewrite,
    Targeted,
}

/// A mutable mirror of the bytes last transmitted to the controller's RAM, wrapped around a
/// caller-provided buffer so the device side can keep it in a static allocation.
pub struct ShadowMemory<'b> {
    bytes: &'b mut [u8],
    width: u16,
}

impl<'b> ShadowMemory<'b> {
    /// Wrap `bytes` as the mirror of a display `width` columns wide. The buffer length must be a
    /// positive multiple of `width`, and the resulting page count must fit the cursor's one-byte
    /// page index.
    pub fn new(bytes: &'b mut [u8], width: u16) -> Result<Self, Error> {
        if width == 0 {
            return Err(Error::InvalidDimensions);
        }
        if bytes.is_empty() || bytes.len() % width as usize != 0 {
            return Err(Error::DimensionMismatch);
        }
        if bytes.len() / width as usize > usize::from(u8::MAX) + 1 {
            return Err(Error::OutOfRange);
        }
        Ok(ShadowMemory { bytes, width })
    }

    /// The display width the mirror was built for, in columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The mirrored bytes in linear address order.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    /// Replace the entire mirror contents with `frame`, which must match its length.
    pub fn load(&mut self, frame: &[u8]) -> Result<(), Error> {
        if frame.len() != self.bytes.len() {
            return Err(Error::DimensionMismatch);
        }
        self.bytes.copy_from_slice(frame);
        Ok(())
    }

    /// Patch a single byte. The address must lie within the buffer.
    pub fn apply(&mut self, entry: DiffEntry) -> Result<(), Error> {
        let addr = entry.addr as usize;
        if addr >= self.bytes.len() {
            return Err(Error::OutOfRange);
        }
        self.bytes[addr] = entry.value;
        Ok(())
    }

    /// Decompose a linear RAM address into `(page, column)` display coordinates.
    pub fn locate(&self, addr: u16) -> (u8, u8) {
        let page = addr / self.width;
        (page as u8, (addr - page * self.width) as u8)
    }
}

/// One step of an animation: the byte changes that turn the current frame into the next one, and
/// how long the resulting frame stays on screen.
#[derive(Clone, Copy, Debug)]
pub struct Transition<'a> {
    pub delay_ms: u16,
    pub changes: &'a [DiffEntry],
}

/// A complete animation asset: a full starting frame plus the ring of transitions that cycles the
/// animation back to it. Both parts typically live in read-only program storage.
#[derive(Clone, Copy, Debug)]
pub struct Animation<'a> {
    pub keyframe: &'a [u8],
    pub transitions: &'a [Transition<'a>],
}

/// Playback state for one animation on one display: the shadow memory, the transmission
/// strategy, and the position in the transition ring.
///
/// The shadow has exactly one writer, this player, and every mutation of it happens strictly
/// before the transmission that depends on it within a step.
pub struct Player<'a, 'b> {
    animation: Animation<'a>,
    shadow: ShadowMemory<'b>,
    strategy: UpdateStrategy,
    next: usize,
}

impl<'a, 'b> Player<'a, 'b> {
    /// Build a player for `animation` using `shadow` as the RAM mirror. The keyframe must match
    /// the shadow's size, and every transition address must lie within it; validating here means
    /// a later `step` can never half-apply a transition.
    pub fn new(
        animation: Animation<'a>,
        shadow: ShadowMemory<'b>,
        strategy: UpdateStrategy,
    ) -> Result<Self, Error> {
        if animation.keyframe.len() != shadow.as_bytes().len() {
            return Err(Error::DimensionMismatch);
        }
        for transition in animation.transitions {
            for entry in transition.changes {
                if entry.addr as usize >= animation.keyframe.len() {
                    return Err(Error::OutOfRange);
                }
            }
        }
        Ok(Player {
            animation,
            shadow,
            strategy,
            next: 0,
        })
    }

    /// Index of the transition the next `step` call will play.
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn strategy(&self) -> UpdateStrategy {
        self.strategy
    }

    /// Seed the shadow memory with the keyframe, transmit it in full, and rewind the transition
    /// ring.
    pub fn start<DI>(&mut self, display: &mut Display<DI>) -> Result<(), Error>
    where
        DI: DisplayInterface,
    {
        self.shadow.load(self.animation.keyframe)?;
        self.next = 0;
        display.write_frame(self.shadow.as_bytes())
    }

    /// Play the next transition and advance the ring, wrapping at the end. Returns how long the
    /// new frame should stay on screen; the caller owns the waiting.
    pub fn step<DI>(&mut self, display: &mut Display<DI>) -> Result<u16, Error>
    where
        DI: DisplayInterface,
    {
        if self.animation.transitions.is_empty() {
            return Ok(0);
        }
        let transition = self.animation.transitions[self.next];
        trace!(
            "transition {}: {} changed bytes",
            self.next,
            transition.changes.len()
        );
        match self.strategy {
            UpdateStrategy::FullRewrite => {
                for &entry in transition.changes {
                    self.shadow.apply(entry)?;
                }
                display.write_frame(self.shadow.as_bytes())?;
            }
            UpdateStrategy::Targeted => {
                for &entry in transition.changes {
                    self.shadow.apply(entry)?;
                    let (page, column) = self.shadow.locate(entry.addr);
                    display.write_byte(page, column, entry.value)?;
                }
            }
        }
        self.next = (self.next + 1) % self.animation.transitions.len();
        Ok(transition.delay_ms)
    }
}
