//! Driver library for the Philips PCD8544 dot matrix LCD controller (Nokia 3310/5110 displays),
//! plus the host-side tooling that converts bi-level bitmaps into the controller's page-major
//! memory layout and compiles frame-diff animations for low-bandwidth playback.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod gfx;
pub mod interface;

// Re-exports for primary API.
pub use crate::command::{consts, AddressingMode, DisplayMode};
pub use crate::config::Config;
pub use crate::display::{Display, PixelCoord};
pub use crate::error::Error;
pub use crate::gfx::diff::DiffEntry;
#[cfg(feature = "std")]
pub use crate::gfx::diff::{diff, diff_bytes, FrameDiff};
#[cfg(feature = "std")]
pub use crate::gfx::layout::{convert, PageMajorBuffer, SourceBitmap};
pub use crate::gfx::playback::{Animation, Player, ShadowMemory, Transition, UpdateStrategy};
pub use crate::interface::spi::SpiInterface;
