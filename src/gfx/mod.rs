//! Image and animation tooling: conversion of bi-level bitmaps into the controller's page-major
//! memory layout, byte-level frame differencing, and the playback engine that materializes frame
//! transitions on the panel.
//!
//! The conversion side (`layout`, `diff`, `emit`, `xbm`) allocates and is only available with the
//! `std` feature; it runs on the host that prepares assets. The playback side (`playback`, plus
//! the `DiffEntry` record it shares with `diff`) is `no_std` and runs on the device.

pub mod diff;
#[cfg(feature = "std")]
pub mod emit;
#[cfg(feature = "std")]
pub mod layout;
pub mod playback;
#[cfg(feature = "std")]
pub mod xbm;
