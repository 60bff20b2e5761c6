//! The error type shared by the conversion tooling, the playback engine, and the driver.

use core::fmt;

/// Failures signalled by this crate. Every operation either completes or returns one of these
/// without producing a partial buffer or transmitting anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bitmap or display dimension was zero or negative.
    InvalidDimensions,
    /// Two buffers that must describe the same display geometry have different sizes.
    DimensionMismatch,
    /// Backing storage for a conversion output could not be allocated.
    Allocation,
    /// A command argument or byte address lies outside the range the controller can address.
    OutOfRange,
    /// The bus interface reported a write failure.
    Interface,
    /// An image asset's text could not be parsed.
    Parse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            Error::InvalidDimensions => "zero or negative dimension",
            Error::DimensionMismatch => "buffer sizes describe different geometries",
            Error::Allocation => "buffer allocation failed",
            Error::OutOfRange => "value outside the controller's addressable range",
            Error::Interface => "bus interface write failed",
            Error::Parse => "malformed image asset",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
