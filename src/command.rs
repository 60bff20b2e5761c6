//! The command set for the PCD8544.
//!
//! Note: The display RAM of the PCD8544 is arranged in 6 banks ("pages") of 84 bytes, where each
//! byte drives 8 vertically stacked pixels in one column of its page, bit 0 topmost. Commands are
//! single bytes; the command space is split into two instruction banks selected by the H bit of
//! the function-set command, and the extended-bank commands only reach the chip while H is set.

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    //! Geometry of the controller's display RAM and the limits of command arguments.

    /// Number of pixel columns in the display RAM.
    pub const NUM_PIXEL_COLS: u8 = 84;
    /// Number of pixel rows in the display RAM.
    pub const NUM_PIXEL_ROWS: u8 = 48;
    /// Number of vertically stacked pixels addressed by one RAM byte.
    pub const PIXELS_PER_PAGE: u8 = 8;
    /// Number of 8-row pages in the display RAM.
    pub const NUM_PAGES: u8 = NUM_PIXEL_ROWS / PIXELS_PER_PAGE;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
    pub const BIAS_MAX: u8 = 7;
    pub const TEMP_COEFFICIENT_MAX: u8 = 3;
    pub const OPERATING_VOLTAGE_MAX: u8 = 127;
}

use self::consts::*;

/// The order in which the RAM address pointer advances as display data is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// The X (column) address increments after each data byte, wrapping to the next page at the
    /// end of the RAM row. This matches the page-major layout the conversion tooling emits.
    Horizontal,
    /// The Y (page) address increments after each data byte, wrapping to the next column at the
    /// bottom page.
    Vertical,
}

/// Setting of the display control bits (D and E).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// All pixels off regardless of RAM contents.
    Blank,
    /// All pixels on regardless of RAM contents.
    AllOn,
    /// The display shows the RAM contents.
    Normal,
    /// The display shows the RAM contents with set and clear pixels swapped.
    Inverse,
}

#[derive(Clone, Copy)]
pub enum Command {
    /// No operation.
    Nop,
    /// Set the chip's mode of operation: charge-pump power-down, the RAM addressing order, and
    /// which instruction bank (basic or extended) subsequent commands address.
    SetFunction {
        power_down: bool,
        addressing: AddressingMode,
        extended: bool,
    },
    /// Set the display control mode. See `DisplayMode`.
    SetDisplayMode(DisplayMode),
    /// Set the Y (page) RAM address. Range is 0-5.
    SetYAddress(u8),
    /// Set the X (column) RAM address. Range is 0-83.
    SetXAddress(u8),
    /// Set the temperature coefficient used to compensate the LCD drive voltage. Extended bank.
    /// Range is 0-3.
    SetTempCoefficient(u8),
    /// Set the bias voltage ratio for the multiplex rate of the connected panel. Extended bank.
    /// Range is 0-7; 1:48 panels use 4.
    SetBias(u8),
    /// Set the LCD operating voltage V_op, which determines contrast. Extended bank. Range is
    /// 0-127, though panels are typically only legible in a narrow window around the value their
    /// datasheet recommends.
    SetOperatingVoltage(u8),
}

impl Command {
    /// Transmit the command to the display at `iface`, validating any argument ranges first.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error>
    where
        DI: DisplayInterface,
    {
        let cmd = match self {
            Command::Nop => Ok(0x00),
            Command::SetFunction {
                power_down,
                addressing,
                extended,
            } => {
                let pd = match power_down {
                    true => 0x04,
                    false => 0x00,
                };
                let v = match addressing {
                    AddressingMode::Horizontal => 0x00,
                    AddressingMode::Vertical => 0x02,
                };
                let h = match extended {
                    true => 0x01,
                    false => 0x00,
                };
                Ok(0x20 | pd | v | h)
            }
            Command::SetDisplayMode(mode) => Ok(match mode {
                DisplayMode::Blank => 0x08,
                DisplayMode::AllOn => 0x09,
                DisplayMode::Normal => 0x0C,
                DisplayMode::Inverse => 0x0D,
            }),
            Command::SetYAddress(page) => match page {
                0..=PAGE_MAX => Ok(0x40 | page),
                _ => Err(Error::OutOfRange),
            },
            Command::SetXAddress(col) => match col {
                0..=PIXEL_COL_MAX => Ok(0x80 | col),
                _ => Err(Error::OutOfRange),
            },
            Command::SetTempCoefficient(tc) => match tc {
                0..=TEMP_COEFFICIENT_MAX => Ok(0x04 | tc),
                _ => Err(Error::OutOfRange),
            },
            Command::SetBias(bias) => match bias {
                0..=BIAS_MAX => Ok(0x10 | bias),
                _ => Err(Error::OutOfRange),
            },
            Command::SetOperatingVoltage(vop) => match vop {
                0..=OPERATING_VOLTAGE_MAX => Ok(0x80 | vop),
                _ => Err(Error::OutOfRange),
            },
        }?;
        iface.send_command(cmd)
    }
}
