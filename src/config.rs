//! Builder for the register values programmed into the display at initialization time.

use crate::command::Command;
use crate::error::Error;
use crate::interface;

/// A configuration for the display. The bias ratio and operating voltage are mandatory because
/// the panel shows nothing legible until both are programmed, so they must be provided in the
/// constructor. The remaining extended-bank options keep the chip's power-on defaults unless set
/// by calling the provided builder methods on `Config`.
pub struct Config {
    bias_cmd: Command,
    operating_voltage_cmd: Command,
    temp_coefficient_cmd: Option<Command>,
}

impl Config {
    /// Create a new configuration from the bias ratio and operating voltage the connected panel's
    /// datasheet recommends. See `Command::SetBias` and `Command::SetOperatingVoltage`; invalid
    /// values are rejected when the configuration is sent during `Display::init`.
    pub fn new(bias: u8, operating_voltage: u8) -> Self {
        Config {
            bias_cmd: Command::SetBias(bias),
            operating_voltage_cmd: Command::SetOperatingVoltage(operating_voltage),
            temp_coefficient_cmd: None,
        }
    }

    /// Extend this `Config` to explicitly program the temperature coefficient. See
    /// `Command::SetTempCoefficient`.
    pub fn temp_coefficient(self, tc: u8) -> Self {
        Self {
            temp_coefficient_cmd: Some(Command::SetTempCoefficient(tc)),
            ..self
        }
    }

    /// Transmit the commands encoded in `self` to the display at `iface`. The display must
    /// already be switched to the extended instruction bank.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), Error>
    where
        DI: interface::DisplayInterface,
    {
        self.operating_voltage_cmd.send(iface)?;
        self.temp_coefficient_cmd.map_or(Ok(()), |c| c.send(iface))?;
        self.bias_cmd.send(iface)
    }
}
