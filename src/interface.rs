//! Interfaces for communicating with the display controller.

use crate::error::Error;

/// An interface for sending commands and display data to a PCD8544. The controller latches each
/// transferred byte as either a command or display data depending on the level of its D/C input,
/// so implementations must route the two kinds through whatever drives that pin.
pub trait DisplayInterface {
    fn send_command(&mut self, cmd: u8) -> Result<(), Error>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Error>;
}

pub mod spi {
    //! The PCD8544 is written over a unidirectional SPI bus (MOSI/SCLK only) with the D/C GPIO as
    //! the extra "wire" selecting command or data transfers. Chip select, where wired, belongs to
    //! the bus layer handing out the `SPI` device.

    use embedded_hal as hal;
    use hal::digital::v2::OutputPin;

    use super::DisplayInterface;
    use crate::error::Error;

    pub struct SpiInterface<SPI, DC> {
        /// The SPI master device connected to the PCD8544.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the PCD8544.
        dc: DC,
    }

    impl<SPI, DC> SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: OutputPin,
    {
        /// Create a new SPI interface to communicate with the display controller. `spi` is the
        /// SPI master device, and `dc` is the GPIO output pin connected to the D/C pin of the
        /// PCD8544.
        pub fn new(spi: SPI, dc: DC) -> Self {
            Self { spi, dc }
        }
    }

    impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: OutputPin,
    {
        fn send_command(&mut self, cmd: u8) -> Result<(), Error> {
            self.dc.set_low().map_err(|_| Error::Interface)?;
            self.spi.write(&[cmd]).map_err(|_| Error::Interface)?;
            self.dc.set_high().map_err(|_| Error::Interface)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Error> {
            self.dc.set_high().map_err(|_| Error::Interface)?;
            self.spi.write(buf).map_err(|_| Error::Interface)
        }
    }
}
