//! The main API to the display driver. It provides methods to initialize and control the display
//! and to write page-major image data into its RAM, either as whole frames or as individually
//! addressed bytes.

use crate::command::consts::*;
use crate::command::{AddressingMode, Command, DisplayMode};
use crate::config::Config;
use crate::error::Error;
use crate::interface;

/// A pixel coordinate pair of `column` and `row`. `column` must be in the range [0,
/// `consts::NUM_PIXEL_COLS`], and `row` must be in the range [0, `consts::NUM_PIXEL_ROWS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelCoord(pub i16, pub i16);

/// A driver for a PCD8544 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    display_size: PixelCoord,
    power_down: bool,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for a display with viewable dimensions `display_size`,
    /// which is connected to the interface `iface`.
    ///
    /// Panels wired to fewer column or row lines than the chip provides are supported; all cursor
    /// arithmetic uses the viewable width rather than the RAM width, so a converted frame for a
    /// smaller panel transfers without gaps.
    pub fn new(iface: DI, display_size: PixelCoord) -> Result<Self, Error> {
        if display_size.0 <= 0
            || display_size.1 <= 0
            || display_size.0 > NUM_PIXEL_COLS as i16
            || display_size.1 > NUM_PIXEL_ROWS as i16
        {
            return Err(Error::InvalidDimensions);
        }
        Ok(Display {
            iface,
            display_size,
            power_down: false,
        })
    }

    /// The viewable width in pixel columns, which is also the number of bytes per page.
    pub fn width(&self) -> u8 {
        self.display_size.0 as u8
    }

    /// The viewable height in pixel rows.
    pub fn height(&self) -> u8 {
        self.display_size.1 as u8
    }

    /// Number of 8-row pages covering the viewable height.
    pub fn pages(&self) -> u8 {
        (self.height() + PIXELS_PER_PAGE - 1) / PIXELS_PER_PAGE
    }

    fn frame_len(&self) -> usize {
        self.width() as usize * self.pages() as usize
    }

    /// Initialize the display with a config message.
    pub fn init(&mut self, config: Config) -> Result<(), Error> {
        self.set_function(true)?;
        config.send(&mut self.iface)?;
        self.set_function(false)?;
        Command::SetDisplayMode(DisplayMode::Blank).send(&mut self.iface)?;
        Command::SetDisplayMode(DisplayMode::Normal).send(&mut self.iface)
    }

    /// Send a function-set command selecting the given instruction bank, preserving the current
    /// power state. Addressing is always horizontal: the page-major data this driver writes
    /// depends on the X address advancing within the current page.
    fn set_function(&mut self, extended: bool) -> Result<(), Error> {
        Command::SetFunction {
            power_down: self.power_down,
            addressing: AddressingMode::Horizontal,
            extended,
        }
        .send(&mut self.iface)
    }

    /// Control charge-pump power-down mode. RAM contents are retained while powered down.
    pub fn set_power_down(&mut self, power_down: bool) -> Result<(), Error> {
        self.power_down = power_down;
        self.set_function(false)
    }

    /// Set the display control mode. See `DisplayMode`.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error> {
        Command::SetDisplayMode(mode).send(&mut self.iface)
    }

    /// Re-program the operating voltage, the contrast adjustment knob on this chip. Switches to
    /// the extended instruction bank and back.
    pub fn set_operating_voltage(&mut self, vop: u8) -> Result<(), Error> {
        self.set_function(true)?;
        Command::SetOperatingVoltage(vop).send(&mut self.iface)?;
        self.set_function(false)
    }

    /// Position the RAM write cursor at `(page, column)`. Subsequent data bytes land there first
    /// and advance columnwise.
    pub fn set_cursor(&mut self, page: u8, column: u8) -> Result<(), Error> {
        if page >= self.pages() || column >= self.width() {
            return Err(Error::OutOfRange);
        }
        Command::SetXAddress(column).send(&mut self.iface)?;
        Command::SetYAddress(page).send(&mut self.iface)
    }

    /// Write one byte of display data at `(page, column)`, driving the 8 pixel rows of that page
    /// in that column.
    pub fn write_byte(&mut self, page: u8, column: u8, value: u8) -> Result<(), Error> {
        self.set_cursor(page, column)?;
        self.iface.send_data(&[value])
    }

    /// Transmit a full frame of page-major display data, `width() * pages()` bytes in linear
    /// address order. The cursor is re-seated at the start of every page: the chip's X address
    /// advances through all 84 RAM columns, so narrower viewable widths would otherwise drift
    /// into the invisible margin.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), Error> {
        if frame.len() != self.frame_len() {
            return Err(Error::DimensionMismatch);
        }
        let width = self.width() as usize;
        for page in 0..self.pages() {
            self.set_cursor(page, 0)?;
            self.iface
                .send_data(&frame[page as usize * width..][..width])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelCoord as Px, *};
    use crate::interface::test_spy::{send, sends, TestSpyInterface};

    #[test]
    fn init_defaults() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(84, 48)).unwrap();
        let cfg = Config::new(4, 0x48);
        disp.init(cfg).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            0x21, // function set, extended bank
            0xC8, // operating voltage 0x48
            0x14, // bias 4
            0x20, // function set, basic bank
            0x08, // display blank
            0x0C  // display normal
        ));
    }

    #[test]
    fn init_with_temp_coefficient() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(84, 48)).unwrap();
        let cfg = Config::new(4, 0x3F).temp_coefficient(2);
        disp.init(cfg).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            0x21, // function set, extended bank
            0xBF, // operating voltage 0x3F
            0x06, // temperature coefficient 2
            0x14, // bias 4
            0x20, // function set, basic bank
            0x08, // display blank
            0x0C  // display normal
        ));
    }

    #[test]
    fn new_checks_dimensions() {
        assert!(Display::new(TestSpyInterface::new(), Px(84, 48)).is_ok());
        assert!(Display::new(TestSpyInterface::new(), Px(48, 32)).is_ok());
        assert_eq!(
            Display::new(TestSpyInterface::new(), Px(0, 48)).err(),
            Some(Error::InvalidDimensions)
        );
        assert_eq!(
            Display::new(TestSpyInterface::new(), Px(84, -8)).err(),
            Some(Error::InvalidDimensions)
        );
        assert_eq!(
            Display::new(TestSpyInterface::new(), Px(85, 48)).err(),
            Some(Error::InvalidDimensions)
        );
        assert_eq!(
            Display::new(TestSpyInterface::new(), Px(84, 49)).err(),
            Some(Error::InvalidDimensions)
        );
    }

    #[test]
    fn pages_rounds_up() {
        let disp = Display::new(TestSpyInterface::new(), Px(84, 48)).unwrap();
        assert_eq!(disp.pages(), 6);
        let disp = Display::new(TestSpyInterface::new(), Px(84, 20)).unwrap();
        assert_eq!(disp.pages(), 3);
    }

    #[test]
    fn set_cursor_sends_x_then_y() {
        let mut di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(84, 48)).unwrap();
        disp.set_cursor(1, 6).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            0x86, // X address 6
            0x41  // Y address 1
        ));
        di.clear();
        assert_eq!(disp.set_cursor(6, 0), Err(Error::OutOfRange));
        assert_eq!(disp.set_cursor(0, 84), Err(Error::OutOfRange));
        di.check_multi(sends!());
    }

    #[test]
    fn set_cursor_checks_viewable_area() {
        // A 48x32 panel exposes 4 pages of 48 columns even though the chip RAM is larger.
        let mut disp = Display::new(TestSpyInterface::new(), Px(48, 32)).unwrap();
        assert!(disp.set_cursor(3, 47).is_ok());
        assert_eq!(disp.set_cursor(4, 0), Err(Error::OutOfRange));
        assert_eq!(disp.set_cursor(0, 48), Err(Error::OutOfRange));
    }

    #[test]
    fn write_byte_addresses_then_writes() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(84, 48)).unwrap();
        disp.write_byte(1, 6, 0x07).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            0x86, // X address 6
            0x41, // Y address 1
            [0x07]
        ));
    }

    #[test]
    fn write_frame_reseats_cursor_per_page() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(4, 16)).unwrap();
        disp.write_frame(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            0x80, // X address 0
            0x40, // Y address 0
            [1, 2, 3, 4],
            0x80, // X address 0
            0x41, // Y address 1
            [5, 6, 7, 8]
        ));
    }

    #[test]
    fn write_frame_rejects_wrong_length() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(4, 16)).unwrap();
        assert_eq!(
            disp.write_frame(&[0u8; 7]),
            Err(Error::DimensionMismatch)
        );
        assert_eq!(
            disp.write_frame(&[0u8; 9]),
            Err(Error::DimensionMismatch)
        );
        // Nothing may reach the bus for a rejected frame.
        di.check_multi(sends!());
    }

    #[test]
    fn power_down_is_preserved_across_bank_switches() {
        let mut di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(84, 48)).unwrap();
        disp.set_power_down(true).unwrap();
        di.check_multi(sends!(0x24));
        di.clear();
        disp.set_operating_voltage(0x48).unwrap();
        #[rustfmt::skip]
        di.check_multi(sends!(
            0x25, // function set, extended bank, still powered down
            0xC8, // operating voltage 0x48
            0x24  // function set, basic bank, still powered down
        ));
    }

    #[test]
    fn display_mode() {
        let di = TestSpyInterface::new();
        let mut disp = Display::new(di.split(), Px(84, 48)).unwrap();
        disp.set_display_mode(DisplayMode::Inverse).unwrap();
        di.check_multi(sends!(0x0D));
    }
}
