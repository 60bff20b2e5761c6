//! Conversion from row-major bi-level bitmaps to the controller's page-major memory layout.
//!
//! The controller stores 8 vertically stacked pixels per RAM byte, grouped into 8-row pages laid
//! out page by page. Conversion runs in two ordered stages: first the source image is rotated and
//! packed column by column into vertical byte bands (a column-major buffer), then that buffer is
//! re-indexed into page-major order by a pure index permutation. The result can be transmitted to
//! the display, or a RAM mirror, without any further transformation.

use itertools::iproduct;
use log::debug;

use crate::display::PixelCoord;
use crate::error::Error;

/// A bi-level source image borrowed from loader output. Rows are stored top to bottom, each
/// padded to a whole number of bytes; bit `b` of byte `k` within a row is the pixel at column
/// `8k + b`, and a set bit is a dark pixel.
#[derive(Clone, Copy, Debug)]
pub struct SourceBitmap<'a> {
    size: PixelCoord,
    data: &'a [u8],
}

impl<'a> SourceBitmap<'a> {
    /// Wrap loader output in a bitmap. The dimensions must both be positive, and `data` must hold
    /// exactly `ceil(width / 8)` bytes for each of the `height` rows.
    pub fn new(size: PixelCoord, data: &'a [u8]) -> Result<Self, Error> {
        if size.0 <= 0 || size.1 <= 0 {
            return Err(Error::InvalidDimensions);
        }
        let stride = (size.0 as usize + 7) / 8;
        if data.len() != stride * size.1 as usize {
            return Err(Error::DimensionMismatch);
        }
        Ok(SourceBitmap { size, data })
    }

    pub fn width(&self) -> u16 {
        self.size.0 as u16
    }

    pub fn height(&self) -> u16 {
        self.size.1 as u16
    }

    fn row_stride(&self) -> usize {
        (self.size.0 as usize + 7) / 8
    }

    /// The pixel at `(x, y)` as 0 or 1.
    fn pixel(&self, x: usize, y: usize) -> u8 {
        (self.data[y * self.row_stride() + x / 8] >> (x % 8)) & 0x01
    }
}

/// Image data laid out exactly as the controller's RAM expects: `pages` rows of `width` bytes,
/// where the byte at linear address `page * width + column` drives the 8 pixels of that page in
/// that column, bit 0 topmost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMajorBuffer {
    width: u16,
    pages: u16,
    bytes: Vec<u8>,
}

impl PageMajorBuffer {
    /// The width in pixel columns, which is also the number of bytes per page.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The number of 8-row pages.
    pub fn pages(&self) -> u16 {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The converted bytes in linear address order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Linear RAM address of the byte at `(page, column)`. Valid for `page < pages()` and
    /// `column < width()`.
    pub fn address(&self, page: u16, column: u16) -> u16 {
        page * self.width + column
    }
}

fn alloc_zeroed(len: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len).map_err(|_| Error::Allocation)?;
    bytes.resize(len, 0);
    Ok(bytes)
}

/// Convert a row-major bitmap into the page-major layout the display consumes. The output holds
/// `width * ceil(height / 8)` bytes; when the height is not a multiple of 8, the unused high bits
/// of the final page are zero.
pub fn convert(bitmap: &SourceBitmap) -> Result<PageMajorBuffer, Error> {
    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;
    let bands = (height + 7) / 8;

    // Every byte of the output must stay addressable by a 16-bit diff address.
    let len = width * bands;
    if len > usize::from(u16::MAX) + 1 {
        return Err(Error::OutOfRange);
    }

    let mut packed = alloc_zeroed(len)?;
    rotate_and_pack(bitmap, &mut packed);

    // Second stage: re-index the column-major band buffer into page-major order. A pure index
    // permutation; no bit manipulation happens here.
    let mut paged = alloc_zeroed(len)?;
    for (band, column) in iproduct!(0..bands, 0..width) {
        paged[band * width + column] = packed[column * bands + band];
    }

    debug!(
        "converted {}x{} bitmap into {} page-major bytes",
        width,
        height,
        paged.len()
    );
    Ok(PageMajorBuffer {
        width: width as u16,
        pages: bands as u16,
        bytes: paged,
    })
}

/// First conversion stage: rotate the image 90 degrees and pack each source column into vertical
/// 8-pixel bands, `ceil(height / 8)` bytes per column, column-major. A band covering rows past
/// the bottom of the image keeps those bits zero.
fn rotate_and_pack(bitmap: &SourceBitmap, out: &mut [u8]) {
    let width = bitmap.width() as usize;
    let height = bitmap.height() as usize;
    let bands = (height + 7) / 8;

    for x in 0..width {
        let mut band = 0u8;
        for y in 0..height {
            band |= bitmap.pixel(x, y) << (y % 8);
            if y % 8 == 7 || y == height - 1 {
                out[x * bands + y / 8] = band;
                band = 0;
            }
        }
    }
}
