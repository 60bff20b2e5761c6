//! Minimal loader for XBM image files, the input format of the conversion pipeline.
//!
//! XBM stores a bi-level image as C source: two `#define` lines carrying the dimensions followed
//! by a brace-delimited byte array. Its row packing is LSB-first with rows padded to whole bytes,
//! which is exactly the `SourceBitmap` convention, so the payload transfers without re-packing.
//! Only the subset common image tools emit is accepted; hotspot defines from cursor files are
//! ignored.

use crate::display::PixelCoord;
use crate::error::Error;
use crate::gfx::layout::SourceBitmap;

/// An owned bi-level image parsed from XBM text.
#[derive(Clone, Debug)]
pub struct XbmImage {
    size: PixelCoord,
    data: Vec<u8>,
}

impl XbmImage {
    /// Parse XBM text. Fails with `Error::Parse` on malformed input, or with the dimension
    /// errors of `SourceBitmap::new` when the declared geometry and the payload disagree.
    pub fn parse(text: &str) -> Result<XbmImage, Error> {
        let mut width: Option<i16> = None;
        let mut height: Option<i16> = None;
        for line in text.lines() {
            let mut parts = line.split_whitespace();
            if parts.next() != Some("#define") {
                continue;
            }
            let name = parts.next().ok_or(Error::Parse)?;
            let value = parts.next().ok_or(Error::Parse)?;
            if name.ends_with("_width") {
                width = Some(value.parse().map_err(|_| Error::Parse)?);
            } else if name.ends_with("_height") {
                height = Some(value.parse().map_err(|_| Error::Parse)?);
            }
        }
        let size = PixelCoord(
            width.ok_or(Error::Parse)?,
            height.ok_or(Error::Parse)?,
        );

        let open = text.find('{').ok_or(Error::Parse)?;
        let close = text.rfind('}').ok_or(Error::Parse)?;
        if close < open {
            return Err(Error::Parse);
        }
        let mut data = Vec::new();
        for token in text[open + 1..close].split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            data.push(parse_byte(token)?);
        }

        // Validates the geometry against the payload before the image is handed out.
        SourceBitmap::new(size, &data)?;
        Ok(XbmImage { size, data })
    }

    pub fn width(&self) -> u16 {
        self.size.0 as u16
    }

    pub fn height(&self) -> u16 {
        self.size.1 as u16
    }

    /// Lend the image to the converter.
    pub fn bitmap(&self) -> Result<SourceBitmap<'_>, Error> {
        SourceBitmap::new(self.size, &self.data)
    }
}

fn parse_byte(token: &str) -> Result<u8, Error> {
    let parsed = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        u8::from_str_radix(hex, 16)
    } else {
        token.parse()
    };
    parsed.map_err(|_| Error::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::layout::convert;

    const GLYPH: &str = "\
#define glyph_width 8
#define glyph_height 8
static unsigned char glyph_bits[] = {
   0x00, 0x7e, 0x42, 0x42, 0x42, 0x42, 0x7e, 0x00 };
";

    #[test]
    fn parses_dimensions_and_payload() {
        let image = XbmImage::parse(GLYPH).unwrap();
        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 8);
        let buf = convert(&image.bitmap().unwrap()).unwrap();
        assert_eq!(buf.len(), 8);
        // The box glyph is symmetric under the rotate-and-pack transform, so the page-major
        // bytes come out equal to the source rows.
        assert_eq!(buf.as_bytes(), &[0x00, 0x7e, 0x42, 0x42, 0x42, 0x42, 0x7e, 0x00][..]);
    }

    #[test]
    fn accepts_decimal_bytes_and_multiline_arrays() {
        let text = "\
#define dot_width 8
#define dot_height 2
static unsigned char dot_bits[] = {
   255,
   0x00,
};
";
        let image = XbmImage::parse(text).unwrap();
        assert_eq!(image.bitmap().unwrap().width(), 8);
    }

    #[test]
    fn ignores_hotspot_defines() {
        let text = "\
#define cur_width 8
#define cur_height 1
#define cur_x_hot 3
#define cur_y_hot 0
static unsigned char cur_bits[] = { 0x10 };
";
        let image = XbmImage::parse(text).unwrap();
        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 1);
    }

    #[test]
    fn rejects_missing_dimensions() {
        let text = "static unsigned char x_bits[] = { 0x00 };";
        assert_eq!(XbmImage::parse(text).err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_malformed_bytes() {
        let text = "\
#define x_width 8
#define x_height 1
static unsigned char x_bits[] = { 0xGG };
";
        assert_eq!(XbmImage::parse(text).err(), Some(Error::Parse));
    }

    #[test]
    fn rejects_payload_not_matching_dimensions() {
        let text = "\
#define x_width 8
#define x_height 2
static unsigned char x_bits[] = { 0x00 };
";
        assert_eq!(XbmImage::parse(text).err(), Some(Error::DimensionMismatch));
    }
}
