use std::io::{Cursor, Read, Seek};

use tiff::ColorType;
use tiff::decoder::ifd::Value;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::raster::Pix;
use crate::image_pipeline::tiff_io::reader::ImageReader;

/// Decodes 8-bit gray, 16-bit gray, RGB and RGBA TIFF images.
///
/// 16-bit gray keeps the high byte of each sample. Alpha is discarded.
pub struct StandardTiffReader;

impl ImageReader for StandardTiffReader {
    fn read_image(&self, data: &[u8]) -> Result<Pix> {
        let mut decoder = Decoder::new(Cursor::new(data)).map_err(|e| NormError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| NormError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| NormError::DecodeError(e.to_string()))?;
        debug!("Decoding TIFF image: {}x{} {:?}", width, height, color_type);

        let (width, height) = (width as usize, height as usize);
        let samples = decoder
            .read_image()
            .map_err(|e| NormError::DecodeError(e.to_string()))?;

        let mut pix = match (color_type, samples) {
            (ColorType::Gray(8), DecodingResult::U8(data)) => Pix::from_gray_samples(width, height, &data)?,
            (ColorType::Gray(16), DecodingResult::U16(data)) => {
                let high: Vec<u8> = data.iter().map(|&v| (v >> 8) as u8).collect();
                Pix::from_gray_samples(width, height, &high)?
            }
            (ColorType::RGB(8), DecodingResult::U8(data)) => Pix::from_rgb_samples(width, height, &data)?,
            (ColorType::RGBA(8), DecodingResult::U8(data)) => Pix::from_rgba_samples(width, height, &data)?,
            (other, _) => {
                return Err(NormError::UnsupportedFormat(format!("TIFF color type {other:?}")));
            }
        };

        let (xres, yres) = read_resolution(&mut decoder);
        pix.set_resolution(xres, yres);

        debug!("TIFF decoding complete");
        Ok(pix)
    }
}

const RESOLUTION_UNIT_INCH: u16 = 2;
const RESOLUTION_UNIT_CENTIMETER: u16 = 3;

/// Resolution in pixels per inch, (0, 0) unless a physical unit is tagged.
///
/// Encoders write XResolution = YResolution = 1 with no unit by default, which
/// carries no physical meaning.
fn read_resolution<R: Read + Seek>(decoder: &mut Decoder<R>) -> (u32, u32) {
    let unit = match decoder.find_tag(Tag::ResolutionUnit) {
        Ok(Some(Value::Short(u))) => u,
        Ok(Some(Value::Unsigned(u))) => u as u16,
        _ => return (0, 0),
    };
    // Pixels per centimeter scaled by 2.54, as a rational 254/100.
    let (num, den) = match unit {
        RESOLUTION_UNIT_INCH => (1, 1),
        RESOLUTION_UNIT_CENTIMETER => (254, 100),
        _ => return (0, 0),
    };
    (
        read_resolution_tag(decoder, Tag::XResolution, num, den),
        read_resolution_tag(decoder, Tag::YResolution, num, den),
    )
}

/// One resolution tag times `num / den`, rounded; 0 when absent or malformed.
fn read_resolution_tag<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag, num: u64, den: u64) -> u32 {
    let (n, d) = match decoder.find_tag(tag) {
        Ok(Some(Value::Rational(n, d))) if d != 0 => (u64::from(n), u64::from(d)),
        Ok(Some(Value::Short(v))) => (u64::from(v), 1),
        Ok(Some(Value::Unsigned(v))) => (u64::from(v), 1),
        _ => return 0,
    };
    let (n, d) = (n * num, d * den);
    u32::try_from((n + d / 2) / d).unwrap_or(u32::MAX)
}
