use std::io::Write;

use tiff::encoder::colortype::{ColorType, Gray8, RGB8};
use tiff::encoder::{Rational, TiffEncoder};
use tiff::tags::ResolutionUnit;
use tracing::debug;

use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::raster::{Depth, Pix};
use crate::image_pipeline::tiff_io::types::TiffOutput;
use crate::image_pipeline::tiff_io::writer::ImageWriter;

/// Encodes 8 bpp buffers as 8-bit gray and 32 bpp buffers as 8-bit RGB.
pub struct StandardTiffWriter;

impl ImageWriter for StandardTiffWriter {
    fn write_image(&self, image: &Pix, output: &mut dyn Write, options: &TiffOutput) -> Result<()> {
        debug!("Encoding TIFF image: {}x{} at {}", image.width(), image.height(), image.depth());

        let mut buffer: Vec<u8> = Vec::new();
        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| NormError::EncodeError(e.to_string()))?
            .with_compression(options.compression.codec())
            .with_predictor(options.predictor());

        match image.depth() {
            Depth::Gray => {
                let samples = image.gray_samples().unwrap_or_default();
                encode::<Gray8, _>(&mut encoder, image, samples)?;
            }
            Depth::Rgb => {
                let samples: Vec<u8> = image
                    .rgba_samples()
                    .unwrap_or_default()
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                encode::<RGB8, _>(&mut encoder, image, &samples)?;
            }
            other => {
                return Err(NormError::UnsupportedFormat(format!("cannot encode {other} image as TIFF")));
            }
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

fn encode<C, W>(encoder: &mut TiffEncoder<W>, image: &Pix, samples: &[C::Inner]) -> Result<()>
where
    C: ColorType,
    W: Write + std::io::Seek,
    [C::Inner]: tiff::encoder::TiffValue,
{
    let mut tiff_image = encoder
        .new_image::<C>(image.width() as u32, image.height() as u32)
        .map_err(|e| NormError::EncodeError(e.to_string()))?;

    let (xres, yres) = image.resolution();
    if xres > 0 && yres > 0 {
        tiff_image.resolution_unit(ResolutionUnit::Inch);
        tiff_image.x_resolution(Rational { n: xres, d: 1 });
        tiff_image.y_resolution(Rational { n: yres, d: 1 });
    }

    tiff_image
        .write_data(samples)
        .map_err(|e| NormError::EncodeError(e.to_string()))
}
