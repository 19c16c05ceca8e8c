use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::Pix;
use crate::image_pipeline::tiff_io::types::TiffOutput;

pub trait ImageWriter {
    fn write_image(&self, image: &Pix, output: &mut dyn Write, options: &TiffOutput) -> Result<()>;
}
