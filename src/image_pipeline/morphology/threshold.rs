use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::{Depth, Pix};

/// Binarizes an 8 bpp buffer. A pixel is foreground (1) iff its value is
/// strictly below `thresh`, so dark ink maps to 1 and paper to 0.
pub fn threshold_to_binary(pixs: &Pix, thresh: u8) -> Result<Pix> {
    pixs.require_depth("threshold", Depth::Gray)?;

    let width = pixs.width();
    let mut pixd = Pix::new(width, pixs.height(), Depth::Binary)?;

    if let Some(samples) = pixs.gray_samples() {
        for (i, &val) in samples.iter().enumerate() {
            if val < thresh {
                pixd.set_pixel(i % width, i / width, 1);
            }
        }
    }

    debug!(thresh, foreground = pixd.count_nonzero(), "Thresholded to binary");
    Ok(pixd)
}
