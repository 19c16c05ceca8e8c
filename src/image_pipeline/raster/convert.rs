use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::{Depth, Pix};

/// Fast luminance approximation of a 32 bpp buffer: the green sample of each pixel.
pub fn convert_rgb_to_gray_fast(pixs: &Pix) -> Result<Pix> {
    pixs.require_depth("rgb_to_gray", Depth::Rgb)?;

    let mut pixd = Pix::new(pixs.width(), pixs.height(), Depth::Gray)?;
    pixd.copy_resolution_from(pixs);

    if let (Some(src), Some(dst)) = (pixs.rgba_samples(), pixd.gray_samples_mut()) {
        for (gray, px) in dst.iter_mut().zip(src.chunks_exact(4)) {
            *gray = px[1];
        }
    }

    debug!("Converted {}x{} RGB to gray", pixs.width(), pixs.height());
    Ok(pixd)
}
