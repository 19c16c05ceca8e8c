use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::{Depth, Pix};

/// Reach of each arm of the cross, giving a 7x1 plus 1x7 structuring element.
pub const CROSS_HALF_WIDTH: usize = 3;

/// Dilates a 1 bpp mask with a 7x1 horizontal and a 1x7 vertical line.
///
/// The two 1-D scans are OR-ed rather than composed, so a pixel is set iff a
/// source pixel within `CROSS_HALF_WIDTH` of it shares its row or its column.
/// Neighbors past the image edge are absent.
pub fn dilate_cross(pixs: &Pix) -> Result<Pix> {
    pixs.require_depth("dilate", Depth::Binary)?;

    let (w, h) = (pixs.width(), pixs.height());
    let mut src = vec![false; w * h];
    for y in 0..h {
        for x in 0..w {
            src[y * w + x] = pixs.get_pixel(x, y) == 1;
        }
    }

    let mut pixd = Pix::new(w, h, Depth::Binary)?;
    for y in 0..h {
        let y0 = y.saturating_sub(CROSS_HALF_WIDTH);
        let y1 = (y + CROSS_HALF_WIDTH).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(CROSS_HALF_WIDTH);
            let x1 = (x + CROSS_HALF_WIDTH).min(w - 1);

            let in_row = src[y * w + x0..=y * w + x1].iter().any(|&b| b);
            let hit = in_row || (y0..=y1).any(|yy| src[yy * w + x]);
            if hit {
                pixd.set_pixel(x, y, 1);
            }
        }
    }

    Ok(pixd)
}
