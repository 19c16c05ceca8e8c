//! Binary morphology module
//!
//! Thresholding of gray buffers into foreground masks, the fixed cross-shaped
//! dilation that turns them into conservative exclusion masks, and the catalog
//! of 3x3 hit-miss structuring elements.

mod threshold;
mod dilate;
pub mod sel;


pub use threshold::threshold_to_binary;
pub use dilate::{dilate_cross, CROSS_HALF_WIDTH};
pub use sel::{hit_miss_at, rotate_orth, Sel, SelElement, SelPattern};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::Pix;

/// Foreground exclusion mask of an 8 bpp buffer: pixels darker than `thresh`,
/// grown by the cross dilation.
pub fn foreground_mask(gray: &Pix, thresh: u8) -> Result<Pix> {
    let binary = threshold_to_binary(gray, thresh)?;
    dilate_cross(&binary)
}
