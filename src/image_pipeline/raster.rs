//! Raster buffer module
//!
//! This module provides the multi-depth pixel container shared by every stage
//! of the background normalization pipeline, plus the conversions between depths.

mod pix;
mod convert;
pub mod types;


pub use pix::Pix;
pub use convert::convert_rgb_to_gray_fast;
pub use types::Depth;
