//! Raster depth types

use std::fmt;

use crate::image_pipeline::common::error::{NormError, Result};

/// Bits per pixel of a [`Pix`](super::Pix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Packed binary mask, one bit per pixel
    Binary,
    /// 8-bit grayscale, one byte per pixel
    Gray,
    /// 16-bit words, used for fixed-point maps
    Map,
    /// RGB plus alpha, four bytes per pixel
    Rgb,
}

impl Depth {
    pub fn bits(self) -> u32 {
        match self {
            Depth::Binary => 1,
            Depth::Gray => 8,
            Depth::Map => 16,
            Depth::Rgb => 32,
        }
    }

    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(Depth::Binary),
            8 => Ok(Depth::Gray),
            16 => Ok(Depth::Map),
            32 => Ok(Depth::Rgb),
            other => Err(NormError::InvalidDepth {
                stage: "raster",
                expected: "1, 8, 16 or 32",
                actual: other,
            }),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Depth::Binary => "1",
            Depth::Gray => "8",
            Depth::Map => "16",
            Depth::Rgb => "32",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bpp", self.bits())
    }
}
