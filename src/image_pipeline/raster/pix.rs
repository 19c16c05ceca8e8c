//! Depth-tagged raster buffer.
//!
//! A [`Pix`] owns its samples in a layout chosen once, at construction, by its
//! [`Depth`]. Every accessor is bounds-checked: reads outside the image return
//! zero and writes outside the image are dropped.

use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::raster::types::Depth;

const ALPHA_OPAQUE: u8 = u8::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Samples {
    /// Row-major bits, most significant bit first within each byte
    Binary(Vec<u8>),
    Gray(Vec<u8>),
    Map(Vec<u16>),
    /// Interleaved [R, G, B, A, R, G, B, A, ...]
    Rgba(Vec<u8>),
}

/// Rectangular grid of samples at a fixed bit depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix {
    width: usize,
    height: usize,
    samples: Samples,
    xres: u32,
    yres: u32,
}

impl Pix {
    /// Allocates a zero-filled buffer. RGB buffers start fully transparent black.
    pub fn new(width: usize, height: usize, depth: Depth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(NormError::InvalidDimensions(width, height));
        }
        let pixels = width
            .checked_mul(height)
            .ok_or(NormError::InvalidDimensions(width, height))?;

        let samples = match depth {
            Depth::Binary => Samples::Binary(vec![0u8; pixels.div_ceil(8)]),
            Depth::Gray => Samples::Gray(vec![0u8; pixels]),
            Depth::Map => Samples::Map(vec![0u16; pixels]),
            Depth::Rgb => Samples::Rgba(vec![0u8; pixels * 4]),
        };

        Ok(Self {
            width,
            height,
            samples,
            xres: 0,
            yres: 0,
        })
    }

    /// Wraps one gray sample per pixel, row-major.
    pub fn from_gray_samples(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        let mut pix = Self::new(width, height, Depth::Gray)?;
        check_len(width * height, samples.len())?;
        if let Samples::Gray(data) = &mut pix.samples {
            data.copy_from_slice(samples);
        }
        Ok(pix)
    }

    /// Wraps three samples (R, G, B) per pixel, row-major.
    pub fn from_rgb_samples(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        Self::from_interleaved(width, height, samples, 3)
    }

    /// Wraps four samples (R, G, B, A) per pixel; the incoming alpha is discarded.
    pub fn from_rgba_samples(width: usize, height: usize, samples: &[u8]) -> Result<Self> {
        Self::from_interleaved(width, height, samples, 4)
    }

    fn from_interleaved(width: usize, height: usize, samples: &[u8], channels: usize) -> Result<Self> {
        let mut pix = Self::new(width, height, Depth::Rgb)?;
        check_len(width * height * channels, samples.len())?;
        if let Samples::Rgba(data) = &mut pix.samples {
            for (dst, src) in data.chunks_exact_mut(4).zip(samples.chunks_exact(channels)) {
                dst[..3].copy_from_slice(&src[..3]);
                dst[3] = ALPHA_OPAQUE;
            }
        }
        Ok(pix)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> Depth {
        match self.samples {
            Samples::Binary(_) => Depth::Binary,
            Samples::Gray(_) => Depth::Gray,
            Samples::Map(_) => Depth::Map,
            Samples::Rgba(_) => Depth::Rgb,
        }
    }

    /// Horizontal and vertical resolution, in pixels per inch (0 when unknown).
    pub fn resolution(&self) -> (u32, u32) {
        (self.xres, self.yres)
    }

    pub fn set_resolution(&mut self, xres: u32, yres: u32) {
        self.xres = xres;
        self.yres = yres;
    }

    pub fn copy_resolution_from(&mut self, other: &Pix) {
        self.xres = other.xres;
        self.yres = other.yres;
    }

    /// Fails with [`NormError::InvalidDepth`] unless this buffer has `depth`.
    pub(crate) fn require_depth(&self, stage: &'static str, depth: Depth) -> Result<()> {
        if self.depth() == depth {
            Ok(())
        } else {
            Err(NormError::InvalidDepth {
                stage,
                expected: depth.label(),
                actual: self.depth().bits(),
            })
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Scalar sample at (x, y).
    ///
    /// RGB buffers return the packed word `0xRRGGBBAA`. Out-of-range
    /// coordinates read as 0.
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        let Some(i) = self.index(x, y) else {
            return 0;
        };
        match &self.samples {
            Samples::Binary(bits) => u32::from((bits[i / 8] >> (7 - i % 8)) & 1),
            Samples::Gray(data) => u32::from(data[i]),
            Samples::Map(data) => u32::from(data[i]),
            Samples::Rgba(data) => u32::from_be_bytes([
                data[i * 4],
                data[i * 4 + 1],
                data[i * 4 + 2],
                data[i * 4 + 3],
            ]),
        }
    }

    /// Writes a scalar sample at (x, y), truncated to the buffer depth.
    ///
    /// Binary buffers store any nonzero value as 1. RGB buffers unpack
    /// `0xRRGGBB..` and force alpha to opaque.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match &mut self.samples {
            Samples::Binary(bits) => {
                let mask = 1u8 << (7 - i % 8);
                if value != 0 {
                    bits[i / 8] |= mask;
                } else {
                    bits[i / 8] &= !mask;
                }
            }
            Samples::Gray(data) => data[i] = value as u8,
            Samples::Map(data) => data[i] = value as u16,
            Samples::Rgba(data) => {
                let [r, g, b, _] = value.to_be_bytes();
                data[i * 4..i * 4 + 4].copy_from_slice(&[r, g, b, ALPHA_OPAQUE]);
            }
        }
    }

    /// RGB triple at (x, y); zeros when out of range or not an RGB buffer.
    pub fn get_rgb(&self, x: usize, y: usize) -> [u8; 3] {
        match (&self.samples, self.index(x, y)) {
            (Samples::Rgba(data), Some(i)) => [data[i * 4], data[i * 4 + 1], data[i * 4 + 2]],
            _ => [0, 0, 0],
        }
    }

    /// Writes an RGB triple with opaque alpha. Ignored for non-RGB buffers.
    pub fn set_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if let Samples::Rgba(data) = &mut self.samples {
            data[i * 4..i * 4 + 3].copy_from_slice(&rgb);
            data[i * 4 + 3] = ALPHA_OPAQUE;
        }
    }

    /// Alpha at (x, y) of an RGB buffer.
    pub fn get_alpha(&self, x: usize, y: usize) -> u8 {
        match (&self.samples, self.index(x, y)) {
            (Samples::Rgba(data), Some(i)) => data[i * 4 + 3],
            _ => 0,
        }
    }

    pub fn gray_samples(&self) -> Option<&[u8]> {
        match &self.samples {
            Samples::Gray(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    pub fn rgba_samples(&self) -> Option<&[u8]> {
        match &self.samples {
            Samples::Rgba(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    pub fn map_samples(&self) -> Option<&[u16]> {
        match &self.samples {
            Samples::Map(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn gray_samples_mut(&mut self) -> Option<&mut [u8]> {
        match &mut self.samples {
            Samples::Gray(data) => Some(data.as_mut_slice()),
            _ => None,
        }
    }

    pub(crate) fn rgba_samples_mut(&mut self) -> Option<&mut [u8]> {
        match &mut self.samples {
            Samples::Rgba(data) => Some(data.as_mut_slice()),
            _ => None,
        }
    }

    /// Row-major sample bytes as a display collaborator expects them:
    /// packed bits, gray bytes, little-endian words, or RGBA quads.
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.samples {
            Samples::Binary(data) | Samples::Gray(data) | Samples::Rgba(data) => data.clone(),
            Samples::Map(data) => data.iter().flat_map(|w| w.to_le_bytes()).collect(),
        }
    }

    /// Number of nonzero samples; for binary buffers, the number of set bits.
    pub fn count_nonzero(&self) -> usize {
        match &self.samples {
            Samples::Binary(bits) => {
                let pixels = self.width * self.height;
                (0..pixels).filter(|&i| (bits[i / 8] >> (7 - i % 8)) & 1 == 1).count()
            }
            Samples::Gray(data) => data.iter().filter(|&&v| v != 0).count(),
            Samples::Map(data) => data.iter().filter(|&&v| v != 0).count(),
            Samples::Rgba(data) => data.chunks_exact(4).filter(|px| px[..3] != [0, 0, 0]).count(),
        }
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(NormError::SampleCount { expected, actual })
    }
}
