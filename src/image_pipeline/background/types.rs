//! Background estimation types

use crate::image_pipeline::common::error::{NormError, Result};

/// Smallest accepted tile edge, in pixels.
pub const MIN_TILE_SIZE: usize = 4;

/// How the hole filler treats unset cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Only whole columns without a valid cell are replaced. Unset cells inside
    /// a valid column, including a partial bottom row, stay unset.
    #[default]
    Columns,
    /// Unset cells inside each valid column are first filled from the nearest
    /// valid cell above them (or the first valid cell, for leading rows), over
    /// the full map height; columns are then handled as in `Columns`.
    ColumnsAndRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingMode {
    /// Half-widths are carried but the map is inverted as estimated
    #[default]
    Off,
    /// Box mean over the set cells of a (2*hx+1) x (2*hy+1) window
    Box,
}

/// Low-pass filter applied to a background map before inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoothing {
    pub half_width: usize,
    pub half_height: usize,
    pub mode: SmoothingMode,
}

impl Smoothing {
    pub fn is_active(&self) -> bool {
        self.mode == SmoothingMode::Box && (self.half_width > 0 || self.half_height > 0)
    }
}

/// Geometry of the tiling of a source image.
///
/// `nx` x `ny` counts the complete tiles; the map is `map_width` x
/// `map_height`, one larger in an axis where the image has a partial tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub tile_width: usize,
    pub tile_height: usize,
    pub nx: usize,
    pub ny: usize,
    pub map_width: usize,
    pub map_height: usize,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tile_width: usize, tile_height: usize) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(NormError::InvalidParameter(format!(
                "tile size {tile_width}x{tile_height} must be non-zero"
            )));
        }
        Ok(Self {
            tile_width,
            tile_height,
            nx: width / tile_width,
            ny: height / tile_height,
            map_width: width.div_ceil(tile_width),
            map_height: height.div_ceil(tile_height),
        })
    }

    /// Fails unless at least one complete tile fits in each axis.
    pub fn require_complete_tiles(&self) -> Result<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(NormError::InvalidParameter(format!(
                "tile size {}x{} leaves no complete tile",
                self.tile_width, self.tile_height
            )));
        }
        Ok(())
    }
}

/// Clamps a requested minimum background count to a third of the tile area
/// when it exceeds the whole tile.
pub fn effective_min_count(tile_width: usize, tile_height: usize, min_count: usize) -> usize {
    let area = tile_width.saturating_mul(tile_height);
    if min_count > area { area / 3 } else { min_count }
}
