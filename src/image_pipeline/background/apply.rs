use tracing::debug;

use crate::image_pipeline::background::types::TileGrid;
use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::raster::{Depth, Pix};

const FIXED_POINT_SHIFT: u32 = 16;

/// Rescales an 8 bpp image by its inverse map, one tile at a time.
///
/// Every pixel takes the entry of the tile it falls in; the result is
/// `(value * entry) >> 16`, clamped to 255.
pub fn apply_inverse_gray_map(pixs: &Pix, inv: &Pix, tile_width: usize, tile_height: usize) -> Result<Pix> {
    pixs.require_depth("apply_gray_map", Depth::Gray)?;
    inv.require_depth("apply_gray_map", Depth::Map)?;
    let grid = check_map_size(pixs, inv, tile_width, tile_height)?;

    let (w, h) = (pixs.width(), pixs.height());
    let mut pixd = Pix::new(w, h, Depth::Gray)?;

    if let (Some(src), Some(dst)) = (pixs.gray_samples(), pixd.gray_samples_mut()) {
        for y in 0..h {
            let ty = y / grid.tile_height;
            for x in 0..w {
                let factor = inv.get_pixel(x / grid.tile_width, ty);
                dst[y * w + x] = scale(src[y * w + x], factor);
            }
        }
    }

    debug!("Applied inverse map to {}x{} gray image", w, h);
    Ok(pixd)
}

/// Rescales each channel of a 32 bpp image by its own inverse map.
/// Alpha is forced to opaque.
pub fn apply_inverse_rgb_map(
    pixs: &Pix,
    inv_red: &Pix,
    inv_green: &Pix,
    inv_blue: &Pix,
    tile_width: usize,
    tile_height: usize,
) -> Result<Pix> {
    pixs.require_depth("apply_rgb_map", Depth::Rgb)?;
    let maps = [inv_red, inv_green, inv_blue];
    let mut grid = None;
    for inv in maps {
        inv.require_depth("apply_rgb_map", Depth::Map)?;
        grid = Some(check_map_size(pixs, inv, tile_width, tile_height)?);
    }
    let Some(grid) = grid else {
        return Err(NormError::InvalidParameter("no inverse maps".to_string()));
    };

    let (w, h) = (pixs.width(), pixs.height());
    let mut pixd = Pix::new(w, h, Depth::Rgb)?;

    for y in 0..h {
        let ty = y / grid.tile_height;
        for x in 0..w {
            let tx = x / grid.tile_width;
            let rgb = pixs.get_rgb(x, y);
            let mut out = [0u8; 3];
            for ((dst, &src), inv) in out.iter_mut().zip(rgb.iter()).zip(maps) {
                *dst = scale(src, inv.get_pixel(tx, ty));
            }
            pixd.set_rgb(x, y, out);
        }
    }

    debug!("Applied inverse maps to {}x{} RGB image", w, h);
    Ok(pixd)
}

fn scale(value: u8, factor: u32) -> u8 {
    ((u32::from(value) * factor) >> FIXED_POINT_SHIFT).min(u32::from(u8::MAX)) as u8
}

fn check_map_size(pixs: &Pix, inv: &Pix, tile_width: usize, tile_height: usize) -> Result<TileGrid> {
    let grid = TileGrid::new(pixs.width(), pixs.height(), tile_width, tile_height)?;
    if inv.width() != grid.map_width || inv.height() != grid.map_height {
        return Err(NormError::InvalidParameter(format!(
            "inverse map is {}x{}, expected {}x{} for {}x{} tiles",
            inv.width(),
            inv.height(),
            grid.map_width,
            grid.map_height,
            tile_width,
            tile_height
        )));
    }
    Ok(grid)
}
