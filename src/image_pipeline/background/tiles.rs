use tracing::debug;

use crate::image_pipeline::background::map::BackgroundMap;
use crate::image_pipeline::background::types::{effective_min_count, TileGrid};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::morphology::foreground_mask;
use crate::image_pipeline::raster::{convert_rgb_to_gray_fast, Depth, Pix};

/// Per-channel background maps of a 32 bpp image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBackgroundMaps {
    pub red: BackgroundMap,
    pub green: BackgroundMap,
    pub blue: BackgroundMap,
}

impl RgbBackgroundMaps {
    pub fn channels_mut(&mut self) -> [&mut BackgroundMap; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }
}

/// Mean background value of every complete tile of an 8 bpp image.
///
/// Pixels under the dilated foreground mask are skipped. A tile whose
/// remaining sample count reaches `min_count` gets the floored mean; other
/// cells, and the cells of partial edge tiles, are left unset for the hole
/// filler.
pub fn background_gray_map(
    pixs: &Pix,
    tile_width: usize,
    tile_height: usize,
    thresh: u8,
    min_count: usize,
) -> Result<BackgroundMap> {
    pixs.require_depth("background_gray_map", Depth::Gray)?;

    let grid = TileGrid::new(pixs.width(), pixs.height(), tile_width, tile_height)?;
    grid.require_complete_tiles()?;
    let min_count = effective_min_count(tile_width, tile_height, min_count);
    let mask = foreground_mask(pixs, thresh)?;
    let mut map = BackgroundMap::new(grid.map_width, grid.map_height)?;

    for ty in 0..grid.ny {
        for tx in 0..grid.nx {
            let mut sum = 0u64;
            let mut count = 0usize;
            for_each_background_pixel(&mask, &grid, tx, ty, |x, y| {
                sum += u64::from(pixs.get_pixel(x, y));
                count += 1;
            });
            if count >= min_count && count > 0 {
                map.set(tx, ty, (sum / count as u64) as u8);
            }
        }
    }

    debug!(
        nx = grid.nx,
        ny = grid.ny,
        set = map.set_count(),
        "Built gray background map"
    );
    Ok(map)
}

/// Per-channel tile means of a 32 bpp image, masked by the fast gray
/// conversion of the same image.
pub fn background_rgb_maps(
    pixs: &Pix,
    tile_width: usize,
    tile_height: usize,
    thresh: u8,
    min_count: usize,
) -> Result<RgbBackgroundMaps> {
    pixs.require_depth("background_rgb_maps", Depth::Rgb)?;

    let grid = TileGrid::new(pixs.width(), pixs.height(), tile_width, tile_height)?;
    grid.require_complete_tiles()?;
    let min_count = effective_min_count(tile_width, tile_height, min_count);
    let gray = convert_rgb_to_gray_fast(pixs)?;
    let mask = foreground_mask(&gray, thresh)?;

    let mut maps = RgbBackgroundMaps {
        red: BackgroundMap::new(grid.map_width, grid.map_height)?,
        green: BackgroundMap::new(grid.map_width, grid.map_height)?,
        blue: BackgroundMap::new(grid.map_width, grid.map_height)?,
    };

    for ty in 0..grid.ny {
        for tx in 0..grid.nx {
            let mut sums = [0u64; 3];
            let mut count = 0usize;
            for_each_background_pixel(&mask, &grid, tx, ty, |x, y| {
                for (sum, v) in sums.iter_mut().zip(pixs.get_rgb(x, y)) {
                    *sum += u64::from(v);
                }
                count += 1;
            });
            if count >= min_count && count > 0 {
                let n = count as u64;
                maps.red.set(tx, ty, (sums[0] / n) as u8);
                maps.green.set(tx, ty, (sums[1] / n) as u8);
                maps.blue.set(tx, ty, (sums[2] / n) as u8);
            }
        }
    }

    debug!(
        nx = grid.nx,
        ny = grid.ny,
        set = maps.red.set_count(),
        "Built RGB background maps"
    );
    Ok(maps)
}

fn for_each_background_pixel<F>(mask: &Pix, grid: &TileGrid, tx: usize, ty: usize, mut f: F)
where
    F: FnMut(usize, usize),
{
    let x0 = tx * grid.tile_width;
    let y0 = ty * grid.tile_height;
    for y in y0..y0 + grid.tile_height {
        for x in x0..x0 + grid.tile_width {
            if mask.get_pixel(x, y) == 0 {
                f(x, y);
            }
        }
    }
}
