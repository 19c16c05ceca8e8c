use tracing::debug;

use crate::image_pipeline::background::map::BackgroundMap;
use crate::image_pipeline::background::types::Smoothing;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::{Depth, Pix};

/// Largest inverse-map entry; also the entry for an unset or zero background cell.
pub const INVERSE_MAP_MAX: u32 = u16::MAX as u32;

/// Converts a background map into a 16 bpp fixed-point scale map.
///
/// Each entry is `floor(65535 * bg_value / cell)`, saturated at 65535. Unset
/// cells and cells holding 0 map to 65535. The map applier multiplies by an
/// entry and shifts right by 16. `smoothing` is applied to the map first when
/// active.
pub fn build_inverse_map(map: &BackgroundMap, bg_value: u8, smoothing: &Smoothing) -> Result<Pix> {
    let smoothed;
    let source = if smoothing.is_active() {
        smoothed = smooth_map(map, smoothing.half_width, smoothing.half_height)?;
        &smoothed
    } else {
        map
    };

    let (w, h) = (source.width(), source.height());
    let mut pixd = Pix::new(w, h, Depth::Map)?;
    let mut saturated = 0usize;

    for y in 0..h {
        for x in 0..w {
            let inv = match source.get(x, y) {
                Some(val) if val > 0 => {
                    (INVERSE_MAP_MAX * u32::from(bg_value) / u32::from(val)).min(INVERSE_MAP_MAX)
                }
                _ => INVERSE_MAP_MAX,
            };
            if inv == INVERSE_MAP_MAX {
                saturated += 1;
            }
            pixd.set_pixel(x, y, inv);
        }
    }

    debug!(bg_value, saturated, "Built inverse background map");
    Ok(pixd)
}

/// Box mean of a background map over a (2*half_width+1) x (2*half_height+1)
/// window clipped to the map, rounded to nearest.
///
/// Only set cells enter a mean, zeros included. A cell whose window holds no
/// set cell stays unset.
pub fn smooth_map(map: &BackgroundMap, half_width: usize, half_height: usize) -> Result<BackgroundMap> {
    let (w, h) = (map.width(), map.height());
    let mut smoothed = BackgroundMap::new(w, h)?;

    for y in 0..h {
        let (y0, y1) = (y.saturating_sub(half_height), (y + half_height).min(h - 1));
        for x in 0..w {
            let (x0, x1) = (x.saturating_sub(half_width), (x + half_width).min(w - 1));
            let mut sum = 0u32;
            let mut count = 0u32;
            for yy in y0..=y1 {
                for xx in x0..=x1 {
                    if let Some(v) = map.get(xx, yy) {
                        sum += u32::from(v);
                        count += 1;
                    }
                }
            }
            if count > 0 {
                smoothed.set(x, y, ((sum + count / 2) / count) as u8);
            }
        }
    }

    Ok(smoothed)
}
