use tracing::{info, instrument, warn};

use crate::image_pipeline::background::{
    apply_inverse_gray_map, apply_inverse_rgb_map, background_gray_map, background_rgb_maps,
    build_inverse_map, fill_map_holes, TileGrid,
};
use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::normalize::timing::PipelineTimings;
use crate::image_pipeline::normalize::types::NormConfig;
use crate::image_pipeline::raster::{Depth, Pix};

/// Runs adaptive background normalization on 8 bpp gray or 32 bpp RGB images.
pub struct BackgroundNormalizer {
    config: NormConfig,
}

impl Default for BackgroundNormalizer {
    fn default() -> Self {
        Self::new(NormConfig::default())
    }
}

impl BackgroundNormalizer {
    pub fn new(config: NormConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: NormConfig) {
        self.config = config;
    }

    /// Normalizes `pixs` so its background approaches the configured target.
    ///
    /// The output has the source's depth, size and resolution. Any stage
    /// failure aborts the run; no partially normalized buffer is returned.
    pub fn normalize(&self, pixs: &Pix) -> Result<Pix> {
        self.normalize_with_timings(pixs).map(|(pixd, _)| pixd)
    }

    #[instrument(skip(self, pixs), fields(width = pixs.width(), height = pixs.height(), depth = pixs.depth().bits()))]
    pub fn normalize_with_timings(&self, pixs: &Pix) -> Result<(Pix, PipelineTimings)> {
        let grid = self.validate(pixs)?;
        let mut timings = PipelineTimings::new();

        let mut pixd = match pixs.depth() {
            Depth::Gray => self.normalize_gray(pixs, &grid, &mut timings)?,
            _ => self.normalize_rgb(pixs, &grid, &mut timings)?,
        };
        pixd.copy_resolution_from(pixs);

        info!(
            width = pixs.width(),
            height = pixs.height(),
            "Background normalized in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok((pixd, timings))
    }

    fn validate(&self, pixs: &Pix) -> Result<TileGrid> {
        let depth = pixs.depth();
        if depth != Depth::Gray && depth != Depth::Rgb {
            return Err(NormError::InvalidDepth {
                stage: "normalize",
                expected: "8 or 32",
                actual: depth.bits(),
            });
        }

        self.config.validate()?;

        let grid = TileGrid::new(
            pixs.width(),
            pixs.height(),
            self.config.tile_width,
            self.config.tile_height,
        )?;
        grid.require_complete_tiles()?;

        if !(128..240).contains(&self.config.bg_value) {
            warn!(
                bg_value = self.config.bg_value,
                "Target background outside the recommended range 128..240"
            );
        }
        Ok(grid)
    }

    fn normalize_gray(&self, pixs: &Pix, grid: &TileGrid, timings: &mut PipelineTimings) -> Result<Pix> {
        let cfg = &self.config;
        let min_count = cfg.effective_min_count();

        let mut map = timings.time("background_map", || {
            background_gray_map(pixs, cfg.tile_width, cfg.tile_height, cfg.threshold, min_count)
        })?;
        timings.time("fill_holes", || fill_map_holes(&mut map, grid.nx, grid.ny, cfg.fill_policy))?;
        let inv = timings.time("inverse_map", || {
            build_inverse_map(&map, cfg.bg_value, &cfg.smoothing)
        })?;
        timings.time("apply_map", || {
            apply_inverse_gray_map(pixs, &inv, cfg.tile_width, cfg.tile_height)
        })
    }

    fn normalize_rgb(&self, pixs: &Pix, grid: &TileGrid, timings: &mut PipelineTimings) -> Result<Pix> {
        let cfg = &self.config;
        let min_count = cfg.effective_min_count();

        let mut maps = timings.time("background_map", || {
            background_rgb_maps(pixs, cfg.tile_width, cfg.tile_height, cfg.threshold, min_count)
        })?;
        timings.time("fill_holes", || -> Result<()> {
            for map in maps.channels_mut() {
                fill_map_holes(map, grid.nx, grid.ny, cfg.fill_policy)?;
            }
            Ok(())
        })?;
        let [inv_red, inv_green, inv_blue] = timings.time("inverse_map", || -> Result<[Pix; 3]> {
            Ok([
                build_inverse_map(&maps.red, cfg.bg_value, &cfg.smoothing)?,
                build_inverse_map(&maps.green, cfg.bg_value, &cfg.smoothing)?,
                build_inverse_map(&maps.blue, cfg.bg_value, &cfg.smoothing)?,
            ])
        })?;
        timings.time("apply_map", || {
            apply_inverse_rgb_map(
                pixs,
                &inv_red,
                &inv_green,
                &inv_blue,
                cfg.tile_width,
                cfg.tile_height,
            )
        })
    }
}

/// Normalizes with an explicit parameter set.
pub fn background_norm(pixs: &Pix, config: &NormConfig) -> Result<Pix> {
    BackgroundNormalizer::new(config.clone()).normalize(pixs)
}

/// Normalizes with the recommended parameters: 10x15 tiles, threshold 60,
/// 40 background samples per tile, target background 200.
pub fn background_norm_simple(pixs: &Pix) -> Result<Pix> {
    BackgroundNormalizer::default().normalize(pixs)
}
