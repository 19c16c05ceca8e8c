//! Normalization configuration types

use crate::image_pipeline::background::{effective_min_count, FillPolicy, Smoothing, SmoothingMode, MIN_TILE_SIZE};
use crate::image_pipeline::common::error::{NormError, Result};

/// Parameters of one background normalization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormConfig {
    /// Tile width in pixels, at least 4
    pub tile_width: usize,
    /// Tile height in pixels, at least 4
    pub tile_height: usize,
    /// Gray values strictly below this are foreground
    pub threshold: u8,
    /// Background samples a tile needs for its mean to be used.
    /// Values above the tile area are clamped to a third of it.
    pub min_count: usize,
    /// Target background value, typically in 128..240
    pub bg_value: u8,
    /// Map smoothing before inversion
    pub smoothing: Smoothing,
    /// Treatment of tiles without enough background
    pub fill_policy: FillPolicy,
}

impl Default for NormConfig {
    fn default() -> Self {
        Self {
            tile_width: 10,
            tile_height: 15,
            threshold: 60,
            min_count: 40,
            bg_value: 200,
            smoothing: Smoothing {
                half_width: 2,
                half_height: 1,
                mode: SmoothingMode::Off,
            },
            fill_policy: FillPolicy::Columns,
        }
    }
}

impl NormConfig {
    pub fn builder() -> NormConfigBuilder {
        NormConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_width < MIN_TILE_SIZE || self.tile_height < MIN_TILE_SIZE {
            return Err(NormError::InvalidParameter(format!(
                "tile size {}x{} below minimum {MIN_TILE_SIZE}",
                self.tile_width, self.tile_height
            )));
        }
        Ok(())
    }

    pub fn effective_min_count(&self) -> usize {
        effective_min_count(self.tile_width, self.tile_height, self.min_count)
    }
}

/// Builder for NormConfig
#[derive(Default)]
pub struct NormConfigBuilder {
    tile_size: Option<(usize, usize)>,
    threshold: Option<u8>,
    min_count: Option<usize>,
    bg_value: Option<u8>,
    smoothing: Option<(usize, usize)>,
    smoothing_mode: Option<SmoothingMode>,
    fill_policy: Option<FillPolicy>,
}

impl NormConfigBuilder {
    pub fn tile_size(mut self, width: usize, height: usize) -> Self {
        self.tile_size = Some((width, height));
        self
    }

    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn min_count(mut self, min_count: usize) -> Self {
        self.min_count = Some(min_count);
        self
    }

    pub fn bg_value(mut self, bg_value: u8) -> Self {
        self.bg_value = Some(bg_value);
        self
    }

    pub fn smoothing(mut self, half_width: usize, half_height: usize) -> Self {
        self.smoothing = Some((half_width, half_height));
        self
    }

    pub fn smoothing_mode(mut self, mode: SmoothingMode) -> Self {
        self.smoothing_mode = Some(mode);
        self
    }

    pub fn fill_policy(mut self, policy: FillPolicy) -> Self {
        self.fill_policy = Some(policy);
        self
    }

    pub fn build(self) -> NormConfig {
        let default = NormConfig::default();
        let (tile_width, tile_height) = self
            .tile_size
            .unwrap_or((default.tile_width, default.tile_height));
        let (half_width, half_height) = self
            .smoothing
            .unwrap_or((default.smoothing.half_width, default.smoothing.half_height));
        NormConfig {
            tile_width,
            tile_height,
            threshold: self.threshold.unwrap_or(default.threshold),
            min_count: self.min_count.unwrap_or(default.min_count),
            bg_value: self.bg_value.unwrap_or(default.bg_value),
            smoothing: Smoothing {
                half_width,
                half_height,
                mode: self.smoothing_mode.unwrap_or(default.smoothing.mode),
            },
            fill_policy: self.fill_policy.unwrap_or(default.fill_policy),
        }
    }
}
