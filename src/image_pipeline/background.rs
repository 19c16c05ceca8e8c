//! Background estimation module
//!
//! Tile statistics gathered under a foreground mask, repair of tiles that had
//! too few background samples, and the fixed-point inverse map that rescales a
//! source image toward a target background value.

mod map;
mod tiles;
mod fill;
mod inverse;
mod apply;
pub mod types;


pub use map::BackgroundMap;
pub use tiles::{background_gray_map, background_rgb_maps, RgbBackgroundMaps};
pub use fill::fill_map_holes;
pub use inverse::{build_inverse_map, smooth_map, INVERSE_MAP_MAX};
pub use apply::{apply_inverse_gray_map, apply_inverse_rgb_map};
pub use types::{effective_min_count, FillPolicy, Smoothing, SmoothingMode, TileGrid, MIN_TILE_SIZE};
