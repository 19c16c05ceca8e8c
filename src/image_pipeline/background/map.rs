use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::{Depth, Pix};

/// One estimated background value per tile, with an explicit validity bit.
///
/// Values live in an 8 bpp buffer so downstream stages see an ordinary map;
/// unset cells hold 0 there. Validity is tracked separately so that a genuine
/// mean of 0 still counts as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMap {
    values: Pix,
    valid: Pix,
}

impl BackgroundMap {
    /// An all-unset map.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            values: Pix::new(width, height, Depth::Gray)?,
            valid: Pix::new(width, height, Depth::Binary)?,
        })
    }

    /// Wraps raw 8 bpp values, treating every nonzero cell as set.
    pub fn from_values(values: Pix) -> Result<Self> {
        values.require_depth("background_map", Depth::Gray)?;
        let mut valid = Pix::new(values.width(), values.height(), Depth::Binary)?;
        for y in 0..values.height() {
            for x in 0..values.width() {
                if values.get_pixel(x, y) != 0 {
                    valid.set_pixel(x, y, 1);
                }
            }
        }
        Ok(Self { values, valid })
    }

    pub fn width(&self) -> usize {
        self.values.width()
    }

    pub fn height(&self) -> usize {
        self.values.height()
    }

    /// Raw cell value; 0 for unset or out-of-range cells.
    pub fn value(&self, x: usize, y: usize) -> u8 {
        self.values.get_pixel(x, y) as u8
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.valid.get_pixel(x, y) == 1
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.is_set(x, y).then(|| self.value(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.values.set_pixel(x, y, u32::from(value));
        self.valid.set_pixel(x, y, 1);
    }

    /// Copies value and validity of one cell onto another.
    pub(crate) fn copy_cell(&mut self, (fx, fy): (usize, usize), (tx, ty): (usize, usize)) {
        self.values.set_pixel(tx, ty, self.values.get_pixel(fx, fy));
        self.valid.set_pixel(tx, ty, self.valid.get_pixel(fx, fy));
    }

    pub fn set_count(&self) -> usize {
        self.valid.count_nonzero()
    }
}
