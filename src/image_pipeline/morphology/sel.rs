//! 3x3 hit-miss structuring elements.
//!
//! The catalog holds the fixed patterns used for connectivity-preserving
//! thinning: nine 4-connected, nine 8-connected and two 4/8-connected
//! elements, each centered at (1, 1). Rotations are pure functions of the
//! pattern; nothing here is shared or mutable.

use crate::image_pipeline::common::error::{NormError, Result};
use crate::image_pipeline::raster::{Depth, Pix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelElement {
    DontCare,
    /// Source pixel must be 1
    Hit,
    /// Source pixel must be 0
    Miss,
}

/// Rows top to bottom, columns left to right.
pub type SelPattern = [[SelElement; 3]; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sel {
    Sel4_1,
    Sel4_2,
    Sel4_3,
    Sel4_4,
    Sel4_5,
    Sel4_6,
    Sel4_7,
    Sel4_8,
    Sel4_9,
    Sel8_1,
    Sel8_2,
    Sel8_3,
    Sel8_4,
    Sel8_5,
    Sel8_6,
    Sel8_7,
    Sel8_8,
    Sel8_9,
    Sel48_1,
    Sel48_2,
}

// 0 = don't care, 1 = hit, 2 = miss
type Code = [[u8; 3]; 3];

impl Sel {
    pub const ALL: [Sel; 20] = [
        Sel::Sel4_1,
        Sel::Sel4_2,
        Sel::Sel4_3,
        Sel::Sel4_4,
        Sel::Sel4_5,
        Sel::Sel4_6,
        Sel::Sel4_7,
        Sel::Sel4_8,
        Sel::Sel4_9,
        Sel::Sel8_1,
        Sel::Sel8_2,
        Sel::Sel8_3,
        Sel::Sel8_4,
        Sel::Sel8_5,
        Sel::Sel8_6,
        Sel::Sel8_7,
        Sel::Sel8_8,
        Sel::Sel8_9,
        Sel::Sel48_1,
        Sel::Sel48_2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Sel::Sel4_1 => "sel_4_1",
            Sel::Sel4_2 => "sel_4_2",
            Sel::Sel4_3 => "sel_4_3",
            Sel::Sel4_4 => "sel_4_4",
            Sel::Sel4_5 => "sel_4_5",
            Sel::Sel4_6 => "sel_4_6",
            Sel::Sel4_7 => "sel_4_7",
            Sel::Sel4_8 => "sel_4_8",
            Sel::Sel4_9 => "sel_4_9",
            Sel::Sel8_1 => "sel_8_1",
            Sel::Sel8_2 => "sel_8_2",
            Sel::Sel8_3 => "sel_8_3",
            Sel::Sel8_4 => "sel_8_4",
            Sel::Sel8_5 => "sel_8_5",
            Sel::Sel8_6 => "sel_8_6",
            Sel::Sel8_7 => "sel_8_7",
            Sel::Sel8_8 => "sel_8_8",
            Sel::Sel8_9 => "sel_8_9",
            Sel::Sel48_1 => "sel_48_1",
            Sel::Sel48_2 => "sel_48_2",
        }
    }

    pub fn from_name(name: &str) -> Option<Sel> {
        Sel::ALL.into_iter().find(|sel| sel.name() == name)
    }

    fn code(self) -> Code {
        match self {
            Sel::Sel4_1 => [[0, 0, 1], [2, 0, 1], [0, 0, 1]],
            Sel::Sel4_2 => [[0, 0, 1], [2, 0, 1], [0, 2, 0]],
            Sel::Sel4_3 => [[0, 2, 0], [2, 0, 1], [0, 0, 1]],
            Sel::Sel4_4 => [[0, 2, 0], [2, 0, 1], [0, 2, 0]],
            Sel::Sel4_5 => [[0, 2, 1], [2, 0, 1], [0, 2, 0]],
            Sel::Sel4_6 => [[0, 2, 0], [2, 0, 1], [0, 2, 1]],
            Sel::Sel4_7 => [[0, 1, 1], [2, 0, 1], [0, 2, 0]],
            Sel::Sel4_8 => [[0, 0, 1], [2, 0, 1], [2, 0, 1]],
            Sel::Sel4_9 => [[2, 0, 1], [2, 0, 1], [0, 0, 1]],
            Sel::Sel8_1 => [[0, 1, 0], [2, 0, 1], [0, 1, 0]],
            Sel::Sel8_2 => [[0, 1, 0], [2, 0, 1], [2, 0, 0]],
            Sel::Sel8_3 => [[2, 0, 0], [2, 0, 1], [0, 1, 0]],
            Sel::Sel8_4 => [[2, 0, 0], [2, 0, 1], [2, 0, 0]],
            Sel::Sel8_5 => [[2, 0, 1], [2, 0, 1], [2, 0, 0]],
            Sel::Sel8_6 => [[2, 0, 0], [2, 0, 1], [2, 0, 1]],
            Sel::Sel8_7 => [[0, 1, 0], [2, 0, 1], [2, 2, 0]],
            Sel::Sel8_8 => [[0, 1, 0], [2, 0, 1], [2, 1, 0]],
            Sel::Sel8_9 => [[2, 1, 0], [2, 0, 1], [0, 1, 0]],
            Sel::Sel48_1 => [[0, 1, 1], [2, 0, 1], [2, 2, 0]],
            Sel::Sel48_2 => [[2, 0, 1], [2, 0, 1], [2, 0, 1]],
        }
    }

    pub fn pattern(self) -> SelPattern {
        self.code().map(|row| {
            row.map(|c| match c {
                1 => SelElement::Hit,
                2 => SelElement::Miss,
                _ => SelElement::DontCare,
            })
        })
    }

    pub fn rotated(self, quads: u32) -> Result<SelPattern> {
        rotate_orth(&self.pattern(), quads)
    }
}

/// Rotates a pattern clockwise by `quads` quarter turns, `quads` in 0..=4.
pub fn rotate_orth(pattern: &SelPattern, quads: u32) -> Result<SelPattern> {
    if quads > 4 {
        return Err(NormError::InvalidParameter(format!(
            "rotation quads {quads} not in 0..=4"
        )));
    }
    if quads % 4 == 0 {
        return Ok(*pattern);
    }

    let mut rotated = [[SelElement::DontCare; 3]; 3];
    for (i, row) in pattern.iter().enumerate() {
        for (j, &element) in row.iter().enumerate() {
            let (ni, nj) = match quads {
                1 => (j, 2 - i),
                2 => (2 - i, 2 - j),
                _ => (2 - j, i),
            };
            rotated[ni][nj] = element;
        }
    }
    Ok(rotated)
}

/// Whether `pattern`, centered on (x, y), matches a 1 bpp buffer.
/// Neighbors outside the buffer read as 0.
pub fn hit_miss_at(mask: &Pix, pattern: &SelPattern, x: usize, y: usize) -> Result<bool> {
    mask.require_depth("hit_miss", Depth::Binary)?;

    for (dy, row) in pattern.iter().enumerate() {
        for (dx, &element) in row.iter().enumerate() {
            let value = match ((x + dx).checked_sub(1), (y + dy).checked_sub(1)) {
                (Some(sx), Some(sy)) => mask.get_pixel(sx, sy),
                _ => 0,
            };
            let ok = match element {
                SelElement::DontCare => true,
                SelElement::Hit => value == 1,
                SelElement::Miss => value == 0,
            };
            if !ok {
                return Ok(false);
            }
        }
    }
    Ok(true)
}
