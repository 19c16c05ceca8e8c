use tracing::debug;

use crate::image_pipeline::background::map::BackgroundMap;
use crate::image_pipeline::background::types::FillPolicy;
use crate::image_pipeline::common::error::{NormError, Result};

/// Repairs a background map in place, column by column.
///
/// `nx` and `ny` are the complete-tile counts the map was built from. A column
/// in `0..nx` has data iff one of its first `ny` cells is set. Columns without
/// data before the first column with data copy that column; later ones copy
/// the nearest column with data to their left. Columns at `nx` and beyond copy
/// column `nx - 1`. Every copy spans the full map height.
///
/// Fails with [`NormError::InsufficientData`] when no column has data; the map
/// must then be discarded.
pub fn fill_map_holes(map: &mut BackgroundMap, nx: usize, ny: usize, policy: FillPolicy) -> Result<()> {
    let (w, h) = (map.width(), map.height());
    if nx > w || ny > h {
        return Err(NormError::InvalidParameter(format!(
            "tile counts {nx}x{ny} exceed map size {w}x{h}"
        )));
    }

    let has_data: Vec<bool> = (0..nx)
        .map(|x| (0..ny).any(|y| map.is_set(x, y)))
        .collect();
    let Some(first_good) = has_data.iter().position(|&d| d) else {
        return Err(NormError::InsufficientData);
    };

    if policy == FillPolicy::ColumnsAndRows {
        for x in (first_good..nx).filter(|&x| has_data[x]) {
            fill_column_gaps(map, x, ny);
        }
    }

    let mut filled = 0usize;
    for x in 0..first_good {
        copy_column(map, first_good, x);
        filled += 1;
    }

    let mut last_good = first_good;
    for x in first_good + 1..nx {
        if has_data[x] {
            last_good = x;
        } else {
            copy_column(map, last_good, x);
            filled += 1;
        }
    }

    for x in nx..w {
        copy_column(map, nx - 1, x);
    }

    debug!(
        columns_filled = filled,
        trailing_columns = w - nx,
        "Filled background map holes"
    );
    Ok(())
}

fn copy_column(map: &mut BackgroundMap, from: usize, to: usize) {
    for y in 0..map.height() {
        map.copy_cell((from, y), (to, y));
    }
}

/// Fills unset cells of one column that has a set cell among its first `ny`.
fn fill_column_gaps(map: &mut BackgroundMap, x: usize, ny: usize) {
    let Some(first) = (0..ny).find(|&y| map.is_set(x, y)) else {
        return;
    };
    for y in 0..first {
        map.copy_cell((x, first), (x, y));
    }
    let mut last = first;
    for y in first + 1..map.height() {
        if map.is_set(x, y) {
            last = y;
        } else {
            map.copy_cell((x, last), (x, y));
        }
    }
}
