//! Hand a density grid to an external renderer, either as JSON or as
//! an 8-bit grayscale image.

// std
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
// others
use tracing::info;
// hypersphere
use crate::core::error::Result;
use crate::core::histogram::HistogramGrid;
use crate::core::hypersphere::{clamp_t, Float};

pub fn write_grid_json<P: AsRef<Path>>(path: P, grid: &HistogramGrid) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, grid)?;
    writer.flush()?;
    info!(path = %path.display(), "wrote density grid");
    Ok(())
}

/// Gray levels of the grid, one byte per cell, scaled so that the
/// fullest cell is white. Row 0 of the image is the top row (`y_max`).
pub fn grid_to_gray(grid: &HistogramGrid) -> Vec<u8> {
    let max: Float = grid.max_count().max(1) as Float;
    let mut buffer: Vec<u8> = vec![0_u8; grid.bins_x * grid.bins_y];
    for row in 0..grid.bins_y {
        let iy: usize = grid.bins_y - 1 - row;
        for ix in 0..grid.bins_x {
            let value: Float = 255.0 as Float * grid.count(ix, iy) as Float / max;
            buffer[row * grid.bins_x + ix] =
                clamp_t(value + 0.5, 0.0 as Float, 255.0 as Float) as u8;
        }
    }
    buffer
}

pub fn write_grid_image<P: AsRef<Path>>(path: P, grid: &HistogramGrid) -> Result<()> {
    let path = path.as_ref();
    let buffer = grid_to_gray(grid);
    image::save_buffer(
        path,
        &buffer,
        grid.bins_x as u32,
        grid.bins_y as u32,
        image::ColorType::L8,
    )?;
    info!(path = %path.display(), "wrote density image");
    Ok(())
}
