//! PNG export of symbol grids with a hue-per-symbol palette

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::io::configuration::{MAX_CELL_SIZE, PALETTE_SATURATION, PALETTE_VALUE};
use crate::io::error::{AlgorithmError, Result, file_system_error, invalid_parameter};
use crate::math::color::symbol_color;
use crate::spatial::Grid;
use crate::symbols::EMPTY_ID;

/// Colour used for one cell value; the empty symbol is fully transparent
pub fn cell_color(id: i32) -> Rgba<u8> {
    if id == EMPTY_ID {
        return Rgba([0, 0, 0, 0]);
    }
    let [r, g, b] = symbol_color(id, PALETTE_SATURATION, PALETTE_VALUE);
    Rgba([r, g, b, 255])
}

/// Render a grid with every cell drawn as a `cell_size` x `cell_size` block
///
/// # Errors
///
/// Returns `InvalidParameter` if `cell_size` is zero or larger than
/// `MAX_CELL_SIZE`
pub fn render_grid(grid: &Grid, cell_size: u32) -> Result<RgbaImage> {
    if cell_size == 0 || cell_size > MAX_CELL_SIZE {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &format!("must be between 1 and {MAX_CELL_SIZE}"),
        ));
    }

    let (width, height) = image_dimensions(grid.width(), grid.height(), cell_size)?;

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / cell_size) as usize;
        let y = (py / cell_size) as usize;
        grid.get(x, y).map_or(Rgba([0, 0, 0, 0]), cell_color)
    }))
}

/// Pixel size of a `width` x `height` grid drawn with `cell_size` blocks
///
/// # Errors
///
/// Returns `InvalidParameter` if either side does not fit in a `u32`
pub fn image_dimensions(width: usize, height: usize, cell_size: u32) -> Result<(u32, u32)> {
    let scale = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(cell_size))
    };
    match (scale(width), scale(height)) {
        (Some(pixel_width), Some(pixel_height)) => Ok((pixel_width, pixel_height)),
        _ => Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &format!("a {width}x{height} grid would exceed the maximum image size"),
        )),
    }
}

/// Render a grid and save it as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - `cell_size` is out of range
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, cell_size: u32, output_path: &Path) -> Result<()> {
    let image = render_grid(grid, cell_size)?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    image
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
