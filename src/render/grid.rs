//! SOM grid as an RGB image.

use crate::error::{DeltaGridError, Result};
use crate::som::GridSnapshot;
use image::{ImageBuffer, Rgb, RgbImage};

/// Paints a 3-feature grid, one `scale x scale` block per cell.
///
/// Features are read as red, green and blue in `[0, 1]`; values outside are
/// clamped.
pub fn som_to_image(snapshot: &GridSnapshot, scale: u32) -> Result<RgbImage> {
    if snapshot.feature_dim != 3 {
        return Err(DeltaGridError::Render(format!(
            "only 3-feature grids can be drawn as RGB, got {} features",
            snapshot.feature_dim
        )));
    }
    if scale == 0 {
        return Err(DeltaGridError::Render("scale must be positive".to_string()));
    }

    let scaled = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(scale))
            .ok_or_else(|| {
                DeltaGridError::Render(format!(
                    "{} cells at scale {} exceed the image size limit",
                    cells, scale
                ))
            })
    };
    let width = scaled(snapshot.width)?;
    let height = scaled(snapshot.height)?;
    let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let row = (y / scale) as usize;
        let col = (x / scale) as usize;
        match snapshot.cell(row, col) {
            Some(rgb) => Rgb([to_byte(rgb[0]), to_byte(rgb[1]), to_byte(rgb[2])]),
            None => Rgb([0, 0, 0]),
        }
    }))
}
