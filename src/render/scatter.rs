//! Point plots of numeric sequences.

use crate::config::RenderConfig;
use crate::error::{DeltaGridError, Result};
use image::{Rgb, RgbImage};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXES: Rgb<u8> = Rgb([0, 0, 0]);
const ZERO_LINE: Rgb<u8> = Rgb([200, 200, 200]);
const MARKER: Rgb<u8> = Rgb([0x1f, 0x77, 0xb4]);

/// Fraction of the data range added on each side of the plot.
const DATA_MARGIN: f64 = 0.05;

/// A value that can be placed on a plot axis.
pub trait PlotValue {
    /// The value as a finite `f64`, or `None` when it has no finite
    /// floating-point representation.
    fn to_plot(&self) -> Option<f64>;
}

impl PlotValue for f64 {
    fn to_plot(&self) -> Option<f64> {
        Some(*self).filter(|v| v.is_finite())
    }
}

impl PlotValue for i64 {
    fn to_plot(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl PlotValue for u64 {
    fn to_plot(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl PlotValue for BigInt {
    fn to_plot(&self) -> Option<f64> {
        self.to_f64().filter(|v| v.is_finite())
    }
}

/// Axis interval with the data margin applied.
fn axis_bounds(min: f64, max: f64) -> Result<(f64, f64)> {
    let (lo, hi) = if max > min {
        let pad = (max - min) * DATA_MARGIN;
        (min - pad, max + pad)
    } else {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * DATA_MARGIN };
        (min - pad, max + pad)
    };

    if !(hi - lo).is_finite() || hi <= lo {
        return Err(DeltaGridError::Render(format!(
            "data range [{:e}, {:e}] exceeds the floating-point range",
            min, max
        )));
    }
    Ok((lo, hi))
}

/// Renders sequences as scatter plots: one marker at `(index, value)` per
/// element, inside a black frame on a white canvas.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    config: RenderConfig,
}

impl ScatterPlot {
    /// Creates a plotter with the given canvas settings.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let min_side = config
            .margin
            .checked_mul(2)
            .and_then(|m| m.checked_add(1))
            .unwrap_or(u32::MAX);
        if config.width <= min_side || config.height <= min_side {
            return Err(DeltaGridError::Config(format!(
                "canvas {}x{} leaves no room inside a margin of {}",
                config.width, config.height, config.margin
            )));
        }
        Ok(Self { config })
    }

    /// Canvas settings.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws `values`.
    ///
    /// Fails when a value, or the spread between the smallest and largest
    /// value, cannot be represented as a finite `f64`.
    pub fn render<T: PlotValue>(&self, values: &[T]) -> Result<RgbImage> {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.to_plot().ok_or_else(|| {
                    DeltaGridError::Render(format!(
                        "value at index {} is too large to plot",
                        i
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let RenderConfig {
            width,
            height,
            margin,
            marker_radius,
        } = self.config;
        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        let left = margin as f64;
        let right = (width - margin - 1) as f64;
        let top = margin as f64;
        let bottom = (height - margin - 1) as f64;

        if !points.is_empty() {
            let (ymin, ymax) = points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            let (y_lo, y_hi) = axis_bounds(ymin, ymax)?;
            let (x_lo, x_hi) = axis_bounds(0.0, (points.len() - 1) as f64)?;

            let to_px = |i: usize| left + (i as f64 - x_lo) / (x_hi - x_lo) * (right - left);
            let y_span = y_hi - y_lo;
            let to_py = |v: f64| bottom - (v / y_span - y_lo / y_span) * (bottom - top);

            if y_lo < 0.0 && y_hi > 0.0 {
                let zero = to_py(0.0).round() as u32;
                for x in margin..width - margin {
                    img.put_pixel(x, zero, ZERO_LINE);
                }
            }

            for (i, &v) in points.iter().enumerate() {
                draw_marker(&mut img, to_px(i), to_py(v), marker_radius);
            }
        }

        draw_frame(&mut img, margin);
        Ok(img)
    }
}

fn draw_frame(img: &mut RgbImage, margin: u32) {
    let (width, height) = img.dimensions();
    let (x0, x1) = (margin, width - margin - 1);
    let (y0, y1) = (margin, height - margin - 1);
    for x in x0..=x1 {
        img.put_pixel(x, y0, AXES);
        img.put_pixel(x, y1, AXES);
    }
    for y in y0..=y1 {
        img.put_pixel(x0, y, AXES);
        img.put_pixel(x1, y, AXES);
    }
}

fn draw_marker(img: &mut RgbImage, cx: f64, cy: f64, radius: u32) {
    let (width, height) = img.dimensions();
    let r = radius as i64;
    let (cx, cy) = (cx.round() as i64, cy.round() as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                img.put_pixel(x as u32, y as u32, MARKER);
            }
        }
    }
}
