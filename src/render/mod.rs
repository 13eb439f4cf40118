//! PNG output.
//!
//! - [`ScatterPlot`] rasterizes a numeric sequence as a point plot.
//! - [`FrameWriter`] saves images as `0.png`, `1.png`, ... in a directory.
//! - [`som_to_image`] paints a 3-feature SOM grid as RGB.

mod frames;
mod grid;
mod scatter;

pub use frames::FrameWriter;
pub use grid::som_to_image;
pub use scatter::{PlotValue, ScatterPlot};
