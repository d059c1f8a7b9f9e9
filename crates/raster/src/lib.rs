//! Raster Crate - the drawing surface challenge images are rendered onto
//!
//! Wraps an RGB pixel buffer at the upscaled working resolution and exposes
//! the primitives the shape catalog draws with:
//! - Filled and outlined polygons (degenerate inputs are skipped, not panics)
//! - Filled and hollow ellipses and circles
//! - Line segments with a pixel width
//! - Predicate-driven shaded fills for gradients (spheres, cones, tori)
//! - Lanczos3 downsampling to the final output size

pub mod canvas;

pub use canvas::Canvas;
pub use image::{Rgb, RgbImage};
