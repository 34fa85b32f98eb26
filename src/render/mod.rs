//! # Rendering
//!
//! - [`dither`]: RGBA to 1-bit raster conversion (thresholds + Bayer dithering)

pub mod dither;

pub use dither::RasterImage;
