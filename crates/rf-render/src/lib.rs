//! CPU rendering for the selection overlay.
//!
//! `raster` owns the pixel buffer and its snapshots, `paint` redraws it from
//! session state, `hit` answers "which stroke is under this point".

pub mod hit;
pub mod paint;
pub mod raster;

pub use paint::{Layers, render};
pub use raster::{Raster, RasterSnapshot};
