//! Georeferenced 2d-4d arrays.
//!
//! A [GeoTensor] pairs a buffer with the affine transform and crs that
//! place it on the map. Windowed reads may reach outside the buffer,
//! missing cells are filled and the transform follows the new origin.

#[macro_use]
extern crate shrinkwraprs;

mod backends;
mod buffer;
mod components;
mod crs;
mod errors;
mod intersection;
mod selection;

pub use buffer::{Buffer, DataType, PadMode, RasterBuffer, Shape};
pub use components::{
    clip_and_pad, resolution, transform_for_window, Axis, Dims, GeoBounds, GeoTensor, Window,
};
pub use crs::Crs;
pub use errors::{GeoTensorError, Result};
pub use geo::{AffineTransform, Coord, Rect};
pub use intersection::Intersection;
pub use selection::{PadWidth, Selection};
