pub mod bounds;
pub mod dims;
pub mod geotensor;
pub mod pad;
pub mod transforms;
pub mod window;

pub use bounds::GeoBounds;
pub use dims::{Axis, Dims};
pub use geotensor::GeoTensor;
pub use transforms::{resolution, transform_for_window};
pub use window::{clip_and_pad, Window};
