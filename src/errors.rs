use crate::{
    buffer::PadMode,
    components::{Axis, Dims},
};

pub type Result<T> = std::result::Result<T, GeoTensorError>;

#[derive(thiserror::Error, Debug)]
pub enum GeoTensorError {
    #[error(transparent)]
    ShapeError(#[from] ndarray::ShapeError),
    #[error("Expected 2d-4d array found shape {0:?}")]
    UnsupportedRank(Box<[usize]>),
    #[error("Axis {axis} not in {dims}")]
    UnknownAxis { axis: Axis, dims: Dims },
    #[error("Slice {start}..{stop} on axis {axis} is not a non-negative forward slice")]
    UnsupportedIndex {
        axis: Axis,
        start: isize,
        stop: isize,
    },
    #[error("There is no intersection between windows")]
    EmptyIntersection,
    #[error("Affine transform is not invertible")]
    NonInvertibleTransform,
    #[error("Range {start}..{stop} out of bounds for axis {axis} of length {len}")]
    OutOfBounds {
        axis: usize,
        start: usize,
        stop: usize,
        len: usize,
    },
    #[error("Expected {expected} axes, found {found}")]
    RankMismatch { expected: usize, found: usize },
    #[error("Can not {mode:?} pad empty axis {axis}")]
    EmptyAxisPad { axis: usize, mode: PadMode },
}
