use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::errors::{GeoTensorError, Result};

/// Named logical axis of a [crate::GeoTensor].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Time,
    Band,
    Y,
    X,
}

impl Axis {
    /// Axes georeferenced by the affine transform, in (row, col) order.
    pub const SPATIAL: [Axis; 2] = [Axis::Y, Axis::X];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Time => "time",
            Axis::Band => "band",
            Axis::Y => "y",
            Axis::X => "x",
        }
    }

    pub fn is_spatial(&self) -> bool {
        matches!(self, Axis::Y | Axis::X)
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const DIMS_2D: [Axis; 2] = [Axis::Y, Axis::X];
const DIMS_3D: [Axis; 3] = [Axis::Band, Axis::Y, Axis::X];
const DIMS_4D: [Axis; 4] = [Axis::Time, Axis::Band, Axis::Y, Axis::X];

/// Axis names of a buffer, fixed by its rank.
///
/// `y` and `x` are always the last two.
#[derive(Shrinkwrap, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims(&'static [Axis]);

impl Dims {
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        match shape.len() {
            2 => Ok(Self(&DIMS_2D)),
            3 => Ok(Self(&DIMS_3D)),
            4 => Ok(Self(&DIMS_4D)),
            _ => Err(GeoTensorError::UnsupportedRank(Box::from(shape))),
        }
    }

    pub fn position(&self, axis: Axis) -> Option<usize> {
        self.0.iter().position(|&dim| dim == axis)
    }

    /// Position of `axis`, failing if it is not one of these dims.
    pub fn index_of(&self, axis: Axis) -> Result<usize> {
        self.position(axis)
            .ok_or(GeoTensorError::UnknownAxis { axis, dims: *self })
    }
}

impl Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}
