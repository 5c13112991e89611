use ndarray::{ArrayBase, ArrayD, Axis, IxDyn, Slice};
use std::ops::Range;

use crate::{
    buffer::{check_pad, check_ranges, padded_shape, source_index, DataType, PadMode, RasterBuffer, Shape},
    errors::Result,
};

/// Implementations for ndarray
impl<T: DataType> Shape for ArrayD<T> {
    fn shape(&self) -> &[usize] {
        ArrayBase::shape(self)
    }
}

impl<T: DataType> RasterBuffer for ArrayD<T> {
    type Elem = T;

    fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        Ok(ArrayD::from_shape_vec(IxDyn(shape), data)?)
    }

    fn slice(&self, ranges: &[Range<usize>]) -> Result<Self> {
        check_ranges(ArrayBase::shape(self), ranges)?;
        Ok(self
            .slice_each_axis(|description| Slice::from(ranges[description.axis.index()].clone()))
            .to_owned())
    }

    fn pad(&self, widths: &[(usize, usize)], mode: PadMode, constant: T) -> Result<Self> {
        let shape = ArrayBase::shape(self);
        check_pad(shape, widths, mode)?;
        let mut padded = ArrayD::from_elem(IxDyn(&padded_shape(shape, widths)), constant);
        padded
            .slice_each_axis_mut(|description| {
                let axis = description.axis.index();
                let before = widths[axis].0;
                Slice::from(before..before + shape[axis])
            })
            .assign(self);
        if mode == PadMode::Constant {
            return Ok(padded);
        }
        // Axis by axis, so corners take the values already padded along earlier axes.
        for (axis, (&(before, after), &len)) in widths.iter().zip(shape).enumerate() {
            for index in (0..before).chain(before + len..before + len + after) {
                if let Some(source) = source_index(index, before, len, mode) {
                    let lane = padded.index_axis(Axis(axis), before + source).to_owned();
                    padded.index_axis_mut(Axis(axis), index).assign(&lane);
                }
            }
        }
        Ok(padded)
    }

    fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}
