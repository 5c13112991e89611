use itertools::Itertools;
use ndarray::{ErrorKind, ShapeError};
use num_traits::Num;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, ops::Range};

use crate::errors::{GeoTensorError, Result};

/// Pixel value types a [RasterBuffer] can hold.
pub trait DataType: Num + Copy + PartialEq + Send + Sync + Debug + 'static {
    const DTYPE: &'static str;
}

macro_rules! impl_data_type {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(impl DataType for $t {
            const DTYPE: &'static str = $name;
        })*
    };
}

impl_data_type!(
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    f32 => "float32",
    f64 => "float64",
);

/// How cells outside the source extent are filled when padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    /// Fill with the given constant.
    #[default]
    Constant,
    /// Replicate the nearest edge cell.
    Edge,
    /// Mirror the values around the edge cell, without repeating it.
    Reflect,
    /// Continue from the opposite edge.
    Wrap,
}

#[ambassador::delegatable_trait]
pub trait Shape {
    /// Extent of every axis, outermost first.
    fn shape(&self) -> &[usize];

    fn ndim(&self) -> usize {
        self.shape().len()
    }
}

/// Storage backing a [crate::GeoTensor].
///
/// Every operation returns an independent copy, buffers are never
/// modified in place. Ranges and pad widths are given in forward axis order.
pub trait RasterBuffer: Shape + Clone + PartialEq + Debug + Sized {
    type Elem: DataType;

    /// Row-major `data` laid out as `shape`.
    fn from_shape_vec(shape: &[usize], data: Vec<Self::Elem>) -> Result<Self>;

    /// Copy of the region covered by one range per axis.
    fn slice(&self, ranges: &[Range<usize>]) -> Result<Self>;

    /// Copy extended by `(before, after)` cells on every axis.
    fn pad(&self, widths: &[(usize, usize)], mode: PadMode, constant: Self::Elem) -> Result<Self>;

    /// Values in row-major order.
    fn to_vec(&self) -> Vec<Self::Elem>;

    fn dtype(&self) -> &'static str {
        Self::Elem::DTYPE
    }
}

pub(crate) fn check_ranges(shape: &[usize], ranges: &[Range<usize>]) -> Result<()> {
    if shape.len() != ranges.len() {
        return Err(GeoTensorError::RankMismatch {
            expected: shape.len(),
            found: ranges.len(),
        });
    }
    for (axis, (range, &len)) in ranges.iter().zip(shape).enumerate() {
        if range.start > range.end || range.end > len {
            return Err(GeoTensorError::OutOfBounds {
                axis,
                start: range.start,
                stop: range.end,
                len,
            });
        }
    }
    Ok(())
}

pub(crate) fn check_pad(shape: &[usize], widths: &[(usize, usize)], mode: PadMode) -> Result<()> {
    if shape.len() != widths.len() {
        return Err(GeoTensorError::RankMismatch {
            expected: shape.len(),
            found: widths.len(),
        });
    }
    if mode == PadMode::Constant {
        return Ok(());
    }
    match shape
        .iter()
        .zip(widths)
        .position(|(&len, &(before, after))| len == 0 && before + after > 0)
    {
        Some(axis) => Err(GeoTensorError::EmptyAxisPad { axis, mode }),
        None => Ok(()),
    }
}

pub(crate) fn padded_shape(shape: &[usize], widths: &[(usize, usize)]) -> Vec<usize> {
    shape
        .iter()
        .zip(widths)
        .map(|(len, (before, after))| before + len + after)
        .collect()
}

/// Source position along an axis of length `len` for padded position `index`,
/// `None` when the cell takes the constant.
pub(crate) fn source_index(index: usize, before: usize, len: usize, mode: PadMode) -> Option<usize> {
    let position = index as isize - before as isize;
    let len = len as isize;
    if (0..len).contains(&position) {
        return Some(position as usize);
    }
    let source = match mode {
        PadMode::Constant => return None,
        _ if len == 0 => return None,
        PadMode::Edge => position.clamp(0, len - 1),
        PadMode::Reflect if len == 1 => 0,
        PadMode::Reflect => {
            let period = 2 * (len - 1);
            let folded = position.rem_euclid(period);
            folded.min(period - folded)
        }
        PadMode::Wrap => position.rem_euclid(len),
    };
    Some(source as usize)
}

/// Indices over the `outer` axes, one per contiguous last-axis row.
fn rows(outer: &[usize]) -> impl Iterator<Item = Vec<usize>> + '_ {
    let product = (!outer.is_empty())
        .then(|| outer.iter().map(|&len| 0..len).multi_cartesian_product());
    let single = outer.is_empty().then(Vec::new);
    product.into_iter().flatten().chain(single)
}

/// Contiguous row-major buffer.
///
/// Layout used to hand data to and from device tensors,
/// which expose their storage as a flat slice plus a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T> {
    data: Box<[T]>,
    shape: Box<[usize]>,
}

impl<T: DataType> Buffer<T> {
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: vec![value; shape.iter().product()].into_boxed_slice(),
            shape: Box::from(shape),
        }
    }

    pub fn new_zeroed(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::zero())
    }

    pub fn to_owned_parts(self) -> (Box<[T]>, Box<[usize]>) {
        (self.data, self.shape)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let in_bounds = index.len() == self.shape.len()
            && index.iter().zip(self.shape.iter()).all(|(i, len)| i < len);
        if !in_bounds {
            return None;
        }
        self.data.get(self.offset(index))
    }

    fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.shape.len()];
        for axis in (0..self.shape.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * self.shape[axis + 1];
        }
        strides
    }

    fn offset(&self, index: &[usize]) -> usize {
        index.iter().zip(self.strides()).map(|(i, s)| i * s).sum()
    }
}

impl<T> Shape for Buffer<T> {
    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

impl<T: DataType> RasterBuffer for Buffer<T> {
    type Elem = T;

    fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        if shape.iter().product::<usize>() != data.len() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        Ok(Self {
            data: data.into_boxed_slice(),
            shape: Box::from(shape),
        })
    }

    fn slice(&self, ranges: &[Range<usize>]) -> Result<Self> {
        check_ranges(&self.shape, ranges)?;
        let Some((last, outer)) = ranges.split_last() else {
            return Ok(self.clone());
        };
        let strides = self.strides();
        let shape: Box<[usize]> = ranges.iter().map(ExactSizeIterator::len).collect();
        let outer_shape: Vec<usize> = outer.iter().map(ExactSizeIterator::len).collect();
        let mut data = Vec::with_capacity(shape.iter().product());
        for index in rows(&outer_shape) {
            let offset: usize = index
                .iter()
                .zip(outer)
                .zip(&strides)
                .map(|((i, range), stride)| (range.start + i) * stride)
                .sum();
            data.extend_from_slice(&self.data[offset + last.start..offset + last.end]);
        }
        Ok(Self {
            data: data.into_boxed_slice(),
            shape,
        })
    }

    fn pad(&self, widths: &[(usize, usize)], mode: PadMode, constant: T) -> Result<Self> {
        check_pad(&self.shape, widths, mode)?;
        let (Some((&(before, after), outer_widths)), Some((&len, outer_lens))) =
            (widths.split_last(), self.shape.split_last())
        else {
            return Ok(self.clone());
        };
        let strides = self.strides();
        let shape: Box<[usize]> = padded_shape(&self.shape, widths).into();
        let row_len = before + len + after;
        let mut data = Vec::with_capacity(shape.iter().product());
        for index in rows(&shape[..shape.len() - 1]) {
            let offset = index
                .iter()
                .zip(outer_widths)
                .zip(outer_lens)
                .zip(&strides)
                .map(|(((&i, &(before, _)), &len), stride)| {
                    source_index(i, before, len, mode).map(|source| source * stride)
                })
                .sum::<Option<usize>>();
            let Some(offset) = offset else {
                data.resize(data.len() + row_len, constant);
                continue;
            };
            let row = &self.data[offset..offset + len];
            let cell = |i| source_index(i, before, len, mode).map_or(constant, |source| row[source]);
            data.extend((0..before).map(cell));
            data.extend_from_slice(row);
            data.extend((before + len..row_len).map(cell));
        }
        Ok(Self {
            data: data.into_boxed_slice(),
            shape,
        })
    }

    fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }
}
