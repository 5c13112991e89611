use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, ops::Range};

use crate::{
    components::{Axis, Dims},
    errors::{GeoTensorError, Result},
};

/// Index ranges to keep, by axis.
///
/// Axes left out keep their full extent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(BTreeMap<Axis, Range<isize>>);

impl<const N: usize> From<[(Axis, Range<isize>); N]> for Selection {
    fn from(value: [(Axis, Range<isize>); N]) -> Self {
        Self(BTreeMap::from(value))
    }
}

impl FromIterator<(Axis, Range<isize>)> for Selection {
    fn from_iter<I: IntoIterator<Item = (Axis, Range<isize>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, axis: Axis, range: Range<isize>) -> Self {
        self.0.insert(axis, range);
        self
    }

    pub fn get(&self, axis: Axis) -> Option<&Range<isize>> {
        self.0.get(&axis)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Axis, &Range<isize>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One range per axis of `dims`, clipped to `shape`.
    ///
    /// Only non-negative forward ranges are accepted.
    pub fn to_ranges(&self, dims: Dims, shape: &[usize]) -> Result<Box<[Range<usize>]>> {
        check_axes(self.0.keys(), dims)?;
        dims.iter()
            .zip(shape)
            .map(|(&axis, &len)| match self.0.get(&axis) {
                Some(range) => forward_range(axis, range, len),
                None => Ok(0..len),
            })
            .collect()
    }
}

fn forward_range(axis: Axis, range: &Range<isize>, len: usize) -> Result<Range<usize>> {
    if range.start < 0 || range.end < range.start {
        return Err(GeoTensorError::UnsupportedIndex {
            axis,
            start: range.start,
            stop: range.end,
        });
    }
    let stop = (range.end as usize).min(len);
    let start = (range.start as usize).min(stop);
    Ok(start..stop)
}

fn check_axes<'a>(mut axes: impl Iterator<Item = &'a Axis>, dims: Dims) -> Result<()> {
    match axes.find(|axis| dims.position(**axis).is_none()) {
        Some(&axis) => Err(GeoTensorError::UnknownAxis { axis, dims }),
        None => Ok(()),
    }
}

/// Cells to add `(before, after)` each axis.
///
/// Axes left out are not padded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadWidth(BTreeMap<Axis, (usize, usize)>);

impl<const N: usize> From<[(Axis, (usize, usize)); N]> for PadWidth {
    fn from(value: [(Axis, (usize, usize)); N]) -> Self {
        Self(BTreeMap::from(value))
    }
}

impl FromIterator<(Axis, (usize, usize))> for PadWidth {
    fn from_iter<I: IntoIterator<Item = (Axis, (usize, usize))>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl PadWidth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, axis: Axis, width: (usize, usize)) -> Self {
        self.0.insert(axis, width);
        self
    }

    pub fn get(&self, axis: Axis) -> (usize, usize) {
        self.0.get(&axis).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Axis, &(usize, usize))> {
        self.0.iter()
    }

    /// No cell gets added on any axis.
    pub fn is_zero(&self) -> bool {
        self.0.values().all(|&(before, after)| before == 0 && after == 0)
    }

    /// One `(before, after)` pair per axis of `dims`.
    pub fn to_widths(&self, dims: Dims) -> Result<Box<[(usize, usize)]>> {
        check_axes(self.0.keys(), dims)?;
        Ok(dims.iter().map(|&axis| self.get(axis)).collect())
    }
}
