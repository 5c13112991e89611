use geo::{AffineTransform, Coord, Rect};
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::{
    components::Axis,
    errors::{GeoTensorError, Result},
    intersection::Intersection,
    selection::{PadWidth, Selection},
};

/// Rectangular region in (row, col) index space.
///
/// A requested region, not a validated one: offsets may be negative
/// and the extent may reach past the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub row_off: isize,
    pub col_off: isize,
    pub height: usize,
    pub width: usize,
}

impl Window {
    pub fn new(row_off: isize, col_off: isize, height: usize, width: usize) -> Self {
        Self {
            row_off,
            col_off,
            height,
            width,
        }
    }

    /// Window covering a whole `height` x `width` buffer.
    pub fn full(height: usize, width: usize) -> Self {
        Self::new(0, 0, height, width)
    }

    /// Backward ranges give an empty window.
    pub fn from_slices(rows: Range<isize>, cols: Range<isize>) -> Self {
        Self::new(
            rows.start,
            cols.start,
            rows.end.saturating_sub(rows.start).max(0) as usize,
            cols.end.saturating_sub(cols.start).max(0) as usize,
        )
    }

    /// Covering window of geographic `bounds` under `transform`.
    ///
    /// Fractional pixel edges are rounded outwards.
    pub fn from_bounds(bounds: &Rect, transform: &AffineTransform) -> Result<Self> {
        let inverse = transform
            .inverse()
            .ok_or(GeoTensorError::NonInvertibleTransform)?;
        let (min, max) = (bounds.min(), bounds.max());
        let corners = [
            Coord { x: min.x, y: min.y },
            Coord { x: min.x, y: max.y },
            Coord { x: max.x, y: min.y },
            Coord { x: max.x, y: max.y },
        ]
        .map(|corner| inverse.apply(corner));
        let (col_min, col_max) = extent(corners.iter().map(|coord| coord.x));
        let (row_min, row_max) = extent(corners.iter().map(|coord| coord.y));
        let (row_start, row_stop) = (snap(row_min).floor(), snap(row_max).ceil());
        let (col_start, col_stop) = (snap(col_min).floor(), snap(col_max).ceil());
        Ok(Self::from_slices(
            row_start as isize..row_stop as isize,
            col_start as isize..col_stop as isize,
        ))
    }

    pub fn row_end(&self) -> isize {
        self.row_off.saturating_add_unsigned(self.height)
    }

    pub fn col_end(&self) -> isize {
        self.col_off.saturating_add_unsigned(self.width)
    }

    /// (rows, cols)
    pub fn toslices(&self) -> (Range<isize>, Range<isize>) {
        (self.row_off..self.row_end(), self.col_off..self.col_end())
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Geographic box spanned by the window under `transform`.
    ///
    /// Uses the (row_off, col_off) and (row_end, col_end) corners.
    pub fn bounds(&self, transform: &AffineTransform) -> Rect {
        let corner = |row: isize, col: isize| {
            transform.apply(Coord {
                x: col as f64,
                y: row as f64,
            })
        };
        Rect::new(
            corner(self.row_end(), self.col_off),
            corner(self.row_off, self.col_end()),
        )
    }
}

impl Intersection for Window {
    type Output = Window;
    fn intersection(&self, rhs: &Self) -> Result<Window> {
        let row_start = self.row_off.max(rhs.row_off);
        let row_stop = self.row_end().min(rhs.row_end());
        let col_start = self.col_off.max(rhs.col_off);
        let col_stop = self.col_end().min(rhs.col_end());
        if row_stop <= row_start || col_stop <= col_start {
            return Err(GeoTensorError::EmptyIntersection);
        }
        Ok(Window::from_slices(row_start..row_stop, col_start..col_stop))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    })
}

/// Rounds values within float noise of an integer.
fn snap(value: f64) -> f64 {
    const EPSILON: f64 = 1e-9;
    let rounded = value.round();
    if (value - rounded).abs() < EPSILON {
        rounded
    } else {
        value
    }
}

/// Clipped range along one axis of length `len` and the cells
/// missing `(before, after)` it, for the requested `start..start + size`.
///
/// Extents beyond `isize::MAX` saturate, the cells after still add up to `size`.
fn clip_axis(len: usize, start: isize, size: usize) -> (Range<isize>, (usize, usize)) {
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    let stop = start.saturating_add_unsigned(size);
    let clip_start = start.clamp(0, len);
    let clip_stop = stop.clamp(clip_start, len);
    let before = if start < 0 { start.unsigned_abs().min(size) } else { 0 };
    let after = size - before - clip_start.abs_diff(clip_stop);
    (clip_start..clip_stop, (before, after))
}

/// Slices of `data_window` overlapped by `requested`, and the padding
/// that grows them back to the requested extent.
///
/// Slices are local to `data_window` and never negative. For each spatial axis
/// the slice length plus both pad amounts equals the requested extent.
pub fn clip_and_pad(data_window: &Window, requested: &Window) -> (Selection, PadWidth) {
    let (rows, pad_rows) = clip_axis(
        data_window.height,
        requested.row_off.saturating_sub(data_window.row_off),
        requested.height,
    );
    let (cols, pad_cols) = clip_axis(
        data_window.width,
        requested.col_off.saturating_sub(data_window.col_off),
        requested.width,
    );
    debug!(
        "clipped {requested:?} to rows {rows:?} cols {cols:?}, padding rows {pad_rows:?} cols {pad_cols:?}"
    );
    (
        Selection::from([(Axis::Y, rows), (Axis::X, cols)]),
        PadWidth::from([(Axis::Y, pad_rows), (Axis::X, pad_cols)]),
    )
}
