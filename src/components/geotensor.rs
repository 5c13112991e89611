use geo::{AffineTransform, Rect};
use log::{debug, info};
use std::fmt::Display;

use crate::{
    buffer::{ambassador_impl_Shape, PadMode, RasterBuffer, Shape},
    components::{
        bounds::GeoBounds,
        transforms::{resolution, transform_for_window},
        window::clip_and_pad,
        Axis, Dims, Window,
    },
    crs::Crs,
    errors::Result,
    intersection::Intersection,
    selection::Selection,
};

/// Georeferenced array.
///
/// Pairs a 2d-4d buffer with the affine transform mapping its
/// (col, row) indices to coordinates in `crs`.
/// Operations never modify `self`, they return new tensors.
#[derive(ambassador::Delegate, Debug, Clone, PartialEq)]
#[delegate(Shape, target = "values")]
pub struct GeoTensor<B: RasterBuffer> {
    values: B,
    transform: AffineTransform,
    crs: Crs,
    fill_value_default: B::Elem,
    dims: Dims,
}

impl<B: RasterBuffer> GeoTensor<B> {
    pub fn new(
        values: B,
        transform: AffineTransform,
        crs: impl Into<Crs>,
        fill_value_default: B::Elem,
    ) -> Result<Self> {
        let dims = Dims::from_shape(values.shape())?;
        Ok(Self {
            values,
            transform,
            crs: crs.into(),
            fill_value_default,
            dims,
        })
    }

    /// Same crs and fill value on new values.
    pub(crate) fn derive(&self, values: B, transform: AffineTransform) -> Self {
        Self {
            values,
            transform,
            crs: self.crs.clone(),
            fill_value_default: self.fill_value_default,
            dims: self.dims,
        }
    }

    pub fn values(&self) -> &B {
        &self.values
    }

    pub fn into_values(self) -> B {
        self.values
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn fill_value_default(&self) -> B::Elem {
        self.fill_value_default
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn dtype(&self) -> &'static str {
        self.values.dtype()
    }

    pub fn height(&self) -> usize {
        self.shape()[self.ndim() - 2]
    }

    pub fn width(&self) -> usize {
        self.shape()[self.ndim() - 1]
    }

    /// Number of bands, 1 for 2d tensors.
    pub fn count(&self) -> usize {
        self.dims
            .position(Axis::Band)
            .map_or(1, |axis| self.shape()[axis])
    }

    /// Pixel size (x, y).
    pub fn resolution(&self) -> (f64, f64) {
        resolution(&self.transform)
    }

    /// Window covering the whole buffer.
    pub fn full_window(&self) -> Window {
        Window::full(self.height(), self.width())
    }

    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::new(self.crs.clone(), self.full_window().bounds(&self.transform))
    }

    /// Slices axes by name.
    ///
    /// Only non-negative forward ranges are supported. The transform
    /// follows the `y`/`x` ranges, other axes leave it untouched.
    pub fn isel(&self, selection: &Selection) -> Result<Self> {
        let ranges = selection.to_ranges(self.dims, self.shape())?;
        let [rows, cols] = Axis::SPATIAL.map(|axis| {
            selection
                .get(axis)
                .cloned()
                .unwrap_or(0..self.axis_len(axis) as isize)
        });
        let window = Window::from_slices(rows, cols);
        let transform = transform_for_window(&self.transform, &window);
        debug!("isel {ranges:?} with origin at {window:?}");
        let values = self.values.slice(&ranges)?;
        Ok(self.derive(values, transform))
    }

    /// Reads `window`, which may reach outside the buffer.
    ///
    /// Boundless reads always return the requested height and width, cells
    /// outside the buffer get `fill_value_default`. Otherwise only the part of
    /// `window` inside the buffer is read and a window that does not overlap
    /// it fails with [crate::GeoTensorError::EmptyIntersection].
    pub fn read_from_window(&self, window: &Window, boundless: bool) -> Result<Self> {
        let data_window = self.full_window();
        if !boundless {
            let window_read = window.intersection(&data_window)?;
            let (rows, cols) = window_read.toslices();
            return self.isel(&Selection::from([(Axis::Y, rows), (Axis::X, cols)]));
        }

        let (selection, pad_width) = clip_and_pad(&data_window, window);
        let sliced = self.isel(&selection)?;
        let read = if pad_width.is_zero() {
            sliced
        } else {
            info!("boundless read of {window:?} pads {pad_width:?}");
            sliced.pad(&pad_width, PadMode::Constant, self.fill_value_default)?
        };
        if data_window.intersection(window).is_ok() {
            return Ok(read);
        }
        // Nothing was read, the origin comes from the window alone.
        let transform = transform_for_window(&self.transform, window);
        Ok(Self { transform, ..read })
    }

    /// Reads the pixels covering geographic `bounds`, see [Self::read_from_window].
    pub fn read_from_bounds(&self, bounds: &Rect, boundless: bool) -> Result<Self> {
        let window = Window::from_bounds(bounds, &self.transform)?;
        self.read_from_window(&window, boundless)
    }

    fn axis_len(&self, axis: Axis) -> usize {
        self.dims
            .position(axis)
            .map_or(0, |position| self.shape()[position])
    }
}

impl<B: RasterBuffer> Display for GeoTensor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transform: {:?}", self.transform)?;
        writeln!(f, "Shape: {:?}", self.shape())?;
        writeln!(f, "Resolution: {:?}", self.resolution())?;
        writeln!(f, "Bounds: {}", self.bounds())?;
        writeln!(f, "CRS: {}", self.crs)?;
        write!(f, "fill_value_default: {:?}", self.fill_value_default)
    }
}
