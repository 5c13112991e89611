use log::debug;

use crate::{
    buffer::{PadMode, RasterBuffer},
    components::{transforms::transform_for_window, Axis, GeoTensor, Window},
    errors::Result,
    selection::PadWidth,
};

impl<B: RasterBuffer> GeoTensor<B> {
    /// Extends the tensor outwards by `pad_width` cells.
    ///
    /// The transform origin moves up and left by the `y`/`x` padding added
    /// before the data, so existing cells keep their coordinates.
    pub fn pad(&self, pad_width: &PadWidth, mode: PadMode, constant_values: B::Elem) -> Result<Self> {
        let widths = pad_width.to_widths(self.dims())?;
        let [(top, bottom), (left, right)] = Axis::SPATIAL.map(|axis| pad_width.get(axis));
        let window = Window::new(
            -(top as isize),
            -(left as isize),
            self.height() + top + bottom,
            self.width() + left + right,
        );
        let transform = transform_for_window(self.transform(), &window);
        debug!("padding {widths:?} ({mode:?}) to {window:?}");
        let values = self.values().pad(&widths, mode, constant_values)?;
        Ok(self.derive(values, transform))
    }
}
