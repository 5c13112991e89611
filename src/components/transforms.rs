use geo::{AffineTransform, Coord};

use crate::components::Window;

/// `transform` moved to the origin of `window`.
///
/// Resolution and rotation terms are kept, only the translation changes.
pub fn transform_for_window(transform: &AffineTransform, window: &Window) -> AffineTransform {
    let origin = transform.apply(Coord {
        x: window.col_off as f64,
        y: window.row_off as f64,
    });
    AffineTransform::new(
        transform.a(),
        transform.b(),
        origin.x,
        transform.d(),
        transform.e(),
        origin.y,
    )
}

/// Pixel size (x, y).
pub fn resolution(transform: &AffineTransform) -> (f64, f64) {
    (transform.a().abs(), transform.e().abs())
}
