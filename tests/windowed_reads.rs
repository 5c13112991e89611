use geotensor::{
    clip_and_pad, AffineTransform, Axis, Buffer, GeoTensor, PadMode, PadWidth, RasterBuffer,
    Selection, Shape, Window,
};
use ndarray::ArrayD;

const FILL: f32 = -1.;

fn tensor<B: RasterBuffer<Elem = f32>>(shape: &[usize]) -> GeoTensor<B> {
    let len: usize = shape.iter().product();
    let values = B::from_shape_vec(shape, (0..len).map(|v| v as f32).collect()).unwrap();
    let transform = AffineTransform::new(1., 0., 0., 0., -1., 0.);
    GeoTensor::new(values, transform, "EPSG:4326", FILL).unwrap()
}

/// Value at `index` of a row-major buffer.
fn at<B: RasterBuffer<Elem = f32>>(values: &B, index: &[usize]) -> f32 {
    let offset = index
        .iter()
        .zip(values.shape())
        .fold(0, |offset, (i, len)| offset * len + i);
    values.to_vec()[offset]
}

fn corner_window_read<B: RasterBuffer<Elem = f32>>() {
    let tensor = tensor::<B>(&[1, 10, 10]);
    let read = tensor
        .read_from_window(&Window::new(-2, -2, 5, 5), true)
        .unwrap();
    assert_eq!(read.shape(), &[1, 5, 5]);
    for row in 0..5 {
        for col in 0..5 {
            let value = at(read.values(), &[0, row, col]);
            if row < 2 || col < 2 {
                assert_eq!(value, FILL);
            } else {
                assert_eq!(value, at(tensor.values(), &[0, row - 2, col - 2]));
            }
        }
    }
    assert_eq!(
        (read.transform().xoff(), read.transform().yoff()),
        (-2., 2.)
    );
    assert_eq!(read.transform().a(), tensor.transform().a());
}

fn boundless_shape_matches_request<B: RasterBuffer<Elem = f32>>() {
    let tensor = tensor::<B>(&[2, 3, 6, 8]);
    for row_off in [-9, -3, 0, 2, 5, 6, 12] {
        for col_off in [-10, -1, 0, 4, 7, 8, 20] {
            for (height, width) in [(1, 1), (3, 5), (6, 8), (14, 3), (0, 3), (2, 0)] {
                let window = Window::new(row_off, col_off, height, width);
                let read = tensor.read_from_window(&window, true).unwrap();
                assert_eq!(read.shape(), &[2, 3, height, width], "{window:?}");
                assert_eq!(
                    read.transform(),
                    &geotensor::transform_for_window(tensor.transform(), &window),
                    "{window:?}"
                );
            }
        }
    }
}

fn inside_window_reads_agree<B: RasterBuffer<Elem = f32>>() {
    let tensor = tensor::<B>(&[3, 6, 8]);
    for window in [
        Window::new(0, 0, 6, 8),
        Window::new(1, 2, 3, 4),
        Window::new(5, 7, 1, 1),
    ] {
        let boundless = tensor.read_from_window(&window, true).unwrap();
        let bounded = tensor.read_from_window(&window, false).unwrap();
        assert_eq!(boundless, bounded);
    }
}

fn clipped_extent_plus_padding<B: RasterBuffer<Elem = f32>>() {
    let tensor = tensor::<B>(&[6, 8]);
    let window = Window::new(-3, 5, 4, 10);
    let (selection, pad_width) = clip_and_pad(&tensor.full_window(), &window);
    let sliced = tensor.isel(&selection).unwrap();
    let (top, bottom) = pad_width.get(Axis::Y);
    let (left, right) = pad_width.get(Axis::X);
    assert_eq!(sliced.height() + top + bottom, window.height);
    assert_eq!(sliced.width() + left + right, window.width);
    let padded = sliced
        .pad(&pad_width, PadMode::Constant, tensor.fill_value_default())
        .unwrap();
    assert_eq!(padded, tensor.read_from_window(&window, true).unwrap());
}

fn full_selection_round_trip<B: RasterBuffer<Elem = f32>>() {
    let tensor = tensor::<B>(&[2, 3, 4, 5]);
    let selection = Selection::from([
        (Axis::Time, 0..2),
        (Axis::Band, 0..3),
        (Axis::Y, 0..4),
        (Axis::X, 0..5),
    ]);
    let copy = tensor.isel(&selection).unwrap();
    assert_eq!(copy, tensor);
    assert_eq!(copy.bounds(), tensor.bounds());
}

fn padding_columns<B: RasterBuffer<Elem = f32>>() {
    let tensor = tensor::<B>(&[4, 5]);
    let pad_width = PadWidth::from([(Axis::X, (1, 1)), (Axis::Y, (0, 0))]);
    let padded = tensor.pad(&pad_width, PadMode::Constant, 42.).unwrap();
    assert_eq!(padded.shape(), &[4, 7]);
    assert_eq!(
        padded.transform().xoff(),
        tensor.transform().xoff() - tensor.resolution().0
    );
    for row in 0..4 {
        assert_eq!(at(padded.values(), &[row, 0]), 42.);
        assert_eq!(at(padded.values(), &[row, 6]), 42.);
    }
}

macro_rules! backend_tests {
    ($name:ident, $buffer:ty) => {
        mod $name {
            use super::*;

            #[test_log::test]
            fn corner_window_read() {
                super::corner_window_read::<$buffer>()
            }

            #[test_log::test]
            fn boundless_shape_matches_request() {
                super::boundless_shape_matches_request::<$buffer>()
            }

            #[test_log::test]
            fn inside_window_reads_agree() {
                super::inside_window_reads_agree::<$buffer>()
            }

            #[test_log::test]
            fn clipped_extent_plus_padding() {
                super::clipped_extent_plus_padding::<$buffer>()
            }

            #[test_log::test]
            fn full_selection_round_trip() {
                super::full_selection_round_trip::<$buffer>()
            }

            #[test_log::test]
            fn padding_columns() {
                super::padding_columns::<$buffer>()
            }
        }
    };
}

backend_tests!(ndarray_backend, ArrayD<f32>);
backend_tests!(flat_backend, Buffer<f32>);

#[test_log::test]
fn backends_read_the_same_values() {
    let window = Window::new(-1, 3, 7, 9);
    let from_array = tensor::<ArrayD<f32>>(&[2, 6, 8])
        .read_from_window(&window, true)
        .unwrap();
    let from_flat = tensor::<Buffer<f32>>(&[2, 6, 8])
        .read_from_window(&window, true)
        .unwrap();
    assert_eq!(from_array.values().to_vec(), from_flat.values().to_vec());
    assert_eq!(from_array.transform(), from_flat.transform());
}
