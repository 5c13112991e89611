use criterion::{criterion_group, criterion_main, Criterion};
use geotensor::{AffineTransform, Buffer, GeoTensor, RasterBuffer, Window};
use ndarray::ArrayD;

const SHAPE: [usize; 3] = [4, 1024, 1024];
const WINDOW: Window = Window {
    row_off: -128,
    col_off: 896,
    height: 512,
    width: 512,
};

fn tensor<B: RasterBuffer<Elem = u16>>() -> GeoTensor<B> {
    let len: usize = SHAPE.iter().product();
    let values = B::from_shape_vec(&SHAPE, (0..len).map(|v| v as u16).collect()).unwrap();
    let transform = AffineTransform::new(10., 0., 499_980., 0., -10., 5_200_020.);
    GeoTensor::new(values, transform, "EPSG:32633", 0).unwrap()
}

fn bench_boundless_read(c: &mut Criterion) {
    let tensor = tensor::<ArrayD<u16>>();
    c.bench_function("boundless_read_ndarray", |b| {
        b.iter(|| tensor.read_from_window(&WINDOW, true))
    });
}

fn bench_boundless_read_flat(c: &mut Criterion) {
    let tensor = tensor::<Buffer<u16>>();
    c.bench_function("boundless_read_flat", |b| {
        b.iter(|| tensor.read_from_window(&WINDOW, true))
    });
}

criterion_group!(benches, bench_boundless_read, bench_boundless_read_flat);
criterion_main!(benches);
