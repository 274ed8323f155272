//! Pipeline throughput benchmarks across a few representative image sizes.

use cad2vec_core::config::PipelineOptions;
use cad2vec_core::{convert, RasterImage};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn checkerboard(size: u32) -> RasterImage {
    let cell = (size / 8).max(1);
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if on { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RasterImage::new(size, size, data).unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for size in [64u32, 128, 256] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let image = checkerboard(size);

        group.bench_with_input(BenchmarkId::new("skeleton_edge_chain", size), &size, |b, _| {
            let options = PipelineOptions::default();
            b.iter(|| {
                black_box(convert(&image, &options, None).unwrap());
            });
        });

        group.bench_with_input(BenchmarkId::new("canny_marching_squares", size), &size, |b, _| {
            let mut options = PipelineOptions::default();
            options.edge_detection.method = cad2vec_core::config::EdgeMethod::Canny;
            options.contour_detection.method = cad2vec_core::config::ContourMethod::MarchingSquares;
            b.iter(|| {
                black_box(convert(&image, &options, None).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
