// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the logosoup-measure crate. Covers the full
// measurement pass (content box, visual centre, density) on a synthetic
// padded logo, which is dominated by the nested pixel scans.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use logosoup_measure::{MeasureOptions, measure_with_content_detection};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark a full measurement on a 512x256 logo: transparent padding
/// around a dark ring-shaped mark.
fn bench_measure_with_density(c: &mut Criterion) {
    let (width, height) = (512u32, 256u32);
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let (cx, cy) = (256.0f32, 128.0f32);
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            if (60.0..100.0).contains(&d) {
                img.put_pixel(x, y, Rgba([20, 30, 90, 255]));
            }
        }
    }

    let options = MeasureOptions {
        include_density: true,
        ..Default::default()
    };

    c.bench_function("measure_with_content_detection (512x256)", |b| {
        b.iter(|| {
            let result = measure_with_content_detection(black_box(&img), &options);
            black_box(result);
        });
    });
}

criterion_group!(benches, bench_measure_with_density);
criterion_main!(benches);
