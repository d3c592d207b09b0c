//! Benchmarks for svgslice scanning and pixel processing.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic documents and buffers; no files are read.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use svgslice::render::downsample;
use svgslice::{png, scan_titles, PixelFormat, RasterBuffer};

/// Creates a synthetic document with the given number of titled groups.
fn create_test_svg(group_count: usize) -> Vec<u8> {
    let mut content = String::new();
    content.push_str("<?xml version=\"1.0\"?>\n");
    content.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1024\" height=\"1024\">\n");
    content.push_str("<rect width=\"1024\" height=\"1024\" fill=\"#202020\"/>\n");

    for i in 0..group_count {
        let x = (i % 32) * 32;
        let y = (i / 32) * 32;
        content.push_str(&format!(
            "<g transform=\"translate({x},{y})\"><title>seg-{i}</title>\
             <path d=\"M 0,0 L 24,0 L 24,24 L 0,24 Z\" fill=\"#a0a0a0\"/>\
             <rect x=\"4\" y=\"4\" width=\"16\" height=\"16\"/></g>\n"
        ));
    }

    content.push_str("</svg>\n");
    content.into_bytes()
}

fn create_test_buffer(width: u32, height: u32) -> RasterBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x % 256) as u8);
            data.push((y % 256) as u8);
            data.push(((x + y) % 256) as u8);
            data.push(255);
        }
    }
    RasterBuffer::from_raw(width, height, PixelFormat::Rgba, data).unwrap()
}

/// Benchmark the title scan at a few document sizes.
fn bench_scan_titles(c: &mut Criterion) {
    let small = create_test_svg(16);
    let large = create_test_svg(512);

    c.bench_function("scan_titles_16_groups", |b| {
        b.iter(|| scan_titles(black_box(&small)));
    });

    c.bench_function("scan_titles_512_groups", |b| {
        b.iter(|| scan_titles(black_box(&large)));
    });
}

/// Benchmark the box downsampler at typical ratios.
fn bench_downsample(c: &mut Criterion) {
    let source = create_test_buffer(1024, 1024);

    c.bench_function("downsample_1024_ratio_4", |b| {
        b.iter(|| downsample(black_box(&source), 4).unwrap());
    });

    c.bench_function("downsample_1024_ratio_16", |b| {
        b.iter(|| downsample(black_box(&source), 16).unwrap());
    });
}

/// Benchmark PNG encoding of a downsampled layer.
fn bench_png_encode(c: &mut Criterion) {
    let source = create_test_buffer(1024, 1024);
    let layer = downsample(&source, 4).unwrap();

    c.bench_function("png_encode_256", |b| {
        b.iter(|| png::encode(black_box(&layer)).unwrap());
    });
}

criterion_group!(benches, bench_scan_titles, bench_downsample, bench_png_encode);
criterion_main!(benches);
