use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bgnorm_rs::image_pipeline::{
    BackgroundNormalizer, ConversionConfig, FillPolicy, NormConfig, NormalizePipeline, Pix, StandardTiffWriter,
    ImageWriter, TiffCompression, TiffOutput,
};

/// Uneven paper (brighter toward the right) with regular dark strokes.
fn generate_page_samples(width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            let paper = 170 + (x * 60 / width) as u8;
            let value = if (x / 7 + y / 11) % 9 == 0 { 35 } else { paper };
            for c in 0..channels {
                data.push(value.saturating_sub(c as u8 * 10));
            }
        }
    }
    data
}

fn gray_page(width: usize, height: usize) -> Pix {
    Pix::from_gray_samples(width, height, &generate_page_samples(width, height, 1)).unwrap()
}

fn rgb_page(width: usize, height: usize) -> Pix {
    Pix::from_rgb_samples(width, height, &generate_page_samples(width, height, 3)).unwrap()
}

fn benchmark_normalize_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_by_size");
    let normalizer = BackgroundNormalizer::default();

    let sizes = vec![
        (100, 150, "100x150"),
        (500, 750, "500x750"),
        (1000, 1500, "1000x1500"),
    ];

    for (width, height, label) in sizes {
        let gray = gray_page(width, height);
        group.bench_with_input(BenchmarkId::new("gray", label), &gray, |b, pix| {
            b.iter(|| normalizer.normalize(black_box(pix)));
        });

        let rgb = rgb_page(width, height);
        group.bench_with_input(BenchmarkId::new("rgb", label), &rgb, |b, pix| {
            b.iter(|| normalizer.normalize(black_box(pix)));
        });
    }

    group.finish();
}

fn benchmark_fill_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_policy");
    let page = gray_page(500, 750);

    for (policy, label) in [(FillPolicy::Columns, "columns"), (FillPolicy::ColumnsAndRows, "columns_and_rows")] {
        let normalizer = BackgroundNormalizer::new(NormConfig::builder().fill_policy(policy).build());
        group.bench_function(label, |b| {
            b.iter(|| normalizer.normalize(black_box(&page)));
        });
    }

    group.finish();
}

fn benchmark_file_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiff_pipeline");
    let mut encoded: Vec<u8> = Vec::new();
    StandardTiffWriter
        .write_image(&gray_page(500, 750), &mut encoded, &TiffOutput::default())
        .unwrap();

    let compressions = vec![
        (TiffCompression::None, "none"),
        (TiffCompression::Lzw, "lzw"),
        (TiffCompression::DeflateFast, "deflate_fast"),
    ];

    for (compression, label) in compressions {
        let config = ConversionConfig::builder().compression(compression).build();
        let pipeline = NormalizePipeline::new(config);
        group.bench_with_input(BenchmarkId::from_parameter(label), &encoded, |b, data| {
            b.iter(|| {
                let mut output: Vec<u8> = Vec::new();
                let _ = pipeline.convert(black_box(data), &mut output);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_normalize_sizes,
    benchmark_fill_policies,
    benchmark_file_pipeline
);
criterion_main!(benches);
