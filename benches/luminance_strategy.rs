use std::hint::black_box;

use criterion::{
    BenchmarkGroup, BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime,
};
pub(crate) mod bench_utils;

use duotoner::{
    PaletteKind,
    prelude::{DuotoneTransform, LuminanceAnalyzer, LuminanceRange, Strategy, TextureTransform},
    texture::{Texture, TextureRef},
};

fn bench_luminance(group: &mut BenchmarkGroup<'_, WallTime>, strategy: Strategy, size: u32) {
    let image = bench_utils::gen_random_image(size);
    let mut samples = black_box(Texture::<f32>::new(size, size, 1));
    let mut analyzer = LuminanceAnalyzer::new(strategy);
    analyzer.prepare(image.shape(), samples.shape());

    group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |b, _| {
        let input = image.as_texture_slice();

        b.iter(|| {
            let res = analyzer.apply(input, samples.as_texture_mut_slice());
            black_box(res);
        });
    });
}

fn bench_duotone(group: &mut BenchmarkGroup<'_, WallTime>, strategy: Strategy, size: u32) {
    let image = bench_utils::gen_random_image(size);
    let mut output = black_box(Texture::<u8>::new(size, size, 4));
    let mut transform = DuotoneTransform::new(
        PaletteKind::Optimized.pair(false),
        LuminanceRange::new(0.1, 0.9),
        strategy,
    );

    group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |b, _| {
        let input = image.as_texture_slice();

        b.iter(|| {
            let res = transform.apply(input, output.as_texture_mut_slice());
            black_box(res);
        });
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    // around the point where Strategy::auto switches over
    let sizes = [100u32, 400, 450, 500, bench_utils::BENCH_IMAGE_SIZE];

    let mut group = c.benchmark_group("luminance_strategy");
    for size in sizes {
        bench_luminance(&mut group, Strategy::Seq, size);
        bench_luminance(&mut group, Strategy::Par, size);
    }
    group.finish();

    let mut group = c.benchmark_group("duotone_strategy");
    for size in sizes {
        bench_duotone(&mut group, Strategy::Seq, size);
        bench_duotone(&mut group, Strategy::Par, size);
    }
    group.finish();
}

criterion_group!(luminance_strategy, criterion_benchmark);
criterion_main!(luminance_strategy);
