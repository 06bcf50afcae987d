use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shortcode_service::utils::shortcode::{
    is_generated_shape, RandomShortcodeGenerator, ShortcodeGenerator,
};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortcode_generator");

    for length in [6usize, 10, 16] {
        let generator = RandomShortcodeGenerator::new(length);
        group.bench_function(format!("generate_len_{}", length), |b| {
            b.iter(|| black_box(generator.generate()))
        });
    }

    let code = RandomShortcodeGenerator::default().generate();
    group.bench_function("shape_check", |b| {
        b.iter(|| is_generated_shape(black_box(&code), 6))
    });

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
