use attnviz::encoding::{encoding_matrix, similarity_matrix};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_encoding(c: &mut Criterion) {
    c.bench_function("encoding_matrix 128x512", |b| {
        b.iter(|| encoding_matrix(black_box(128), black_box(512)))
    });

    c.bench_function("similarity_matrix 64x128", |b| {
        b.iter(|| similarity_matrix(black_box(64), black_box(128)))
    });
}

criterion_group!(benches, bench_encoding);
criterion_main!(benches);
