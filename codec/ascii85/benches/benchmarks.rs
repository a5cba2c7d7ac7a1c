use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn encode_benchmark(c: &mut Criterion) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| (i * 31 % 251) as u8).collect();
    let encoded = aw_ascii85::encode(&data);

    c.bench_function("encode 64KiB", |b| b.iter(|| aw_ascii85::encode(black_box(&data))));
    c.bench_function("decode 64KiB", |b| b.iter(|| aw_ascii85::decode(black_box(&encoded))));
}

criterion_group!(benches, encode_benchmark);
criterion_main!(benches);
