use canonical::tokenize;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [64, 512, 4096, 32768].iter() {
        let text = "Verify, your ACCOUNT! ".repeat(*size / 22);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("bytes_{size}"), |b| {
            b.iter(|| tokenize(black_box(&text)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
