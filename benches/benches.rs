use criterion::{Criterion, criterion_group, criterion_main};
use nntm_rs::{Calculator, Conditions, Duplex, Orientation, Strand};
use std::hint::black_box;

const SEQ: &str = "GAAATAGACGCCAAGTTCAATCCGTACTCCGACGTACGATGGAACAGTGTGGATGTGACGAGCTTCATTTATACC";
const MISMATCHED: &str = "CTTTATCTGCTGTTCAAGTTAGGCATGAGGATGCATGCTACCTTGTCACAACTACACTGCTCGAAGTAAATATGG";

fn criterion_benchmark(c: &mut Criterion) {
    let calculator = Calculator::default();
    let perfect = Duplex::new(
        "perfect",
        Strand::new(SEQ).unwrap(),
        Conditions::default(),
    );
    let mismatched = perfect.clone().with_secondary(
        Strand::new(MISMATCHED).unwrap(),
        Orientation::ThreeToFive,
    );

    c.bench_function("calculate", |b| {
        b.iter(|| calculator.calculate(black_box(&perfect)))
    });
    c.bench_function("calculate mismatched", |b| {
        b.iter(|| calculator.calculate(black_box(&mismatched)))
    });

    let batch = vec![perfect; 1000];
    c.bench_function("calculate_batch 1000", |b| {
        b.iter(|| calculator.calculate_batch(black_box(&batch)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
