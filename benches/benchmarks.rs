use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use gfshares::{Config, SecretSharing, ShareComponents};

const SECRET: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";

fn tables(c: &mut Criterion) {
    c.bench_function("build_tables_8", |b| {
        b.iter(|| SecretSharing::new(black_box(Config::default())))
    });
    c.bench_function("build_tables_16", |b| {
        b.iter(|| SecretSharing::new(black_box(Config { bits: 16, radix: 16 })))
    });
}

fn share(c: &mut Criterion) {
    let sss = SecretSharing::new(Config::default()).unwrap();

    c.bench_function("share_10_of_5", |b| {
        b.iter(|| sss.share(black_box(SECRET), 10, 5))
    });
    c.bench_function("share_255_of_255", |b| {
        b.iter(|| sss.share(black_box(SECRET), 255, 255))
    });
}

fn combine(c: &mut Criterion) {
    let sss = SecretSharing::new(Config::default()).unwrap();
    let shares = sss.share(SECRET, 255, 255).unwrap();
    let few = sss.share(SECRET, 10, 5).unwrap();

    c.bench_function("combine_5", |b| {
        b.iter(|| sss.combine(black_box(&few[..5])))
    });
    c.bench_function("combine_255", |b| {
        b.iter(|| sss.combine(black_box(&shares)))
    });
    c.bench_function("new_share_5", |b| {
        b.iter(|| sss.new_share(black_box(200), &few[..5]))
    });
}

fn codec(c: &mut Criterion) {
    let sss = SecretSharing::new(Config::default()).unwrap();
    let share = sss.share(SECRET, 3, 2).unwrap().remove(0);
    let parts = sss.extract_share_components(&share).unwrap();

    c.bench_function("share_from_string", |b| {
        b.iter(|| ShareComponents::decode(black_box(&share), 16))
    });
    c.bench_function("share_to_string", |b| {
        b.iter(|| black_box(&parts).encode(16))
    });
}

criterion_group!(benches, tables, share, combine, codec);
criterion_main!(benches);
