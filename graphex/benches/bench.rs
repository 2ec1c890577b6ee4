use criterion::{Criterion, criterion_group, criterion_main};
use graphex::Regex;
use std::hint::black_box;

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_mul", |b| {
        b.iter(|| black_box(Regex::new(black_box(r"mul(\d+,\d+)"))))
    });
}

fn bench_basic_matching(c: &mut Criterion) {
    let pattern = Regex::new(r"mul(\d+,\d+)").unwrap();
    let input = "notmul(112,2)+some mjunkmul(12,22)+some junkmul(61,2222)a";

    c.bench_function("basic_match", |b| {
        b.iter(|| black_box(pattern.find(black_box(input))))
    });
}

fn bench_find_all(c: &mut Criterion) {
    let pattern = Regex::new(r"mul(\d+,\d+)").unwrap();
    let input = "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))".repeat(64);

    c.bench_function("find_all_mul", |b| {
        b.iter(|| black_box(pattern.find_all(black_box(&input))))
    });
}

fn bench_backtracking(c: &mut Criterion) {
    let pattern = Regex::new(".*.*.*c").unwrap();
    let input = "ab".repeat(16);

    c.bench_function("nested_star_miss", |b| {
        b.iter(|| black_box(pattern.find(black_box(&input))))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_basic_matching,
    bench_find_all,
    bench_backtracking,
);

criterion_main!(benches);
