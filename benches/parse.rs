use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [1_024usize, 10_240, 102_400] {
        let input = make_input(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| dotenvkit::parse_str(black_box(input), false).expect("parse should succeed"));
        });
    }
    group.finish();
}

fn bench_parse_multiline(c: &mut Criterion) {
    let lines = make_multiline_lines(500);
    c.bench_function("parse_multiline_quoted", |b| {
        b.iter(|| dotenvkit::parse_lines(black_box(&lines), true).expect("parse should succeed"));
    });
}

fn make_input(bytes: usize) -> String {
    let line = "KEY=value\n";
    let repeat = bytes / line.len() + 1;
    line.repeat(repeat)
}

fn make_multiline_lines(entries: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries * 3);
    for idx in 0..entries {
        lines.push(format!("KEY_{idx}=\"first line with \\\"escaped\\\" quotes"));
        lines.push("second line".to_owned());
        lines.push("third line\"".to_owned());
    }
    lines
}

criterion_group!(benches, bench_parse, bench_parse_multiline);
criterion_main!(benches);
