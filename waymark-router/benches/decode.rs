use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waymark_router::{decode_segment, RequestPath};

const SEGMENTS: &[&str] = &[
    "plain-segment",
    "TE%2FST",
    "java%2Fkotlin%E2%9C%93",
    "100%-not-an-escape",
    "%E4%BD%A0%E5%A5%BD%E4%B8%96%E7%95%8C",
];

fn decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");

    group.bench_function("decode_segment", |b| {
        b.iter(|| {
            for segment in SEGMENTS {
                black_box(decode_segment(segment));
            }
        });
    });

    group.bench_function("split_and_decode", |b| {
        let raw = "/java%2Fkotlin/path/%2Fjava%2Fkotlin//deeper/";
        b.iter(|| {
            let path = RequestPath::new(black_box(raw));
            for segment in path.segments() {
                black_box(decode_segment(segment));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, decode);
criterion_main!(benches);
