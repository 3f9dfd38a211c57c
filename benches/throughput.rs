use bytes::BytesMut;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use relay_proto::{CommandLine, LineCodec};
use relayd::handlers;
use relayd::state::SessionRegistry;
use std::hint::black_box;
use std::time::Duration;
use tokio_util::codec::{Decoder, Encoder};

// Baseline costs on the relay hot path: framing, command parsing, and
// building the online list and fan-out for a busy registry.

fn codec_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let raw = b"the quick brown fox jumps over the lazy dog\r\n";
    group.throughput(Throughput::Bytes(raw.len() as u64));

    group.bench_function("decode_line", |b| {
        let mut codec = LineCodec::new();
        b.iter(|| {
            let mut buf = BytesMut::from(&raw[..]);
            codec.decode(black_box(&mut buf)).unwrap()
        })
    });

    group.bench_function("encode_line", |b| {
        let mut codec = LineCodec::new();
        let mut dst = BytesMut::with_capacity(128);
        b.iter(|| {
            dst.clear();
            codec
                .encode(black_box("frank: the quick brown fox"), &mut dst)
                .unwrap();
        })
    });

    group.finish();
}

fn command_parsing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("command");
    group.throughput(Throughput::Elements(1));

    group.bench_function("parse_register", |b| {
        b.iter(|| CommandLine::parse(black_box("/register frank hunter2")))
    });

    group.finish();
}

fn registry_benchmark(c: &mut Criterion) {
    let registry = SessionRegistry::new(1024, Duration::from_secs(2));
    let mut outboxes = Vec::new();
    for _ in 0..500 {
        outboxes.push(registry.create().1);
    }

    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(500));

    group.bench_function("online_summary_500", |b| {
        b.iter(|| registry.online_summary())
    });

    group.bench_function("broadcast_500", |b| {
        b.iter(|| {
            handlers::broadcast(&registry, 1, black_box("hello everyone"));
            for outbox in &mut outboxes {
                while outbox.lines.try_recv().is_ok() {}
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    codec_benchmark,
    command_parsing_benchmark,
    registry_benchmark
);
criterion_main!(benches);
