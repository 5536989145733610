use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rvmarshal::rgss::Map;
use rvmarshal::{from_slice, Extensions, Value};

#[path = "../tests/common/mod.rs"]
mod common;

use common::Stream;

/// A map of the given size with random tiles and `events` simple events.
fn map(width: i32, height: i32, events: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(7);
    let tiles: Vec<i16> = (0..width * height * 4)
        .map(|_| rng.gen_range(0..8192))
        .collect();

    let mut s = Stream::new();
    s.object("RPG::Map", 5)
        .sym("@width")
        .int(width as i64)
        .sym("@height")
        .int(height as i64)
        .sym("@bgm")
        .sound("Town1", 100, 100)
        .sym("@data")
        .table(width, height, 4, &tiles)
        .sym("@events")
        .hash(events);
    for id in 1..=events as i64 {
        s.int(id)
            .object("RPG::Event", 4)
            .sym("@id")
            .int(id)
            .sym("@name")
            .str(&format!("EV{:03}", id))
            .sym("@x")
            .int(rng.gen_range(0..width as i64))
            .sym("@pages")
            .array(1)
            .object("RPG::Event::Page", 1)
            .sym("@list")
            .array(3);
        for code in [101i64, 401, 0].iter() {
            s.object("RPG::EventCommand", 2)
                .sym("@code")
                .int(*code)
                .sym("@parameters")
                .array(1)
                .str("Hello there");
        }
    }
    s.finish()
}

fn decode_map(c: &mut Criterion) {
    let ext = Extensions::rgss();
    let mut group = c.benchmark_group("decode_map");
    for &(size, events) in [(20, 10), (100, 100), (500, 500)].iter() {
        let data = map(size, size, events);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("record", size), &data, |b, data| {
            b.iter(|| from_slice::<Map>(black_box(data), &ext).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("value", size), &data, |b, data| {
            b.iter(|| from_slice::<Value>(black_box(data), &ext).unwrap())
        });
    }
    group.finish();
}

fn decode_strings(c: &mut Criterion) {
    let ext = Extensions::new();
    let mut s = Stream::new();
    s.array(10_000);
    for i in 0..10_000 {
        s.str(&format!("switch {}", i));
    }
    let data = s.finish();
    let mut group = c.benchmark_group("decode_strings");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("vec_string", |b| {
        b.iter(|| from_slice::<Vec<String>>(black_box(&data), &ext).unwrap())
    });
    group.finish();
}

criterion_group!(benches, decode_map, decode_strings);
criterion_main!(benches);
