mod common;

use common::Stream;
use rand::prelude::*;
use rvmarshal::rgss::{Map, System};
use rvmarshal::{from_slice, Decoder, DecoderOptions, Extensions, Value};

fn sample() -> Vec<u8> {
    let mut s = Stream::new();
    s.object("RPG::Map", 5)
        .sym("@tileset_id")
        .int(1)
        .sym("@display_name")
        .str("Harbor")
        .sym("@bgm")
        .sound("Town1", 100, 100)
        .sym("@data")
        .table(2, 2, 1, &[1, 2, 3, 4])
        .sym("@events")
        .hash(1)
        .int(1)
        .object("RPG::Event", 3)
        .sym("@id")
        .int(1)
        .sym("@x")
        .int(-300)
        .sym("@pages")
        .array(1)
        .object("RPG::Event::Page", 1)
        .sym("@list")
        .array(1)
        .object("RPG::EventCommand", 2)
        .sym("@code")
        .int(355)
        .sym("@parameters")
        .array(2)
        .float("1.25")
        .str("script");
    s.finish()
}

#[test]
fn sample_decodes() {
    let map: Map = from_slice(&sample(), &Extensions::rgss()).unwrap();
    assert_eq!(map.display_name, "Harbor");
    assert_eq!(map.events[&1].x, -300);
}

#[test]
fn truncated_streams_fail() {
    let data = sample();
    let ext = Extensions::rgss();
    for len in 0..data.len() {
        assert!(
            from_slice::<Value>(&data[..len], &ext).is_err(),
            "truncated to {} bytes",
            len
        );
        assert!(from_slice::<Map>(&data[..len], &ext).is_err());
    }
}

#[test]
fn mutated_streams_never_panic() {
    let data = sample();
    let ext = Extensions::rgss();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
        let mut mutated = data.clone();
        for _ in 0..rng.gen_range(1..4) {
            let i = rng.gen_range(0..mutated.len());
            mutated[i] = rng.gen();
        }
        let _ = from_slice::<Value>(&mutated, &ext);
        let _ = from_slice::<Map>(&mutated, &ext);
        let _ = from_slice::<System>(&mutated, &ext);
    }
}

#[test]
fn random_bytes_never_panic() {
    let ext = Extensions::rgss();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2000 {
        let len = rng.gen_range(0..64);
        let mut data = vec![4u8, 8];
        data.extend((0..len).map(|_| rng.gen::<u8>()));
        let _ = from_slice::<Value>(&data, &ext);
    }
}

#[test]
fn deep_nesting_is_limited() {
    let mut data = vec![4u8, 8];
    for _ in 0..100_000 {
        data.extend_from_slice(b"[\x06");
    }
    data.push(b'0');
    assert!(from_slice::<Value>(&data, &Extensions::new()).is_err());

    let mut shallow = vec![4u8, 8];
    for _ in 0..10 {
        shallow.extend_from_slice(b"[\x06");
    }
    shallow.push(b'0');
    let ext = Extensions::new();
    let options = DecoderOptions {
        max_depth: 5,
        ..DecoderOptions::default()
    };
    let mut v = Value::Null;
    assert!(Decoder::with_options(&shallow, &ext, options)
        .decode(&mut v)
        .is_err());
}
