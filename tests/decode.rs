mod common;

use std::collections::{BTreeMap, HashMap};

use common::Stream;
use rvmarshal::rgss::{MapInfo, Table};
use rvmarshal::{decode_into, from_slice, marshal_record, Error, Extensions, Value};

#[test]
fn string_into_every_destination() {
    let data = hex::decode("0408220a4556303031").unwrap();
    let ext = Extensions::new();

    let v: Value = from_slice(&data, &ext).unwrap();
    assert_eq!(v, Value::Str("EV001".to_string()));

    let s: String = from_slice(&data, &ext).unwrap();
    assert_eq!(s, "EV001");

    let err = from_slice::<i64>(&data, &ext).unwrap_err();
    assert!(err.is_recorded());
    match err {
        Error::Mismatch { expected, got } => {
            assert_eq!(expected, "string");
            assert_eq!(got, "i64");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn symbol_link_before_any_symbol() {
    let data = hex::decode("04083b00").unwrap();
    let err = from_slice::<Value>(&data, &Extensions::new()).unwrap_err();
    assert!(!err.is_recorded());
    assert!(matches!(err, Error::BadSymbolLink { index: 0, len: 0 }));
}

#[test]
fn empty_containers_are_not_nil() {
    let ext = Extensions::new();
    assert_eq!(
        from_slice::<Value>(b"\x04\x08[\x00", &ext).unwrap(),
        Value::Array(Vec::new())
    );
    assert_eq!(
        from_slice::<Value>(b"\x04\x08{\x00", &ext).unwrap(),
        Value::Map(BTreeMap::new())
    );
    assert_eq!(
        from_slice::<Value>(b"\x04\x08\"\x00", &ext).unwrap(),
        Value::Str(String::new())
    );
    let v: Option<Vec<i32>> = from_slice(b"\x04\x08[\x00", &ext).unwrap();
    assert_eq!(v, Some(Vec::new()));
    let v: Option<HashMap<String, i32>> = from_slice(b"\x04\x08{\x00", &ext).unwrap();
    assert_eq!(v, Some(HashMap::new()));
}

marshal_record! {
    #[derive(Clone, Debug, Default, PartialEq)]
    struct Point {
        x: i32 => "@x",
        y: i32 => "@y",
    }
}

#[test]
fn every_unknown_field_is_listed() {
    let mut s = Stream::new();
    s.object("Point3", 4)
        .sym("@x")
        .int(1)
        .sym("@z")
        .int(3)
        .sym("@y")
        .int(2)
        .sym("@w")
        .array(1)
        .int(4);
    let data = s.finish();

    let mut point = Point::default();
    let err = decode_into(&data, &Extensions::new(), &mut point).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown object fields [@z, @w] for record Point"
    );
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn unregistered_extension() {
    let mut s = Stream::new();
    s.array(2).int(1).user("Color", &[0; 32]);
    let data = s.finish();
    let err = from_slice::<Value>(&data, &Extensions::rgss()).unwrap_err();
    assert_eq!(err.to_string(), "Unhandled user defined type: Color");

    let mut ext = Extensions::rgss();
    ext.register_raw("Color");
    let v: Value = from_slice(&data, &ext).unwrap();
    assert_eq!(v[1].as_user_defined(), Some(("Color", &[0u8; 32][..])));
}

#[test]
fn table_count_mismatch() {
    let ext = Extensions::new().with("Table", Table::load);

    let mut payload = Vec::new();
    for v in [3i32, 2, 2, 1, 3].iter() {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    payload.extend_from_slice(&[1, 0, 2, 0, 3, 0]);
    let mut s = Stream::new();
    s.user("Table", &payload);
    let data = s.finish();

    let mut table = Table::default();
    let err = decode_into(&data, &ext, &mut table).unwrap_err();
    assert!(matches!(err, Error::BadExtension { ref class, .. } if class == "Table"));
    assert!(table.data.is_empty());
}

#[test]
fn map_infos_shape() {
    let mut s = Stream::new();
    s.hash(2);
    for (id, name, parent) in [(1, "Town", 0), (3, "Inn", 1)].iter() {
        s.int(*id)
            .object("RPG::MapInfo", 6)
            .sym("@name")
            .str(name)
            .sym("@parent_id")
            .int(*parent)
            .sym("@order")
            .int(*id)
            .sym("@expanded")
            .bool(false)
            .sym("@scroll_x")
            .int(544)
            .sym("@scroll_y")
            .int(-416);
    }
    let data = s.finish();
    let ext = Extensions::rgss();

    let infos: BTreeMap<i32, MapInfo> = from_slice(&data, &ext).unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[&3].name, "Inn");
    assert_eq!(infos[&3].parent_id, 1);
    assert_eq!(infos[&1].scroll_x, 544);
    assert_eq!(infos[&1].scroll_y, -416);

    let v: Value = from_slice(&data, &ext).unwrap();
    assert_eq!(v["3"]["@name"].as_str(), Some("Inn"));
    assert_eq!(v["1"]["@scroll_y"].as_i64(), Some(-416));
}

#[test]
fn symbol_links_resolve_across_objects() {
    let mut s = Stream::new();
    s.array(3);
    for i in 0..3 {
        s.object("Point", 2).sym("@x").int(i).sym("@y").int(i * 100);
    }
    let data = s.finish();
    let points: Vec<Point> = from_slice(&data, &Extensions::new()).unwrap();
    assert_eq!(points[2], Point { x: 2, y: 200 });
}

#[test]
fn large_integers() {
    for &v in [0i64, 122, 123, 255, 256, -123, -124, -256, -257, 1 << 30, -(1 << 30)].iter() {
        let mut s = Stream::new();
        s.int(v);
        let got: i64 = from_slice(&s.finish(), &Extensions::new()).unwrap();
        assert_eq!(got, v);
    }
}

#[test]
fn floats() {
    let mut s = Stream::new();
    s.array(4)
        .float("1.5")
        .float("inf")
        .float("-inf")
        .float("nan");
    let v: Vec<f64> = from_slice(&s.finish(), &Extensions::new()).unwrap();
    assert_eq!(v[0], 1.5);
    assert_eq!(v[1], f64::MAX);
    assert_eq!(v[2], -f64::MAX);
    assert!(v[3].is_nan());
}

#[test]
fn json_dump() {
    let mut s = Stream::new();
    s.object("RPG::MapInfo", 2)
        .sym("@name")
        .str("Town")
        .sym("@order")
        .int(1);
    let info: MapInfo = from_slice(&s.finish(), &Extensions::rgss()).unwrap();
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["name"], "Town");
    assert_eq!(json["order"], 1);
    assert_eq!(json["expanded"], false);
}
