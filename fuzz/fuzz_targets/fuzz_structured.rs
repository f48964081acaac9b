#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use arbitrary::Arbitrary;
use avro_json::{Field, Name, NonFinite, Options, Schema, Value, encode_to_string};

#[derive(Arbitrary, Debug)]
struct Input {
    id: i64,
    score: f64,
    label: Option<String>,
    payload: Vec<u8>,
    tags: Vec<(String, i32)>,
}

fn schema() -> Schema {
    let name = Name::new("Sample", Some("fuzz")).expect("static name is valid");
    Schema::record(
        name,
        vec![
            Field::new("id", Schema::Long),
            Field::new("score", Schema::Double),
            Field::new("label", Schema::union(vec![Schema::Null, Schema::String]).expect("static union is valid")),
            Field::new("payload", Schema::Bytes),
            Field::new("tags", Schema::map(Schema::Int)),
        ],
    )
    .expect("static record is valid")
}

fuzz_target!(|input: Input| {
    let value = Value::map([
        ("id", Value::Long(input.id)),
        ("score", Value::Double(input.score)),
        ("label", Value::from(input.label.clone())),
        ("payload", Value::Bytes(input.payload.clone())),
        ("tags", Value::map(input.tags.iter().map(|(k, v)| (k.clone(), Value::Int(*v))))),
    ]);
    let opts = Options { non_finite: NonFinite::AsString, ..Options::default() };
    let out = encode_to_string(&schema(), &value, &opts).expect("conforming value must encode");
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("output must be valid JSON");

    let payload = parsed["payload"].as_str().expect("payload is a string");
    let bytes: Vec<u8> = payload.chars().map(|c| u8::try_from(u32::from(c)).expect("one byte per char")).collect();
    assert_eq!(bytes, input.payload);
    assert_eq!(parsed["id"].as_i64(), Some(input.id));
});
