use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use avro_json::{
    DatumValidator, Encoder, Error, Field, Name, Options, Schema, Validator, Value, encode_to_writer,
};

fn point_schema() -> Result<Schema, Error> {
    Schema::record(
        Name::new("Point", Some("geo"))?,
        vec![Field::new("x", Schema::Double), Field::new("y", Schema::Double)],
    )
}

/// Refuses every negative long, on top of the default rules.
struct NonNegative;

impl Validator for NonNegative {
    fn matches(&self, schema: &Schema, value: &Value) -> bool {
        match value {
            Value::Long(n) if *n < 0 => false,
            _ => DatumValidator.matches(schema, value),
        }
    }
}

/// Counts calls, to observe how the encoder consults its validator.
#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

impl Validator for Counting {
    fn matches(&self, schema: &Schema, value: &Value) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        DatumValidator.matches(schema, value)
    }
}

#[test]
fn injected_validator_steers_union_selection() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::union(vec![Schema::Long, Schema::Double])?;
    let encoder = Encoder::with_validator(NonNegative, Options::default());
    assert_eq!(encoder.encode(&schema, &Value::Long(5))?, r#"{"long":5}"#);

    // negative longs are refused by every branch
    let err = encoder.encode(&schema, &Value::Long(-5)).unwrap_err();
    assert!(matches!(err, Error::UnionNoMatch { .. }));
    Ok(())
}

#[test]
fn injected_validator_gates_leaf_values() -> Result<(), Box<dyn std::error::Error>> {
    let encoder = Encoder::with_validator(NonNegative, Options::default());
    let err = encoder.encode(&Schema::Long, &Value::Long(-1)).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    Ok(())
}

#[test]
fn borrowed_validator_is_consulted() -> Result<(), Box<dyn std::error::Error>> {
    let counting = Counting::default();
    let encoder = Encoder::with_validator(&counting, Options::default());
    let schema = point_schema()?;
    let value = Value::map([("x", Value::Double(1.5)), ("y", Value::Int(2))]);
    assert_eq!(encoder.encode(&schema, &value)?, r#"{"x":1.5,"y":2.0}"#);
    assert!(counting.calls.load(Ordering::Relaxed) >= 1);
    Ok(())
}

#[test]
fn writer_receives_nothing_on_failure() -> Result<(), Box<dyn std::error::Error>> {
    let schema = point_schema()?;
    let mut sink = Vec::new();
    let bad = Value::map([("x", Value::Double(1.0)), ("y", Value::from("oops"))]);
    assert!(encode_to_writer(&mut sink, &schema, &bad, &Options::default()).is_err());
    assert!(sink.is_empty());

    let good = Value::map([("x", Value::Double(1.0)), ("y", Value::Double(-1.0))]);
    encode_to_writer(&mut sink, &schema, &good, &Options::default())?;
    assert_eq!(String::from_utf8(sink)?, r#"{"x":1.0,"y":-1.0}"#);
    Ok(())
}

#[test]
fn pretty_output() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::record(
        Name::new("Shape", None)?,
        vec![
            Field::new("points", Schema::array(point_schema()?)),
            Field::new("label", Schema::union(vec![Schema::Null, Schema::String])?),
        ],
    )?;
    let value = Value::map([
        ("points", Value::from(vec![Value::map([("x", Value::Int(0)), ("y", Value::Int(1))])])),
        ("label", Value::from("tri")),
    ]);
    let out = Encoder::new(Options::pretty()).encode(&schema, &value)?;
    let expected = "{\n  \"points\": [\n    {\n      \"x\": 0.0,\n      \"y\": 1.0\n    }\n  ],\n  \"label\": {\n    \"string\": \"tri\"\n  }\n}";
    assert_eq!(out, expected);
    Ok(())
}

#[test]
fn ascii_only_escapes_strings_and_keys() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::map(Schema::String);
    let value = Value::map([("clé", Value::from("naïve"))]);
    let opts = Options { ascii_only: true, ..Options::default() };
    let out = Encoder::new(opts).encode(&schema, &value)?;
    assert_eq!(out, r#"{"cl\u00e9":"na\u00efve"}"#);
    Ok(())
}

#[test]
fn one_schema_shared_across_threads() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(point_schema()?);
    let encoder = Arc::new(Encoder::new(Options::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            let encoder = Arc::clone(&encoder);
            thread::spawn(move || {
                let value = Value::map([("x", Value::Int(i)), ("y", Value::Int(-i))]);
                encoder.encode(&schema, &value)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().map_err(|_| "encoder thread panicked")??;
        assert_eq!(out, format!(r#"{{"x":{i}.0,"y":{}.0}}"#, -(i as i64)));
    }
    Ok(())
}
