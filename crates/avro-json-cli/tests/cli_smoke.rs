use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const SCHEMA: &str = r#"{
  "type": "record",
  "name": "unions",
  "fields": [
    {"name": "funion_null", "type": ["int", "null"]},
    {"name": "tags", "type": {"type": "array", "items": "string"}}
  ]
}"#;

fn schema_file() -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", SCHEMA)?;
    Ok(tmp)
}

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("avro-json-cli"))
        .arg("--help")
        .assert()
        .success();
    Ok(())
}

#[test]
fn encodes_datum_file() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schema_file()?;
    let mut input = NamedTempFile::new()?;
    write!(input, r#"{{"tags": ["a"], "funion_null": 1}}"#)?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("avro-json-cli"))
        .arg("--schema")
        .arg(schema.path())
        .arg(input.path())
        .output()?;
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout)?;
    assert_eq!(out.trim(), r#"{"funion_null":{"int":1},"tags":["a"]}"#);
    Ok(())
}

#[test]
fn pretty_output_is_valid_json() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schema_file()?;
    let output = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("avro-json-cli"))
        .arg("--schema")
        .arg(schema.path())
        .arg("--pretty")
        .write_stdin(r#"{"funion_null": null, "tags": []}"#)
        .output()?;
    assert!(output.status.success());
    let out = String::from_utf8(output.stdout)?;
    assert!(out.contains('\n'));
    let v: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(v, serde_json::json!({"funion_null": null, "tags": []}));
    Ok(())
}

#[test]
fn rejects_nonconforming_datum() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schema_file()?;
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("avro-json-cli"))
        .arg("--schema")
        .arg(schema.path())
        .write_stdin(r#"{"funion_null": "hi", "tags": []}"#)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("matches no branch"));
    Ok(())
}
