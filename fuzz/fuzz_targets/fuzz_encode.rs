#![no_main]
use libfuzzer_sys::fuzz_target;
use avro_json::{Options, Schema, encode_json_datum};

// Input is "<schema json>\n<datum json>"; any encoding that succeeds must be valid JSON.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Some((schema_text, datum_text)) = s.split_once('\n') else { return };
    let Ok(schema) = Schema::parse_str(schema_text) else { return };
    let Ok(datum) = serde_json::from_str::<serde_json::Value>(datum_text) else { return };

    for opts in [Options::default(), Options::pretty(), Options { ascii_only: true, ..Options::default() }] {
        if let Ok(out) = encode_json_datum(&schema, &datum, &opts) {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(&out) {
                panic!("encoder produced invalid JSON\nschema: {}\ndatum: {}\noutput: {}\nerror: {}", schema_text, datum_text, out, e);
            }
        }
    }
});
