use crate::encode::primitives;
use crate::options::Options;

/// Token-level JSON text writer.
///
/// Separators between elements and after keys are inserted automatically;
/// callers only announce structure and scalar tokens.
pub struct JsonWriter {
    out: String,
    indent: Option<usize>,
    ascii_only: bool,
    indent_cache: String,
    // one entry per open container, true until its first element is written
    open: Vec<bool>,
    after_key: bool,
}

impl JsonWriter {
    pub fn new(options: &Options) -> Self {
        Self {
            out: String::new(),
            indent: options.indent,
            ascii_only: options.ascii_only,
            indent_cache: String::new(),
            open: Vec::new(),
            after_key: false,
        }
    }

    fn write_indent(&mut self, depth: usize) {
        let Some(width) = self.indent else { return };
        self.out.push('\n');
        let indent = width * depth;
        if indent == 0 {
            return;
        }
        if self.indent_cache.len() < indent {
            self.indent_cache
                .extend(core::iter::repeat_n(' ', indent - self.indent_cache.len()));
        }
        self.out.push_str(&self.indent_cache[..indent]);
    }

    fn before_value(&mut self) {
        if self.after_key {
            self.after_key = false;
            return;
        }
        let depth = self.open.len();
        if let Some(first) = self.open.last_mut() {
            if !*first {
                self.out.push(',');
            }
            *first = false;
            self.write_indent(depth);
        }
    }

    fn close(&mut self, bracket: char) {
        let was_empty = self.open.pop().unwrap_or(true);
        if !was_empty {
            let depth = self.open.len();
            self.write_indent(depth);
        }
        self.out.push(bracket);
    }

    pub fn begin_object(&mut self) {
        self.before_value();
        self.out.push('{');
        self.open.push(true);
    }

    pub fn end_object(&mut self) {
        self.close('}');
    }

    pub fn begin_array(&mut self) {
        self.before_value();
        self.out.push('[');
        self.open.push(true);
    }

    pub fn end_array(&mut self) {
        self.close(']');
    }

    /// Writes an object key; the next token becomes its value.
    pub fn key(&mut self, key: &str) {
        self.before_value();
        primitives::escape_and_quote_into(&mut self.out, key, self.ascii_only);
        self.out.push(':');
        if self.indent.is_some() {
            self.out.push(' ');
        }
        self.after_key = true;
    }

    pub fn string(&mut self, s: &str) {
        self.before_value();
        primitives::escape_and_quote_into(&mut self.out, s, self.ascii_only);
    }

    /// Writes raw bytes as a string of one character per byte.
    pub fn latin1_string(&mut self, bytes: &[u8]) {
        self.before_value();
        primitives::latin1_quote_into(&mut self.out, bytes, self.ascii_only);
    }

    /// Writes an already formatted numeric literal.
    pub fn number(&mut self, literal: &str) {
        self.before_value();
        self.out.push_str(literal);
    }

    pub fn null(&mut self) {
        self.before_value();
        self.out.push_str(primitives::format_null());
    }

    pub fn bool(&mut self, b: bool) {
        self.before_value();
        self.out.push_str(primitives::format_bool(b));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(w: &mut JsonWriter) {
        w.begin_object();
        w.key("a");
        w.number("1");
        w.key("b");
        w.begin_array();
        w.bool(true);
        w.null();
        w.begin_object();
        w.end_object();
        w.end_array();
        w.key("c");
        w.begin_array();
        w.end_array();
        w.end_object();
    }

    #[test]
    fn compact_separators() {
        let mut w = JsonWriter::default();
        sample(&mut w);
        assert_eq!(w.into_string(), r#"{"a":1,"b":[true,null,{}],"c":[]}"#);
    }

    #[test]
    fn pretty_layout_matches_serde_json() {
        let mut w = JsonWriter::new(&Options::pretty());
        sample(&mut w);
        let expected = serde_json::to_string_pretty(&serde_json::json!({
            "a": 1,
            "b": [true, null, {}],
            "c": []
        }))
        .unwrap();
        assert_eq!(w.into_string(), expected);
    }

    #[test]
    fn scalar_at_top_level() {
        let mut w = JsonWriter::new(&Options::pretty());
        w.string("x");
        assert_eq!(w.into_string(), "\"x\"");
    }
}
