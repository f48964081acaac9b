/// How NaN and the infinities are written for `float` and `double` schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinite {
    /// Fail with [`Error::UnsupportedValue`](crate::Error::UnsupportedValue).
    #[default]
    Reject,
    /// Write the JSON strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
    AsString,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub non_finite: NonFinite,
    /// Spaces per nesting level (None = compact output)
    pub indent: Option<usize>,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ascii_only: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            non_finite: NonFinite::default(),
            indent: None,
            ascii_only: false,
        }
    }
}

impl Options {
    pub fn pretty() -> Self {
        Self {
            indent: Some(2),
            ..Self::default()
        }
    }
}
