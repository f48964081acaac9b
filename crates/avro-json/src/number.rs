/// Format a finite f64 in JSON decimal form.
/// Requirements:
/// - no exponent notation
/// - always a fractional part (`2` becomes `2.0`)
/// - shortest digits that round-trip to the same f64
/// - sign of -0.0 kept
pub(crate) fn format_f64(value: f64) -> String {
    debug_assert!(value.is_finite(), "format_f64 called with non-finite value");
    let mut buf = ryu::Buffer::new();
    decimal_form(buf.format_finite(value))
}

/// Same as [`format_f64`] with the shortest digits that round-trip to the f32.
pub(crate) fn format_f32(value: f32) -> String {
    debug_assert!(value.is_finite(), "format_f32 called with non-finite value");
    let mut buf = ryu::Buffer::new();
    decimal_form(buf.format_finite(value))
}

/// Exact decimal form of an integer datum written under a float schema.
pub(crate) fn format_integral(value: i64) -> String {
    format!("{}.0", value)
}

fn decimal_form(raw: &str) -> String {
    let (negative, magnitude) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let mut body = if let Some(exp_index) = magnitude.find(['e', 'E']) {
        let mantissa = &magnitude[..exp_index];
        let exp: i32 = magnitude[exp_index + 1..].parse().unwrap_or(0);
        expand_exponent(mantissa, exp)
    } else {
        String::from(magnitude)
    };
    if !body.contains('.') {
        body.push_str(".0");
    }
    if negative {
        body.insert(0, '-');
    }
    body
}

fn expand_exponent(mantissa: &str, exp: i32) -> String {
    let mut digits = Vec::with_capacity(mantissa.len());
    let mut point_index = None;
    for &b in mantissa.as_bytes() {
        if b == b'.' {
            point_index = Some(digits.len());
        } else {
            digits.push(b);
        }
    }
    let point_index = point_index.unwrap_or(digits.len()) as i32;
    let target = point_index + exp;

    let mut result = String::with_capacity(digits.len() + exp.unsigned_abs() as usize + 2);
    if target <= 0 {
        result.push_str("0.");
        for _ in 0..(-target) {
            result.push('0');
        }
        result.extend(digits.iter().map(|&d| d as char));
    } else if target as usize >= digits.len() {
        result.extend(digits.iter().map(|&d| d as char));
        for _ in digits.len()..target as usize {
            result.push('0');
        }
    } else {
        let split = target as usize;
        for (idx, &d) in digits.iter().enumerate() {
            if idx == split {
                result.push('.');
            }
            result.push(d as char);
        }
    }
    trim_fraction(result)
}

// Drops trailing fractional zeros but keeps at least one digit after the point.
fn trim_fraction(mut s: String) -> String {
    if let Some(dot_pos) = s.find('.') {
        let mut end = s.len();
        while end > dot_pos + 2 && s.as_bytes()[end - 1] == b'0' {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}
