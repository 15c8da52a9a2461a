pub(crate) fn format_integer(value: i128) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}

pub(crate) fn push_index(out: &mut String, index: usize) {
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(index));
}

/// Float nearest to `mantissa * 10^-scale`.
pub(crate) fn decimal_to_f64(mantissa: i128, scale: u32) -> f64 {
    let mut buffer = itoa::Buffer::new();
    let mut text = String::from(buffer.format(mantissa));
    text.push_str("e-");
    text.push_str(buffer.format(scale));
    // always a well-formed float literal
    text.parse().unwrap_or(f64::NAN)
}

/// Shortest round-tripping decimal text for a float, without exponent.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    if raw.contains('e') || raw.contains('E') {
        return expand_exponent(raw);
    }
    trim_number(raw.to_string())
}

fn expand_exponent(raw: &str) -> String {
    let (mantissa, exponent) = match raw.find(['e', 'E']) {
        Some(pos) => (&raw[..pos], &raw[pos + 1..]),
        None => (raw, "0"),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };

    let mut digits = String::with_capacity(mantissa.len());
    let mut dot_pos = None;
    for ch in mantissa.chars() {
        if ch == '.' {
            dot_pos = Some(digits.len());
        } else {
            digits.push(ch);
        }
    }
    let exp: i32 = exponent.parse().unwrap_or(0);

    let dot_pos = dot_pos.unwrap_or(digits.len());
    let new_pos = dot_pos as i32 + exp;
    let mut out = String::new();
    if negative {
        out.push('-');
    }

    if new_pos <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-new_pos) as usize));
        out.push_str(&digits);
        return trim_number(out);
    }

    if new_pos as usize >= digits.len() {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take(new_pos as usize - digits.len()));
        return trim_number(out);
    }

    let pos = new_pos as usize;
    out.push_str(&digits[..pos]);
    out.push('.');
    out.push_str(&digits[pos..]);
    trim_number(out)
}

fn trim_number(mut value: String) -> String {
    if value.contains('.') {
        let trimmed = value.trim_end_matches('0').len();
        value.truncate(trimmed);
        if value.ends_with('.') {
            value.pop();
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(-17, "-17")]
    #[case(i128::from(u64::MAX), "18446744073709551615")]
    fn test_format_integer(#[case] value: i128, #[case] expected: &str) {
        assert_eq!(format_integer(value), expected);
    }

    #[rstest]
    #[case(1.5, "1.5")]
    #[case(-0.0, "0")]
    #[case(100.0, "100")]
    #[case(1e21, "1000000000000000000000")]
    #[case(1.5e-7, "0.00000015")]
    #[case(-2.5e-3, "-0.0025")]
    #[case(f64::NAN, "NaN")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    fn test_format_float(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_float(value), expected);
    }

    #[rstest]
    #[case(12345, 2, 123.45)]
    #[case(-5, 0, -5.0)]
    #[case(1, 30, 1e-30)]
    #[case(10, 1, 1.0)]
    #[case(7, u32::MAX, 0.0)]
    #[case(i128::MAX, 0, 1.7014118346046923e38)]
    fn test_decimal_to_f64(#[case] mantissa: i128, #[case] scale: u32, #[case] expected: f64) {
        assert_eq!(decimal_to_f64(mantissa, scale), expected);
    }

    #[rstest::rstest]
    fn test_push_index() {
        let mut out = String::from("a[");
        push_index(&mut out, 42);
        assert_eq!(out, "a[42");
    }
}
