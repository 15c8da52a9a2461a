use memchr::memchr;

use crate::constants::is_path_special_byte;
use crate::num::number::push_index;

pub(crate) fn needs_bracket_quoting(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    name.bytes().any(is_path_special_byte)
}

/// Append a property name segment: `name`, `.name` or `['na.me']`.
pub(crate) fn push_name_segment(out: &mut String, name: &str) {
    if needs_bracket_quoting(name) {
        out.push_str("['");
        escape_quoted_into(out, name);
        out.push_str("']");
        return;
    }
    if !out.is_empty() {
        out.push('.');
    }
    out.push_str(name);
}

pub(crate) fn push_index_segment(out: &mut String, index: usize) {
    out.push('[');
    push_index(out, index);
    out.push(']');
}

fn escape_quoted_into(out: &mut String, value: &str) {
    let bytes = value.as_bytes();
    if memchr(b'\'', bytes).is_none() && memchr(b'\\', bytes).is_none() {
        out.push_str(value);
        return;
    }
    let mut start = 0;
    for (idx, byte) in bytes.iter().enumerate() {
        let escaped = match byte {
            b'\'' => "\\'",
            b'\\' => "\\\\",
            _ => continue,
        };
        if start < idx {
            out.push_str(&value[start..idx]);
        }
        out.push_str(escaped);
        start = idx + 1;
    }
    if start < value.len() {
        out.push_str(&value[start..]);
    }
}
