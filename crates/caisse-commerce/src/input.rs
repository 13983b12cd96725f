//! Permissive parsing of numbers typed into register inputs.
//!
//! Register inputs never reject text. A value is read from the longest
//! numeric prefix of the trimmed input, so `"3 pcs"` reads as `3` and
//! `"12.5€"` as `12.5`. When no prefix parses, callers fall back to a safe
//! default instead of failing.

/// Read a leading integer, ignoring anything after the digits.
///
/// Returns `None` when the input has no leading digits.
pub fn leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = split_sign(s);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate on absurdly long inputs instead of failing.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Read a leading decimal number (`123`, `12.5`, `.5`), ignoring the rest.
///
/// Returns `None` when the input does not start with a number.
pub fn leading_decimal(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let (negative, rest) = split_sign(s);

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in rest.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    if !seen_digit {
        return None;
    }

    let value = rest[..end].trim_end_matches('.').parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}
