//! Money amount formatting for the creditor table.

/// Format an amount as `1 234 567,89`.
///
/// Spaces and non-breaking spaces are stripped and a comma is accepted as
/// the decimal separator. Input that does not parse as a finite number is
/// returned unchanged.
///
/// # Example
///
/// ```
/// use docfill::format_amount;
///
/// assert_eq!(format_amount("1000000"), "1 000 000,00");
/// assert_eq!(format_amount("1234,5"), "1 234,50");
/// assert_eq!(format_amount("по договору"), "по договору");
/// ```
pub fn format_amount(input: &str) -> String {
    let normalized: String = input
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return input.to_string(),
    };

    let fixed = format!("{:.2}", value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    // Avoid "-0,00"
    let sign = if integer.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0') {
        ""
    } else {
        sign
    };

    format!("{}{},{}", sign, group_thousands(integer), fraction)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
