//! Numeric form input and derived money figures.
//!
//! Form fields hold free text. Reading them follows the usual lenient rules: take the
//! longest numeric prefix (an exponent tail such as `e3` included for decimals), and
//! anything unreadable counts as zero.

/// Longest prefix of `s` (after leading whitespace) that reads as a decimal number.
fn numeric_prefix(s: &str, allow_fraction: bool) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut valid_end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
                valid_end = end;
            }
            b'.' if allow_fraction && !seen_dot => {
                seen_dot = true;
                end += 1;
                if seen_digit {
                    valid_end = end;
                }
            }
            _ => break,
        }
    }

    if allow_fraction && seen_digit && matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let digits = bytes[exp.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 {
            valid_end = exp + digits;
        }
    }

    if seen_digit {
        &s[..valid_end]
    } else {
        ""
    }
}

/// Reads a decimal field; unreadable or non-finite input is 0.
pub fn parse_lenient_f64(s: &str) -> f64 {
    let prefix = numeric_prefix(s, true);
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
    prefix
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Reads an integer field; unreadable input is 0.
pub fn parse_lenient_i64(s: &str) -> i64 {
    numeric_prefix(s, false).parse::<i64>().unwrap_or(0)
}

/// Strict read used where a form demands a number: `None` unless some numeric prefix exists.
pub fn parse_f64(s: &str) -> Option<f64> {
    let prefix = numeric_prefix(s, true);
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_i64(s: &str) -> Option<i64> {
    numeric_prefix(s, false).parse::<i64>().ok()
}

/// Bill for a delivery: `round(weight × price)`, with unreadable inputs counted as zero.
pub fn bill_total(final_weight: &str, price_per_kg: &str) -> i64 {
    bill_total_of(parse_lenient_f64(final_weight), parse_lenient_f64(price_per_kg))
}

pub fn bill_total_of(final_weight: f64, price_per_kg: f64) -> i64 {
    let weight = if final_weight.is_finite() { final_weight } else { 0.0 };
    let price = if price_per_kg.is_finite() { price_per_kg } else { 0.0 };
    (weight * price).round() as i64
}

/// Sale amount for a ledger entry, two decimals, when both weight and rate are positive.
pub fn sale_amount(weight: &str, rate: &str) -> Option<f64> {
    let weight = parse_lenient_f64(weight);
    let rate = parse_lenient_f64(rate);
    if weight > 0.0 && rate > 0.0 {
        Some(round_to(weight * rate, 2))
    } else {
        None
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
