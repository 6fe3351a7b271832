//! SI prefix handling for netlist values.

/// Parse a netlist value with an optional SI suffix.
///
/// Supported suffixes (case-insensitive): `T`, `G`, `Meg`, `k`, `m`, `u`,
/// `n`, `p`, `f`. Note the SPICE convention: `M` is milli, mega is spelled
/// `Meg`.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Plain number, possibly in scientific notation.
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    // Split off the suffix at the first character that cannot belong to a
    // float literal.
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .unwrap_or(s.len());
    if num_end == 0 {
        return None;
    }

    let (num, suffix) = s.split_at(num_end);
    let value: f64 = num.parse().ok()?;

    let multiplier = match suffix.to_ascii_uppercase().as_str() {
        "T" => 1e12,
        "G" => 1e9,
        "MEG" => 1e6,
        "K" => 1e3,
        "M" => 1e-3,
        "U" => 1e-6,
        "N" => 1e-9,
        "P" => 1e-12,
        "F" => 1e-15,
        _ => return None,
    };

    Some(value * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|v| (v - b).abs() < b.abs() * 1e-12 + 1e-30)
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_value("1.5"), Some(1.5));
        assert_eq!(parse_value("-2.5"), Some(-2.5));
        assert_eq!(parse_value("1e-3"), Some(1e-3));
    }

    #[test]
    fn test_parse_with_suffix() {
        assert!(approx_eq(parse_value("1k"), 1e3));
        assert!(approx_eq(parse_value("4.7K"), 4.7e3));
        assert!(approx_eq(parse_value("10M"), 10e-3));
        assert!(approx_eq(parse_value("10Meg"), 10e6));
        assert!(approx_eq(parse_value("100n"), 100e-9));
        assert!(approx_eq(parse_value("1u"), 1e-6));
        assert!(approx_eq(parse_value("10p"), 10e-12));
        assert!(approx_eq(parse_value("2.2G"), 2.2e9));
    }

    #[test]
    fn test_parse_scientific_with_suffix() {
        assert!(approx_eq(parse_value("4.7e1k"), 47e3));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("1x"), None);
    }
}
