// src/core/salary.rs

// Salary cell text → whole dollars.
//
//   "$59,606,817" → 59_606_817
//   "59.6M"       → 59_600_000
//   "500K"        → 500_000
//   "-", "N/A", "" or anything unparseable → 0

/// Total: every input maps to a non-negative amount.
pub fn normalize(text: &str) -> u64 {
    let t = text.trim();
    if t.is_empty() || t == "-" || t.eq_ignore_ascii_case("n/a") {
        return 0;
    }

    let cleaned: String = t.chars().filter(|&c| c != '$' && c != ',').collect();
    let upper = cleaned.trim().to_ascii_uppercase();

    let value = if upper.contains('M') {
        parse_decimal(&upper.replace('M', "")).map(|v| v * 1_000_000.0)
    } else if upper.contains('K') {
        parse_decimal(&upper.replace('K', "")).map(|v| v * 1_000.0)
    } else {
        parse_decimal(&upper)
    };

    value.map(to_dollars).unwrap_or(0)
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

// NaN, infinities, negatives and out-of-range values all collapse to 0.
fn to_dollars(v: f64) -> u64 {
    if !v.is_finite() || v < 0.0 || v >= u64::MAX as f64 {
        return 0;
    }
    v.round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_currency() {
        assert_eq!(normalize("$59,606,817"), 59_606_817);
        assert_eq!(normalize("  $1,000  "), 1_000);
        assert_eq!(normalize("$ 2,500"), 2_500);
    }

    #[test]
    fn suffixes() {
        assert_eq!(normalize("59.6M"), 59_600_000);
        assert_eq!(normalize("$12.5m"), 12_500_000);
        assert_eq!(normalize("500K"), 500_000);
        assert_eq!(normalize("1.25k"), 1_250);
    }

    #[test]
    fn placeholders_are_zero() {
        assert_eq!(normalize("-"), 0);
        assert_eq!(normalize(""), 0);
        assert_eq!(normalize("   "), 0);
        assert_eq!(normalize("N/A"), 0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(normalize("garbage"), 0);
        assert_eq!(normalize("M"), 0);
        assert_eq!(normalize("$K"), 0);
        assert_eq!(normalize("12..5"), 0);
    }

    #[test]
    fn never_negative_or_non_finite() {
        assert_eq!(normalize("-5"), 0);
        assert_eq!(normalize("-2.5M"), 0);
        assert_eq!(normalize("inf"), 0);
        assert_eq!(normalize("NaN"), 0);
        assert_eq!(normalize("1e300"), 0);
    }

    #[test]
    fn fractional_dollars_round() {
        assert_eq!(normalize("1234.56"), 1_235);
        assert_eq!(normalize("0.4"), 0);
    }
}
