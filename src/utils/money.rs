// Conversion between major currency units (dollars, as exposed to callers)
// and the gateway's minor-unit convention (cents on the wire).

/// Converts a major-unit amount to cents. Returns `None` for amounts that
/// are not positive or carry sub-cent precision, so the round trip through
/// [`to_major_units`] is always exact for accepted inputs.
pub fn to_minor_units(amount: f64) -> Option<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    let cents = (amount * 100.0).round();
    if cents / 100.0 != amount || cents > u64::MAX as f64 {
        return None;
    }

    Some(cents as u64)
}

pub fn to_major_units(cents: u64) -> f64 {
    cents as f64 / 100.0
}

pub fn format_currency(cents: u64) -> String {
    format!("${:.2}", to_major_units(cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_dollar_round_trip() {
        assert_eq!(to_minor_units(100.0), Some(10000));
        assert_eq!(to_major_units(10000), 100.0);
    }

    #[test]
    fn test_two_decimal_round_trip() {
        for amount in [0.01, 0.1, 25.50, 99.99, 1234.56] {
            let cents = to_minor_units(amount).unwrap();
            assert_eq!(to_major_units(cents), amount, "round trip for {amount}");
        }
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(to_minor_units(0.0), None);
        assert_eq!(to_minor_units(-10.0), None);
        assert_eq!(to_minor_units(f64::NAN), None);
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        assert_eq!(to_minor_units(10.005), None);
        assert_eq!(to_minor_units(0.001), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(10000), "$100.00");
        assert_eq!(format_currency(2550), "$25.50");
    }
}
