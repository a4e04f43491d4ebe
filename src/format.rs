//! Display formatting following id-ID conventions: `.` groups thousands,
//! `,` marks decimals. The backend reports loan totals in Rupiah.

/// Locale-grouped number. Keeps at most two fraction digits (loan totals are
/// currency values), drops the fraction entirely for whole numbers.
pub fn format_number(n: f64) -> String {
    let negative = n < 0.0;
    // Two fraction digits of precision, rounded once up front so the integer
    // and fraction parts cannot disagree (e.g. 999.995 -> 1.000).
    let scaled = (n.abs() * 100.0).round() as u128;
    let int_part = scaled / 100;
    let frac = (scaled % 100) as u32;

    let mut out = group_thousands(int_part);
    if frac != 0 {
        if frac % 10 == 0 {
            out.push_str(&format!(",{}", frac / 10));
        } else {
            out.push_str(&format!(",{:02}", frac));
        }
    }
    if negative && (int_part != 0 || frac != 0) {
        out.insert(0, '-');
    }
    out
}

/// `format_number` with the Rupiah marker.
pub fn format_currency(n: f64) -> String {
    format!("Rp {}", format_number(n))
}

/// One decimal place, `%` suffix. Input is already on a 0-100 scale.
pub fn format_percent(n: f64) -> String {
    format!("{:.1}%", n)
}

fn group_thousands(v: u128) -> String {
    let digits = v.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*b as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_000.0), "1.000");
        assert_eq!(format_number(1_234_567.0), "1.234.567");
    }

    #[test]
    fn test_number_fraction() {
        assert_eq!(format_number(1234.5), "1.234,5");
        assert_eq!(format_number(0.05), "0,05");
        assert_eq!(format_number(2.50), "2,5");
        // Fraction rounds into the integer part cleanly.
        assert_eq!(format_number(999.995), "1.000");
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(format_currency(1_500_000.0), "Rp 1.500.000");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(format_percent(33.456), "33.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(100.0), "100.0%");
    }
}
