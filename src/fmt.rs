/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let sign = if val < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}${grouped}.{dec_part}")
}

/// Table cell for a possibly-missing amount; missing stays blank rather
/// than rendering as $0.00.
pub fn money_opt(val: Option<f64>) -> String {
    val.map(money).unwrap_or_default()
}

/// Table cell for a possibly-missing date.
pub fn date_opt(val: Option<chrono::NaiveDate>) -> String {
    val.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-1234.56), "-$1,234.56");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(999.999), "$1,000.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.1), "$42.10");
    }

    #[test]
    fn test_money_opt() {
        assert_eq!(money_opt(Some(-45.0)), "-$45.00");
        assert_eq!(money_opt(None), "");
    }

    #[test]
    fn test_date_opt() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(date_opt(date), "2024-01-05");
        assert_eq!(date_opt(None), "");
    }
}
