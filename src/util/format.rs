use time::{macros::format_description, Date};

/// Whole euros with a space as thousands separator: `202 000 €`.
pub fn euro(value: f64) -> String {
    format!("{} €", group_thousands(value.round()))
}

/// Euros per square metre: `2 150 €/m²`.
pub fn euro_per_area(value: f64) -> String {
    format!("{} €/m²", group_thousands(value.round()))
}

/// A fraction rendered as a signed percentage with one decimal: `+3.0%`.
pub fn signed_pct(fraction: f64) -> String {
    format!("{:+.1}%", fraction * 100.0)
}

pub fn pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// `DD/MM/YYYY`.
pub fn date(value: Date) -> String {
    let format = format_description!("[day]/[month]/[year]");
    value
        .format(&format)
        .unwrap_or_else(|_| value.to_string())
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn euros_are_grouped_by_thousands() {
        assert_eq!(euro(202_000.0), "202 000 €");
        assert_eq!(euro(189_879.6), "189 880 €");
        assert_eq!(euro(950.0), "950 €");
        assert_eq!(euro(1_234_567.0), "1 234 567 €");
        assert_eq!(euro(-12_600.0), "-12 600 €");
        assert_eq!(euro(0.0), "0 €");
    }

    #[test]
    fn percentages_use_one_decimal() {
        assert_eq!(signed_pct(0.03), "+3.0%");
        assert_eq!(signed_pct(-0.1), "-10.0%");
        assert_eq!(pct(0.06), "6.0%");
    }

    #[test]
    fn dates_use_day_month_year() {
        assert_eq!(date(date!(2025 - 03 - 04)), "04/03/2025");
    }
}
