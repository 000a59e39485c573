//! Display formatting for fetched indicator values.

/// Formats a value for display using the indicator's unit conventions.
///
/// Percentages render with a `%` suffix, money scales to $T/$B/$M, plain
/// counts scale to B/M/k, and anything else falls back to a grouped
/// two-decimal number. `None` renders as `"n/a"`.
pub fn format_value(value: Option<f64>, unit: &str, indicator_id: &str) -> String {
    let Some(value) = value else {
        return "n/a".to_string();
    };

    let unit_lower = unit.to_lowercase();
    let is_percentage = indicator_id.ends_with(".ZS")
        || indicator_id.ends_with(".ZG")
        || unit.contains('%');
    let is_money = indicator_id.ends_with(".CD")
        || indicator_id.ends_with(".KD")
        || unit.contains("US$")
        || unit_lower.contains("dollar");
    let is_number = indicator_id.ends_with(".IN") || unit_lower.contains("number");

    if is_percentage {
        return format!("{value:.2}%");
    }

    if is_money {
        let abs = value.abs();
        return if abs >= 1e12 {
            format!("${:.2}T", value / 1e12)
        } else if abs >= 1e9 {
            format!("${:.2}B", value / 1e9)
        } else if abs >= 1e6 {
            format!("${:.2}M", value / 1e6)
        } else {
            format!("${}", grouped(value))
        };
    }

    if is_number {
        let abs = value.abs();
        if abs >= 1e9 {
            return format!("{:.2}B", value / 1e9);
        } else if abs >= 1e6 {
            return format!("{:.2}M", value / 1e6);
        } else if abs >= 1e3 {
            return format!("{:.2}k", value / 1e3);
        }
    }

    grouped(value)
}

/// Two decimals with thousands separators, e.g. `1234567.5` → `1,234,567.50`.
fn grouped(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped_int = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped_int.push(',');
        }
        grouped_int.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped_int}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_na() {
        assert_eq!(format_value(None, "%", "FP.CPI.TOTL.ZG"), "n/a");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_value(Some(2.478), "annual %", "FP.CPI.TOTL.ZG"), "2.48%");
        assert_eq!(format_value(Some(13.1), "", "SL.UEM.TOTL.ZS"), "13.10%");
    }

    #[test]
    fn money_scales() {
        assert_eq!(
            format_value(Some(1_108_571_000_000.0), "", "NY.GDP.MKTP.CD"),
            "$1.11T"
        );
        assert_eq!(
            format_value(Some(23_500_000_000.0), "", "NY.GDP.MKTP.KD"),
            "$23.50B"
        );
        assert_eq!(
            format_value(Some(5_250_000.0), "current US$", "XX.SMALL"),
            "$5.25M"
        );
        assert_eq!(format_value(Some(1234.5), "", "NY.GDP.PCAP.CD"), "$1,234.50");
    }

    #[test]
    fn counts_scale() {
        assert_eq!(
            format_value(Some(1_417_173_173.0), "Number", "SP.POP.TOTL.IN"),
            "1.42B"
        );
        assert_eq!(format_value(Some(52_500.0), "", "SP.DYN.AMRT.IN"), "52.50k");
    }

    #[test]
    fn generic_fallback_groups_thousands() {
        assert_eq!(format_value(Some(1234567.891), "units", "XX.OTHER"), "1,234,567.89");
        assert_eq!(format_value(Some(-1234.5), "units", "XX.OTHER"), "-1,234.50");
        assert_eq!(format_value(Some(12.0), "units", "XX.OTHER"), "12.00");
    }
}
