//! Spanish locale formatting for figures shown to users.

use super::domain::CalculationError;

/// Rendered in place of `inf`/`NaN`.
pub const INVALID_VALUE: &str = "Valor no válido";

/// Two decimals, `.` as thousands separator and `,` as decimal separator.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return INVALID_VALUE.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{fraction}")
}

/// Two decimals with `,` as decimal separator and no grouping.
pub fn format_ratio(value: f64) -> String {
    if !value.is_finite() {
        return INVALID_VALUE.to_string();
    }
    let fixed = format!("{:.2}", value.abs()).replace('.', ",");
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        format!("-{fixed}")
    } else {
        fixed
    }
}

pub fn compliance_label(compliant: bool) -> &'static str {
    if compliant {
        "✅ CUMPLE"
    } else {
        "❌ NO CUMPLE"
    }
}

/// Parses weekly hours typed with either `.` or `,` as decimal separator.
pub fn parse_hours(raw: &str) -> Result<f64, CalculationError> {
    let trimmed = raw.trim();
    let hours = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| CalculationError::UnparseableHours(trimmed.to_string()))?;

    if hours.is_finite() && hours >= 0.0 {
        Ok(hours)
    } else {
        Err(CalculationError::UnparseableHours(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_spanish_separators() {
        assert_eq!(format_number(12345.678), "12.345,68");
        assert_eq!(format_number(1234567.0), "1.234.567,00");
        assert_eq!(format_number(999.5), "999,50");
        assert_eq!(format_number(0.0), "0,00");
        assert_eq!(format_number(-22440.0), "-22.440,00");
        assert_eq!(format_number(-0.001), "0,00");
    }

    #[test]
    fn ratios_use_decimal_comma_without_grouping() {
        assert_eq!(format_ratio(0.4712), "0,47");
        assert_eq!(format_ratio(1234.5), "1234,50");
        assert_eq!(format_ratio(-0.001), "0,00");
        assert_eq!(format_ratio(-0.25), "-0,25");
    }

    #[test]
    fn non_finite_values_render_as_invalid() {
        assert_eq!(format_ratio(f64::INFINITY), INVALID_VALUE);
        assert_eq!(format_ratio(f64::NAN), INVALID_VALUE);
        assert_eq!(format_number(f64::NEG_INFINITY), INVALID_VALUE);
    }

    #[test]
    fn compliance_labels() {
        assert_eq!(compliance_label(true), "✅ CUMPLE");
        assert_eq!(compliance_label(false), "❌ NO CUMPLE");
    }

    #[test]
    fn hours_accept_decimal_comma() {
        assert_eq!(parse_hours("37,5"), Ok(37.5));
        assert_eq!(parse_hours(" 40 "), Ok(40.0));
        assert_eq!(
            parse_hours("cuarenta"),
            Err(CalculationError::UnparseableHours("cuarenta".to_string()))
        );
        assert!(parse_hours("-3").is_err());
        assert!(parse_hours("inf").is_err());
    }
}
