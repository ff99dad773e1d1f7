use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Parses an invoice date written as `dd/mm/yyyy`.
pub(crate) fn parse_invoice_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").ok()
}

/// Parses an amount written either plainly (`1234.5`) or in Spanish notation
/// (`1.234,50 €`). Without a decimal comma, dots are thousands separators only
/// when every group after the first has exactly three digits.
pub(crate) fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_end_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') || is_grouped_thousands(&cleaned) {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// Matches `\d{1,3}(\.\d{3})+`, optionally signed.
fn is_grouped_thousands(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let mut groups = digits.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    let head_ok = (1..=3).contains(&head.len()) && head.chars().all(|c| c.is_ascii_digit());
    let mut tail_count = 0;
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        tail_count += 1;
    }
    head_ok && tail_count > 0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Accepts numbers, Spanish-formatted strings or null; anything unreadable counts as zero.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAmount::Number(value)) if value.is_finite() => value,
        Some(RawAmount::Text(text)) => parse_amount(&text).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Reads null as an empty string, which later parses as "no value".
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_first_dates() {
        assert_eq!(
            parse_invoice_date("05/03/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(parse_invoice_date("2024-03-05"), None);
        assert_eq!(parse_invoice_date("31/02/2024"), None);
    }

    #[test]
    fn parses_spanish_and_plain_amounts() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("1.234,56 €"), Some(1234.56));
        assert_eq!(parse_amount("1234.56"), Some(1234.56));
        assert_eq!(parse_amount("12.500"), Some(12500.0));
        assert_eq!(parse_amount("1.250.000"), Some(1_250_000.0));
        assert_eq!(parse_amount("87,3"), Some(87.3));
        assert_eq!(parse_amount("1234.567"), Some(1234.567));
        assert_eq!(parse_amount("0.125"), Some(0.125));
        assert_eq!(parse_amount("1.2345"), Some(1.2345));
        assert_eq!(parse_amount("-2.500"), Some(-2500.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/d"), None);
    }
}
