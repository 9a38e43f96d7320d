use time::{macros::format_description, Date, OffsetDateTime};

use crate::error::AppError;

/// Parse a `YYYY-MM-DD` calendar date from a request parameter.
pub fn parse_date(value: &str) -> Result<Date, AppError> {
    let fmt = format_description!("[year]-[month]-[day]");
    Date::parse(value, &fmt)
        .map_err(|_| AppError::InvalidQuantity(format!("unparseable date: {value}")))
}

/// UTC calendar date of "now"; the date all undated mutations land on.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-01-01").unwrap(), date!(2024 - 01 - 01));
        assert!(parse_date("01/02/2024").is_err());
        assert!(parse_date("2024-13-40").is_err());
    }

    #[test]
    fn parse_failures_name_the_input() {
        let err = parse_date("tomorrow").unwrap_err();
        assert!(err.to_string().contains("tomorrow"));
    }
}
