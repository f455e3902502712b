//! Date helper functions

use chrono::NaiveDate;

/// Long en-US form with weekday and abbreviated month
///
/// # Examples
/// ```ignore
/// long_date(&date) // -> "Tuesday, Mar 5, 2024"
/// ```
pub fn long_date(date: &NaiveDate) -> String {
    date.format("%A, %b %-d, %Y").to_string()
}

/// Machine-readable form for `<time datetime>`
pub fn date_xml(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Generate a <time> HTML element
pub fn time_tag(date: &NaiveDate) -> String {
    format!(
        r#"<time datetime="{}">{}</time>"#,
        date_xml(date),
        long_date(date)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(long_date(&date), "Tuesday, Mar 5, 2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(long_date(&date), "Sunday, Dec 31, 2023");
    }

    #[test]
    fn test_time_tag() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            time_tag(&date),
            r#"<time datetime="2024-03-05">Tuesday, Mar 5, 2024</time>"#
        );
    }
}
