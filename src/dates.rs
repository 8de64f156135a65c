use chrono::NaiveDate;

/// A `CI_Date` entry of a citation: the date type code and the raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationDate {
    pub date_type: Option<String>,
    pub value: Option<String>,
}

/// Reads `gco:Date` / `gco:DateTime` values.
///
/// Only the calendar date is kept. ISO 19115 allows reduced precision dates, so
/// `2021` and `2021-03` read as the first day of the year or month.
pub fn parse_catalog_date(value: &str) -> Option<NaiveDate> {
    let date = value.trim().split('T').next()?.trim();
    match date.len() {
        4 => NaiveDate::from_ymd_opt(date.parse().ok()?, 1, 1),
        7 => NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
    }
}

/// Publication date, else creation date, else the metadata date stamp.
pub fn published_date(citation_dates: &[CitationDate], date_stamp: Option<&str>) -> Option<NaiveDate> {
    let by_type = |kind: &str| {
        citation_dates
            .iter()
            .filter(|date| {
                date.date_type
                    .as_deref()
                    .is_some_and(|date_type| date_type.eq_ignore_ascii_case(kind))
            })
            .find_map(|date| date.value.as_deref().and_then(parse_catalog_date))
    };

    by_type("publication")
        .or_else(|| by_type("creation"))
        .or_else(|| date_stamp.and_then(parse_catalog_date))
}
