//! Report date-range query parsing helpers.

use jiff::{civil::Date, tz::TimeZone};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};
use tillpoint_app::domain::reports::ReportRange;

use crate::extensions::*;

/// Parses optional `start` / `end` query parameters (ISO dates) into an
/// inclusive report range. A missing `end` defaults to today (UTC); a
/// missing `start` defaults to the trailing default window.
pub(crate) trait DateRangeExt {
    fn into_report_range(self) -> Result<ReportRange, StatusError>;
}

impl DateRangeExt for (QueryParam<String, false>, QueryParam<String, false>) {
    fn into_report_range(self) -> Result<ReportRange, StatusError> {
        let (start, end) = self;

        report_range(start.into_inner(), end.into_inner())
    }
}

fn report_range(start: Option<String>, end: Option<String>) -> Result<ReportRange, StatusError> {
    let end = parse_date(end, "end")?
        .unwrap_or_else(|| jiff::Timestamp::now().to_zoned(TimeZone::UTC).date());

    let range = match parse_date(start, "start")? {
        Some(start) => ReportRange::new(start, end),
        None => ReportRange::trailing(end),
    };

    Ok(range)
}

fn parse_date(value: Option<String>, name: &str) -> Result<Option<Date>, StatusError> {
    value
        .map(|value| value.parse::<Date>())
        .transpose()
        .or_400(&format!("could not parse \"{name}\" query parameter"))
}
