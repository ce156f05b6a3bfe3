use chrono::{NaiveDate, NaiveTime};

use crate::models::request_params::BarsRequestParams;

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Builds the query string of a daily chart request.
///
/// `period2` is exclusive on Yahoo's side, which matches
/// [`BarsRequestParams::end`].
pub fn construct_params(params: &BarsRequestParams) -> Vec<(String, String)> {
    vec![
        ("period1".to_string(), unix_midnight(params.start).to_string()),
        ("period2".to_string(), unix_midnight(params.end).to_string()),
        ("interval".to_string(), "1d".to_string()),
        ("events".to_string(), "history".to_string()),
        ("includeAdjustedClose".to_string(), "true".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_are_utc_midnights() {
        let params = BarsRequestParams {
            symbol: "BBCA.JK".into(),
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        let query = construct_params(&params);

        assert_eq!(query[0], ("period1".to_string(), "1735689600".to_string()));
        assert_eq!(query[1], ("period2".to_string(), "1738281600".to_string()));
        assert_eq!(query[2], ("interval".to_string(), "1d".to_string()));
    }
}
