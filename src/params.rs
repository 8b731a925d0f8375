//! Parameter types and query-string assembly shared by every endpoint.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A calendar date accepted by the remote endpoints.
///
/// Serializes as `YYYY-MM-DD`. Parsing a malformed string fails with
/// [`Error::InvalidParameter`] before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiDate(NaiveDate);

impl ApiDate {
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ApiDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(ApiDate)
            .map_err(|_| {
                Error::InvalidParameter(format!(
                    "date must be in YYYY-MM-DD format, got '{}'",
                    s
                ))
            })
    }
}

impl From<NaiveDate> for ApiDate {
    fn from(date: NaiveDate) -> Self {
        ApiDate(date)
    }
}

impl From<DateTime<Utc>> for ApiDate {
    fn from(datetime: DateTime<Utc>) -> Self {
        ApiDate(datetime.date_naive())
    }
}

impl fmt::Display for ApiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Ordered list of query parameters for a single request.
///
/// Unset optionals are omitted entirely rather than sent as empty values.
/// Booleans serialize to lowercase tokens and lists are comma-joined.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &'static str, value: impl fmt::Display) {
        self.pairs.push((name, value.to_string()));
    }

    pub(crate) fn push_opt(&mut self, name: &'static str, value: Option<impl fmt::Display>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    pub(crate) fn push_list(&mut self, name: &'static str, values: &[impl AsRef<str>]) {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| v.as_ref())
                .collect::<Vec<_>>()
                .join(",");
            self.pairs.push((name, joined));
        }
    }

    pub(crate) fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(name, _)| *name).collect()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

pub(crate) fn check_latitude(lat: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidParameter(format!(
            "latitude values range from -90 to 90, got {}",
            lat
        )));
    }
    Ok(())
}

pub(crate) fn check_longitude(lon: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidParameter(format!(
            "longitude values range from -180 to 180, got {}",
            lon
        )));
    }
    Ok(())
}

/// Membership check for endpoints that only accept a fixed set of values.
pub(crate) fn check_allowed<T: PartialEq + fmt::Display>(
    name: &str,
    value: T,
    allowed: &[T],
) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let choices = allowed
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::InvalidParameter(format!(
        "{} must be one of ({}), got {}",
        name, choices, value
    )))
}

/// Computes the Julian date, the continuous count of days since the
/// beginning of the Julian period, for a given point in time.
///
/// When `date` is `None` the current UTC time is used. With
/// `modified` set, the modified Julian date (epoch midnight
/// 1858-11-17) is returned instead.
pub fn julian_date(date: Option<DateTime<Utc>>, modified: bool) -> f64 {
    let date = date.unwrap_or_else(Utc::now);

    let year = i64::from(date.year());
    let month = i64::from(date.month());
    let day = i64::from(date.day());

    let whole = 367 * year - (7 * (year + (month + 9) / 12)) / 4 + (275 * month) / 9 + day;
    let fraction = f64::from(date.hour()) / 24.0
        + f64::from(date.minute()) / 1_440.0
        + f64::from(date.second()) / 86_400.0;

    let jd = whole as f64 + 1_721_013.5 + fraction;

    if modified {
        jd - 2_400_000.5
    } else {
        jd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_api_date_parsing() {
        let date: ApiDate = "2019-01-01".parse().unwrap();
        assert_eq!(date.to_string(), "2019-01-01");

        assert!("01-01-2019".parse::<ApiDate>().is_err());
        assert!("2019-13-01".parse::<ApiDate>().is_err());
        assert!("not a date".parse::<ApiDate>().is_err());
    }

    #[test]
    fn test_api_date_from_chrono() {
        let naive = NaiveDate::from_ymd_opt(2019, 5, 6).unwrap();
        assert_eq!(ApiDate::from(naive).to_string(), "2019-05-06");

        let datetime = Utc.with_ymd_and_hms(2019, 5, 6, 13, 30, 0).unwrap();
        assert_eq!(ApiDate::from(datetime).to_string(), "2019-05-06");
    }

    #[test]
    fn test_query_skips_unset_optionals() {
        let mut query = Query::new();
        query.push("page", 1);
        query.push_opt("keyword", None::<&str>);
        query.push_opt("sol", Some(1000));

        assert_eq!(query.names(), vec!["page", "sol"]);
        assert_eq!(query.get("sol"), Some("1000"));
    }

    #[test]
    fn test_query_booleans_are_lowercase() {
        let mut query = Query::new();
        query.push("hd", true);
        query.push("cloud_score", false);

        assert_eq!(query.get("hd"), Some("true"));
        assert_eq!(query.get("cloud_score"), Some("false"));
    }

    #[test]
    fn test_query_lists_are_comma_joined() {
        let mut query = Query::new();
        query.push_list("keywords", &["moon", "apollo 11"]);
        query.push_list("type", &Vec::<String>::new());

        assert_eq!(query.names(), vec!["keywords"]);
        assert_eq!(query.get("keywords"), Some("moon,apollo 11"));
    }

    #[test]
    fn test_latitude_longitude_bounds() {
        assert!(check_latitude(45.0).is_ok());
        assert!(check_latitude(-90.0).is_ok());
        assert!(check_latitude(90.5).is_err());
        assert!(check_longitude(-180.0).is_ok());
        assert!(check_longitude(181.0).is_err());
    }

    #[test]
    fn test_check_allowed() {
        assert!(check_allowed("dv", 12, &[4, 5, 6, 7, 8, 9, 10, 11, 12]).is_ok());
        let err = check_allowed("dv", 3, &[4, 5, 6]).unwrap_err();
        assert!(err.to_string().contains("dv must be one of"));
    }

    #[test]
    fn test_julian_date() {
        let date = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(julian_date(Some(date), false), 2_458_484.5);
        assert_eq!(julian_date(Some(date), true), 58_484.0);
    }

    #[test]
    fn test_julian_date_with_time_of_day() {
        let date = Utc.with_ymd_and_hms(2019, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(julian_date(Some(date), false), 2_458_485.0);
    }
}
