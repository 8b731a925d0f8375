//! Two-line element sets from the keyless TLE API, sourced from
//! CelesTrak.

use serde_json::Value;

use crate::error::Result;
use crate::http;
use crate::params::Query;

const TLE_HOST: &str = "https://tle.ivanstanojevic.me/api/tle";

/// Fetches orbital element sets, either searching by satellite name or
/// looking one up by NORAD catalog number. With neither, the full
/// paginated collection is returned.
pub fn tle(search: Option<&str>, satellite_number: Option<u32>) -> Result<Value> {
    let url = match satellite_number {
        Some(number) => format!("{}/{}", TLE_HOST, number),
        None => TLE_HOST.to_string(),
    };

    let mut query = Query::new();
    query.push_opt("search", search);

    let client = reqwest::blocking::Client::new();
    http::get_json(&client, &url, &query)
}
