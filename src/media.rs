//! NASA Image and Video Library.
//!
//! Keyless endpoints on `images-api.nasa.gov` for searching the media
//! archive and fetching per-asset manifests, metadata, and captions.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::http;
use crate::params::Query;

const MEDIA_HOST: &str = "https://images-api.nasa.gov";

/// Media types stored in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        }
    }
}

/// Parameters for [`media_search`]. At least one criterion must be set.
#[derive(Debug, Clone, Default)]
pub struct MediaSearchParams {
    /// Free-text query across all fields.
    pub query: Option<String>,
    /// NASA center that published the media, e.g. `JSC`.
    pub center: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub location: Option<String>,
    pub media_types: Vec<MediaType>,
    pub nasa_id: Option<String>,
    /// Page of results; the service fixes the page size at 100.
    pub page: Option<u32>,
    pub photographer: Option<String>,
    pub secondary_creator: Option<String>,
    pub title: Option<String>,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
}

impl MediaSearchParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        let mut query = Query::new();
        query.push_opt("q", self.query.as_deref());
        query.push_opt("center", self.center.as_deref());
        query.push_opt("description", self.description.as_deref());
        query.push_list("keywords", &self.keywords);
        query.push_opt("location", self.location.as_deref());

        let media_types: Vec<&str> = self.media_types.iter().map(|m| m.as_str()).collect();
        query.push_list("media_type", &media_types);

        query.push_opt("nasa_id", self.nasa_id.as_deref());
        query.push_opt("photographer", self.photographer.as_deref());
        query.push_opt("secondary_creator", self.secondary_creator.as_deref());
        query.push_opt("title", self.title.as_deref());
        query.push_opt("year_start", self.year_start);
        query.push_opt("year_end", self.year_end);

        if query.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one search criterion must be provided".to_string(),
            ));
        }

        query.push_opt("page", self.page);
        Ok(query)
    }
}

/// Searches the media archive.
pub fn media_search(params: &MediaSearchParams) -> Result<Value> {
    get("/search", params.to_query()?)
}

/// Lists the available files for a media asset.
pub fn media_asset_manifest(nasa_id: &str) -> Result<Value> {
    get(&format!("/asset/{}", nasa_id), Query::new())
}

/// Location of the metadata file for a media asset.
pub fn media_asset_metadata(nasa_id: &str) -> Result<Value> {
    get(&format!("/metadata/{}", nasa_id), Query::new())
}

/// Location of the caption file for a video asset.
pub fn media_asset_captions(nasa_id: &str) -> Result<Value> {
    get(&format!("/captions/{}", nasa_id), Query::new())
}

fn get(path: &str, query: Query) -> Result<Value> {
    let client = reqwest::blocking::Client::new();
    http::get_json(&client, &format!("{}{}", MEDIA_HOST, path), &query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_requires_a_criterion() {
        assert!(MediaSearchParams::default().to_query().is_err());

        // the page alone does not narrow a search
        let params = MediaSearchParams {
            page: Some(2),
            ..MediaSearchParams::default()
        };
        assert!(params.to_query().is_err());
    }

    #[test]
    fn test_search_query_names() {
        let params = MediaSearchParams {
            query: Some("apollo 11".to_string()),
            media_types: vec![MediaType::Image, MediaType::Video],
            year_start: Some(1968),
            year_end: Some(1970),
            page: Some(1),
            ..MediaSearchParams::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(
            query.names(),
            vec!["q", "media_type", "year_start", "year_end", "page"]
        );
        assert_eq!(query.get("media_type"), Some("image,video"));
    }

    #[test]
    fn test_search_keywords_comma_joined() {
        let params = MediaSearchParams {
            keywords: vec!["moon".to_string(), "lunar module".to_string()],
            ..MediaSearchParams::default()
        };
        let query = params.to_query().unwrap();
        assert_eq!(query.get("keywords"), Some("moon,lunar module"));
    }
}
