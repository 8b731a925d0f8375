use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::cell::Cell;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http;
use crate::params::{check_latitude, check_longitude, ApiDate, Query};

/// Key used when no API key has been configured. Heavily rate limited.
pub const DEMO_KEY: &str = "DEMO_KEY";

const DEFAULT_HOST: &str = "https://api.nasa.gov";

/// Catalog filter for CME analysis queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CmeCatalog {
    #[default]
    All,
    Swrc,
    JangEtAl,
}

impl CmeCatalog {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmeCatalog::All => "ALL",
            CmeCatalog::Swrc => "SWRC_CATALOG",
            CmeCatalog::JangEtAl => "JANG_ET_AL_CATALOG",
        }
    }
}

/// Observed location filter for interplanetary shock queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpsLocation {
    #[default]
    All,
    Earth,
    Messenger,
    StereoA,
    StereoB,
}

impl IpsLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpsLocation::All => "ALL",
            IpsLocation::Earth => "Earth",
            IpsLocation::Messenger => "MESSENGER",
            IpsLocation::StereoA => "STEREO A",
            IpsLocation::StereoB => "STEREO B",
        }
    }
}

/// Catalog filter for interplanetary shock queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpsCatalog {
    #[default]
    All,
    Swrc,
    WinslowMessengerIcme,
}

impl IpsCatalog {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpsCatalog::All => "ALL",
            IpsCatalog::Swrc => "SWRC_CATALOG",
            IpsCatalog::WinslowMessengerIcme => "WINSLOW_MESSENGER_ICME_CATALOG",
        }
    }
}

/// Imagery type served by the EPIC camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpicColor {
    #[default]
    Natural,
    Enhanced,
}

impl EpicColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpicColor::Natural => "natural",
            EpicColor::Enhanced => "enhanced",
        }
    }
}

/// Mars rovers with photo archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rover {
    #[default]
    Curiosity,
    Opportunity,
    Spirit,
}

impl Rover {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Opportunity => "opportunity",
            Rover::Spirit => "spirit",
        }
    }
}

/// Rover cameras accepted by the photo archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoverCamera {
    #[default]
    All,
    Fhaz,
    Rhaz,
    Mast,
    Chemcam,
    Mahli,
    Mardi,
    Navcam,
    Pancam,
    Minites,
}

impl RoverCamera {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoverCamera::All => "all",
            RoverCamera::Fhaz => "FHAZ",
            RoverCamera::Rhaz => "RHAZ",
            RoverCamera::Mast => "MAST",
            RoverCamera::Chemcam => "CHEMCAM",
            RoverCamera::Mahli => "MAHLI",
            RoverCamera::Mardi => "MARDI",
            RoverCamera::Navcam => "NAVCAM",
            RoverCamera::Pancam => "PANCAM",
            RoverCamera::Minites => "MINITES",
        }
    }
}

/// Bioinformatics databases searchable through GeneLab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenelabDatabase {
    #[default]
    Cgene,
    NihGeoGse,
    EbiPride,
    MgRast,
}

impl GenelabDatabase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenelabDatabase::Cgene => "cgene",
            GenelabDatabase::NihGeoGse => "nih_geo_gse",
            GenelabDatabase::EbiPride => "ebi_pride",
            GenelabDatabase::MgRast => "mg_rast",
        }
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Parameters for [`Nasa::coronal_mass_ejection`].
///
/// Defaults mirror the remote service: only the most accurate, complete
/// entries from the last thirty days, across all catalogs.
#[derive(Debug, Clone)]
pub struct CmeAnalysisParams {
    pub start_date: Option<ApiDate>,
    pub end_date: Option<ApiDate>,
    pub accurate_only: bool,
    pub complete_entry: bool,
    /// Lower limit on the speed of the CME event, km/s.
    pub speed: u32,
    /// Lower limit on the half angle of the CME event, degrees.
    pub half_angle: u32,
    pub catalog: CmeCatalog,
    pub keyword: Option<String>,
}

impl Default for CmeAnalysisParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            accurate_only: true,
            complete_entry: true,
            speed: 0,
            half_angle: 0,
            catalog: CmeCatalog::default(),
            keyword: None,
        }
    }
}

impl CmeAnalysisParams {
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.push_opt("startDate", self.start_date);
        query.push_opt("endDate", self.end_date);
        query.push("mostAccurateOnly", self.accurate_only);
        query.push("completeEntryOnly", self.complete_entry);
        query.push("speed", self.speed);
        query.push("halfAngle", self.half_angle);
        query.push("catalog", self.catalog.as_str());
        query.push_opt("keyword", self.keyword.as_deref());
        query
    }
}

/// Parameters for [`Nasa::mars_rover`].
///
/// Photos are selected by either `sol` (Martian day since landing) or
/// `earth_date`, never both. The archive pages at 25 results.
#[derive(Debug, Clone)]
pub struct MarsRoverParams {
    pub sol: Option<u64>,
    pub earth_date: Option<ApiDate>,
    pub camera: RoverCamera,
    pub rover: Rover,
    pub page: u32,
}

impl Default for MarsRoverParams {
    fn default() -> Self {
        Self {
            sol: None,
            earth_date: None,
            camera: RoverCamera::default(),
            rover: Rover::default(),
            page: 1,
        }
    }
}

impl MarsRoverParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        if self.sol.is_some() && self.earth_date.is_some() {
            return Err(Error::InvalidParameter(
                "either sol or earth_date should be specified, not both".to_string(),
            ));
        }

        let mut query = Query::new();
        query.push("page", self.page);
        query.push_opt("sol", self.sol);
        query.push_opt("earth_date", self.earth_date);
        if self.camera != RoverCamera::All {
            query.push("camera", self.camera.as_str());
        }
        Ok(query)
    }
}

/// Parameters for [`Nasa::genelab_search`].
#[derive(Debug, Clone)]
pub struct GenelabSearchParams {
    /// Keyword search; case-insensitive AND/OR/NOT operators are passed
    /// through to the service.
    pub term: Option<String>,
    pub databases: Vec<GenelabDatabase>,
    pub page: u32,
    pub size: u32,
    pub sort: Option<String>,
    pub order: SortOrder,
    /// Filter field, paired with `fvalue`. Only the GeneLab database
    /// supports filtering.
    pub ffield: Option<String>,
    pub fvalue: Option<String>,
}

impl Default for GenelabSearchParams {
    fn default() -> Self {
        Self {
            term: None,
            databases: vec![GenelabDatabase::Cgene],
            page: 0,
            size: 25,
            sort: None,
            order: SortOrder::default(),
            ffield: None,
            fvalue: None,
        }
    }
}

impl GenelabSearchParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        if self.size == 0 {
            return Err(Error::InvalidParameter(
                "size of results to return cannot be 0".to_string(),
            ));
        }

        let databases: Vec<&str> = self.databases.iter().map(|d| d.as_str()).collect();

        let mut query = Query::new();
        query.push_opt("term", self.term.as_deref());
        query.push_opt("sort", self.sort.as_deref());
        query.push_list("type", &databases);
        query.push("from", self.page);
        query.push("size", self.size);
        query.push("order", self.order.as_str());
        query.push_opt("ffield", self.ffield.as_deref());
        query.push_opt("fvalue", self.fvalue.as_deref());
        Ok(query)
    }
}

/// Parameters for [`Nasa::exoplanets`], passed through to the Exoplanet
/// Archive query interface.
#[derive(Debug, Clone, Default)]
pub struct ExoplanetParams {
    pub table: Option<String>,
    pub select: Option<String>,
    pub count: Option<String>,
    pub colset: Option<String>,
    pub where_clause: Option<String>,
    pub order: Option<String>,
    pub ra: Option<String>,
    pub dec: Option<String>,
}

impl ExoplanetParams {
    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.push_opt("table", self.table.as_deref());
        query.push_opt("select", self.select.as_deref());
        query.push_opt("count", self.count.as_deref());
        query.push_opt("colset", self.colset.as_deref());
        query.push_opt("where", self.where_clause.as_deref());
        query.push_opt("order", self.order.as_deref());
        query.push_opt("ra", self.ra.as_deref());
        query.push_opt("dec", self.dec.as_deref());
        query.push("format", "json");
        query
    }
}

/// Client for the NASA API endpoints that require an API key.
///
/// Every method issues one blocking GET and returns the parsed JSON.
/// The `X-RateLimit-Remaining` header is recorded after each call and
/// readable through [`Nasa::limit_remaining`]; the InSight weather
/// endpoint is metered separately.
pub struct Nasa {
    host: String,
    api_key: String,
    client: Client,
    limit_remaining: Cell<Option<u64>>,
    mars_weather_limit_remaining: Cell<Option<u64>>,
}

impl Nasa {
    /// Creates a client. With no key, the shared `DEMO_KEY` is used,
    /// which has a much lower rate limit.
    pub fn new(key: Option<&str>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: key
                .map(str::to_string)
                .unwrap_or_else(|| DEMO_KEY.to_string()),
            client: Client::new(),
            limit_remaining: Cell::new(None),
            mars_weather_limit_remaining: Cell::new(None),
        }
    }

    /// Creates a client from a loaded [`Config`], resolving the key from
    /// the environment, the config file, then `DEMO_KEY`.
    pub fn from_config(config: &Config) -> Self {
        let mut nasa = Self::new(None);
        nasa.api_key = config.resolve_key();
        nasa.host = config.host.clone();
        nasa
    }

    /// Points the client at a different base host. Intended for tests
    /// against a local stand-in server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API calls remaining on the key, as last reported by the service.
    pub fn limit_remaining(&self) -> Option<u64> {
        self.limit_remaining.get()
    }

    /// Calls remaining on the separately-metered InSight weather endpoint.
    pub fn mars_weather_limit_remaining(&self) -> Option<u64> {
        self.mars_weather_limit_remaining.get()
    }

    /// Returns the URL and other information for the NASA Astronomy
    /// Picture of the Day. With `hd`, the high-definition image URL is
    /// included.
    pub fn picture_of_the_day(&self, date: Option<ApiDate>, hd: bool) -> Result<Value> {
        let mut query = Query::new();
        query.push_opt("date", date);
        query.push("hd", hd);
        self.get_json("/planetary/apod", query)
    }

    /// Per-Sol summary data for each of the last seven available Sols,
    /// from the InSight lander. Sols may be recalculated as more data
    /// arrives.
    pub fn mars_weather(&self) -> Result<Value> {
        let mut query = Query::new();
        query.push("ver", "1.0");
        query.push("feedtype", "json");
        let response = self.send(
            "/insight_weather/",
            query,
            &self.mars_weather_limit_remaining,
        )?;
        http::read_json(response)
    }

    /// Asteroids listed by their closest approach date to Earth. The
    /// service defaults `end_date` to seven days after `start_date`.
    pub fn asteroid_feed(&self, start_date: ApiDate, end_date: Option<ApiDate>) -> Result<Value> {
        let mut query = Query::new();
        query.push("start_date", start_date);
        query.push_opt("end_date", end_date);
        self.get_json("/neo/rest/v1/feed", query)
    }

    /// Browses the overall asteroid data set, or looks up one asteroid
    /// by its ID.
    pub fn get_asteroids(&self, asteroid_id: Option<&str>) -> Result<Value> {
        let path = match asteroid_id {
            Some(id) => format!("/neo/rest/v1/neo/{}", id),
            None => "/neo/rest/v1/neo/browse/".to_string(),
        };
        self.get_json(&path, Query::new())
    }

    /// Coronal mass ejection analyses from DONKI.
    pub fn coronal_mass_ejection(&self, params: &CmeAnalysisParams) -> Result<Value> {
        self.get_json("/DONKI/CMEAnalysis", params.to_query())
    }

    /// Geomagnetic storm events from DONKI.
    pub fn geomagnetic_storm(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("GST", start_date, end_date)
    }

    /// Interplanetary shock events from DONKI, optionally filtered by
    /// observed location and catalog.
    pub fn interplanetary_shock(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
        location: IpsLocation,
        catalog: IpsCatalog,
    ) -> Result<Value> {
        let mut query = Query::new();
        query.push_opt("startDate", start_date);
        query.push_opt("endDate", end_date);
        query.push("location", location.as_str());
        query.push("catalog", catalog.as_str());
        self.get_json("/DONKI/IPS", query)
    }

    /// Solar flare events from DONKI.
    pub fn solar_flare(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("FLR", start_date, end_date)
    }

    /// Solar energetic particle events from DONKI.
    pub fn solar_energetic_particle(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("SEP", start_date, end_date)
    }

    /// Magnetopause crossing events from DONKI.
    pub fn magnetopause_crossing(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("MPC", start_date, end_date)
    }

    /// Radiation belt enhancement events from DONKI.
    pub fn radiation_belt_enhancement(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("RBE", start_date, end_date)
    }

    /// High speed stream events from DONKI.
    pub fn high_speed_stream(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("HSS", start_date, end_date)
    }

    /// WSA-ENLIL solar wind simulation runs from DONKI.
    pub fn wsa_enlil_simulation(
        &self,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        self.donki("WSAEnlilSimulations", start_date, end_date)
    }

    /// Imagery collected by DSCOVR's Earth Polychromatic Imaging Camera.
    ///
    /// With a `date`, imagery for that date is returned; with
    /// `available`, the listing of all dates with imagery of the chosen
    /// color; otherwise the full `all` listing.
    pub fn epic(&self, color: EpicColor, date: Option<ApiDate>, available: bool) -> Result<Value> {
        self.get_json(&epic_path(color, date, available), Query::new())
    }

    /// Landsat 8 imagery for a lat/lon location and date. `dim` is the
    /// width and height of the image in degrees, defaulting to 0.025.
    pub fn earth_imagery(
        &self,
        lat: f64,
        lon: f64,
        dim: Option<f64>,
        date: Option<ApiDate>,
        cloud_score: bool,
    ) -> Result<Value> {
        check_latitude(lat)?;
        check_longitude(lon)?;

        let mut query = Query::new();
        query.push("lon", lon);
        query.push("lat", lat);
        query.push("dim", dim.unwrap_or(0.025));
        query.push_opt("date", date);
        query.push("cloud_score", cloud_score);
        self.get_json("/planetary/earth/imagery/", query)
    }

    /// Datetimes and asset names of available imagery for a lat/lon
    /// location over a date range. The satellite passes over each point
    /// roughly once every sixteen days.
    pub fn earth_assets(
        &self,
        lat: f64,
        lon: f64,
        begin_date: ApiDate,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        check_latitude(lat)?;
        check_longitude(lon)?;

        let mut query = Query::new();
        query.push("lat", lat);
        query.push("lon", lon);
        query.push("begin_date", begin_date);
        query.push_opt("end_date", end_date);
        self.get_json("/planetary/earth/assets", query)
    }

    /// Image data collected by the Mars rovers. Returns the photo list
    /// from the response envelope.
    pub fn mars_rover(&self, params: &MarsRoverParams) -> Result<Value> {
        let query = params.to_query()?;
        let path = format!("/mars-photos/api/v1/rovers/{}/photos", params.rover.as_str());
        let mut json = self.get_json(&path, query)?;

        match json.get_mut("photos") {
            Some(photos) => Ok(photos.take()),
            None => Ok(json),
        }
    }

    /// Searches GeneLab and the other configured bioinformatics
    /// databases.
    pub fn genelab_search(&self, params: &GenelabSearchParams) -> Result<Value> {
        self.get_json(
            "https://genelab-data.ndc.nasa.gov/genelab/data/search",
            params.to_query()?,
        )
    }

    /// NASA project data from Techport. Without a `project_id`, all
    /// projects are listed, optionally restricted to those updated after
    /// `last_updated`.
    pub fn techport(
        &self,
        project_id: Option<&str>,
        last_updated: Option<ApiDate>,
    ) -> Result<Value> {
        match project_id {
            Some(id) => self.get_json(&format!("/techport/api/projects/{}", id), Query::new()),
            None => {
                let mut query = Query::new();
                query.push_opt("updatedSince", last_updated);
                self.get_json("/techport/api/projects/", query)
            }
        }
    }

    /// Techport project record as XML text.
    pub fn techport_xml(&self, project_id: &str) -> Result<String> {
        let response = self.send(
            &format!("/techport/api/projects/{}.xml", project_id),
            Query::new(),
            &self.limit_remaining,
        )?;
        Ok(response.text()?)
    }

    /// Passthrough query against the Exoplanet Archive.
    pub fn exoplanets(&self, params: &ExoplanetParams) -> Result<Value> {
        self.get_json(
            "https://exoplanetarchive.ipac.caltech.edu/cgi-bin/nstedAPI/nph-nstedAPI",
            params.to_query(),
        )
    }

    // The DONKI endpoints share one parameter set; the service defaults
    // the window to the thirty days before now.
    fn donki(
        &self,
        endpoint: &str,
        start_date: Option<ApiDate>,
        end_date: Option<ApiDate>,
    ) -> Result<Value> {
        let mut query = Query::new();
        query.push_opt("startDate", start_date);
        query.push_opt("endDate", end_date);
        self.get_json(&format!("/DONKI/{}", endpoint), query)
    }

    fn get_json(&self, path: &str, query: Query) -> Result<Value> {
        http::read_json(self.send(path, query, &self.limit_remaining)?)
    }

    fn send(
        &self,
        path: &str,
        mut query: Query,
        counter: &Cell<Option<u64>>,
    ) -> Result<Response> {
        query.push("api_key", &self.api_key);

        let url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.host, path)
        };
        debug!(target: "request", "GET {}", url);

        let response = self.client.get(&url).query(query.pairs()).send()?;
        if let Some(remaining) = rate_limit_remaining(&response) {
            counter.set(Some(remaining));
        }

        http::check_status(response)
    }
}

fn rate_limit_remaining(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn epic_path(color: EpicColor, date: Option<ApiDate>, available: bool) -> String {
    match (date, available) {
        (Some(date), _) => format!("/EPIC/api/{}/date/{}", color.as_str(), date),
        (None, true) => format!("/EPIC/api/{}/available", color.as_str()),
        (None, false) => format!("/EPIC/api/{}/all", color.as_str()),
    }
}
