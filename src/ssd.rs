//! JPL Solar System Dynamics / CNEOS services.
//!
//! These endpoints live on `ssd-api.jpl.nasa.gov` and take no API key,
//! so they are exposed as free functions rather than [`Nasa`] methods.
//! Close approach and fireball data come back in the SSD `fields`/`data`
//! shape; NHATS and Sentry summaries are plain record lists. The
//! `*_table` companions flatten either shape into a [`DataTable`].
//!
//! [`Nasa`]: crate::client::Nasa

use serde_json::Value;

use crate::data::datatable::DataTable;
use crate::error::{Error, Result};
use crate::http;
use crate::params::{check_allowed, ApiDate, Query};

const SSD_HOST: &str = "https://ssd-api.jpl.nasa.gov";

/// Parameters for [`close_approach`].
///
/// Unset filters fall back to the service defaults: close approaches of
/// NEOs to Earth within 0.05 au over the next sixty days, sorted by
/// date. Distances accept a unit suffix (`0.05`, `10LD`).
#[derive(Debug, Clone)]
pub struct CloseApproachParams {
    pub date_min: Option<ApiDate>,
    pub date_max: Option<ApiDate>,
    pub dist_min: Option<String>,
    pub dist_max: Option<String>,
    /// Absolute magnitude bounds.
    pub h_min: Option<f64>,
    pub h_max: Option<f64>,
    /// Velocity bounds relative to a massless body, km/s.
    pub v_inf_min: Option<f64>,
    pub v_inf_max: Option<f64>,
    /// Velocity bounds relative to the approach body, km/s.
    pub v_rel_min: Option<f64>,
    pub v_rel_max: Option<f64>,
    /// Orbit class filter, e.g. `ATE`, `APO`, `AMO`.
    pub orbit_class: Option<String>,
    pub pha: bool,
    pub nea: bool,
    pub comet: bool,
    pub nea_comet: bool,
    pub neo: bool,
    pub kind: Option<String>,
    pub spk: Option<u32>,
    pub des: Option<String>,
    pub body: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<u32>,
    pub fullname: bool,
}

impl Default for CloseApproachParams {
    fn default() -> Self {
        Self {
            date_min: None,
            date_max: None,
            dist_min: None,
            dist_max: None,
            h_min: None,
            h_max: None,
            v_inf_min: None,
            v_inf_max: None,
            v_rel_min: None,
            v_rel_max: None,
            orbit_class: None,
            pha: false,
            nea: false,
            comet: false,
            nea_comet: false,
            neo: true,
            kind: None,
            spk: None,
            des: None,
            body: None,
            sort: None,
            limit: None,
            fullname: false,
        }
    }
}

impl CloseApproachParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        if self.limit == Some(0) {
            return Err(Error::InvalidParameter(
                "limit must be at least 1".to_string(),
            ));
        }

        let mut query = Query::new();
        query.push_opt("date-min", self.date_min);
        query.push_opt("date-max", self.date_max);
        query.push_opt("dist-min", self.dist_min.as_deref());
        query.push_opt("dist-max", self.dist_max.as_deref());
        query.push_opt("h-min", self.h_min);
        query.push_opt("h-max", self.h_max);
        query.push_opt("v-inf-min", self.v_inf_min);
        query.push_opt("v-inf-max", self.v_inf_max);
        query.push_opt("v-rel-min", self.v_rel_min);
        query.push_opt("v-rel-max", self.v_rel_max);
        query.push_opt("class", self.orbit_class.as_deref());
        query.push("pha", self.pha);
        query.push("nea", self.nea);
        query.push("comet", self.comet);
        query.push("nea-comet", self.nea_comet);
        query.push("neo", self.neo);
        query.push_opt("kind", self.kind.as_deref());
        query.push_opt("spk", self.spk);
        query.push_opt("des", self.des.as_deref());
        query.push_opt("body", self.body.as_deref());
        query.push_opt("sort", self.sort.as_deref());
        query.push_opt("limit", self.limit);
        query.push("fullname", self.fullname);
        Ok(query)
    }
}

/// Parameters for [`fireballs`].
///
/// Energies are in joules (radiated) and kilotons (impact), velocities
/// km/s, altitudes km. The `req_*` flags drop records missing that
/// datum.
#[derive(Debug, Clone, Default)]
pub struct FireballParams {
    pub date_min: Option<ApiDate>,
    pub date_max: Option<ApiDate>,
    pub energy_min: Option<f64>,
    pub energy_max: Option<f64>,
    pub impact_e_min: Option<f64>,
    pub impact_e_max: Option<f64>,
    pub vel_min: Option<f64>,
    pub vel_max: Option<f64>,
    pub alt_min: Option<f64>,
    pub alt_max: Option<f64>,
    pub req_loc: bool,
    pub req_alt: bool,
    pub req_vel: bool,
    pub req_vel_comp: bool,
    pub vel_comp: bool,
    /// Sort field: date, energy, impact-e, vel, or alt; prefix with `-`
    /// to reverse.
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

impl FireballParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        if self.limit == Some(0) {
            return Err(Error::InvalidParameter(
                "limit must be at least 1".to_string(),
            ));
        }

        let mut query = Query::new();
        query.push_opt("date-min", self.date_min);
        query.push_opt("date-max", self.date_max);
        query.push_opt("energy-min", self.energy_min);
        query.push_opt("energy-max", self.energy_max);
        query.push_opt("impact-e-min", self.impact_e_min);
        query.push_opt("impact-e-max", self.impact_e_max);
        query.push_opt("vel-min", self.vel_min);
        query.push_opt("vel-max", self.vel_max);
        query.push_opt("alt-min", self.alt_min);
        query.push_opt("alt-max", self.alt_max);
        query.push("req-loc", self.req_loc);
        query.push("req-alt", self.req_alt);
        query.push("req-vel", self.req_vel);
        query.push("req-vel-comp", self.req_vel_comp);
        query.push("vel-comp", self.vel_comp);
        query.push_opt("sort", self.sort.as_deref());
        query.push_opt("limit", self.limit);
        Ok(query)
    }
}

/// Parameters for [`mission_design`].
///
/// Exactly one of `des`, `spk`, or `sstr` selects the target object.
#[derive(Debug, Clone, Default)]
pub struct MissionDesignParams {
    /// Object designation, e.g. `2012 TC4`.
    pub des: Option<String>,
    /// SPK-ID, e.g. `2000433`.
    pub spk: Option<u32>,
    /// Object search string, resolved by the service.
    pub sstr: Option<String>,
    pub orbit_class: bool,
    /// Launch window start, Modified Julian Date.
    pub mjd0: Option<u32>,
    /// Launch window duration in days.
    pub span: Option<u32>,
    /// Time of flight bounds in days.
    pub tof_min: Option<u32>,
    pub tof_max: Option<u32>,
    /// Grid step in days.
    pub step: Option<u32>,
}

impl MissionDesignParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        let selectors = [
            self.des.is_some(),
            self.spk.is_some(),
            self.sstr.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if selectors != 1 {
            return Err(Error::InvalidParameter(
                "exactly one of des, spk, or sstr must identify the object".to_string(),
            ));
        }

        let mut query = Query::new();
        query.push_opt("des", self.des.as_deref());
        query.push_opt("spk", self.spk);
        query.push_opt("sstr", self.sstr.as_deref());
        query.push("class", self.orbit_class);
        query.push_opt("mjd0", self.mjd0);
        query.push_opt("span", self.span);
        query.push_opt("tof-min", self.tof_min);
        query.push_opt("tof-max", self.tof_max);
        query.push_opt("step", self.step);
        Ok(query)
    }
}

/// Parameters for [`nhats`].
///
/// The service only accepts fixed value sets for the mission
/// constraints; anything else is rejected before the request is sent.
#[derive(Debug, Clone)]
pub struct NhatsParams {
    /// Maximum total delta-V, km/s.
    pub dv: u32,
    /// Maximum mission duration, days.
    pub dur: u32,
    /// Minimum stay at the object, days.
    pub stay: u32,
    /// Launch window, e.g. `2020-2045`.
    pub launch: String,
    /// Maximum absolute magnitude.
    pub h: Option<u32>,
    /// Maximum orbit condition code.
    pub occ: Option<u32>,
    /// Restrict to one object by SPK-ID.
    pub spk: Option<u32>,
    /// Restrict to one object by designation.
    pub des: Option<String>,
    pub plot: bool,
}

impl Default for NhatsParams {
    fn default() -> Self {
        Self {
            dv: 12,
            dur: 450,
            stay: 8,
            launch: "2020-2045".to_string(),
            h: None,
            occ: None,
            spk: None,
            des: None,
            plot: false,
        }
    }
}

impl NhatsParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        check_allowed("dv", self.dv, &[4, 5, 6, 7, 8, 9, 10, 11, 12])?;
        check_allowed(
            "dur",
            self.dur,
            &[60, 90, 120, 150, 180, 210, 240, 270, 300, 330, 360, 390, 420, 450],
        )?;
        check_allowed("stay", self.stay, &[8, 16, 24, 32])?;
        check_allowed(
            "launch",
            self.launch.as_str(),
            &[
                "2020-2025",
                "2025-2030",
                "2030-2035",
                "2035-2040",
                "2040-2045",
                "2020-2045",
            ],
        )?;
        if let Some(h) = self.h {
            if !(16..=30).contains(&h) {
                return Err(Error::InvalidParameter(format!(
                    "h must be between 16 and 30, got {}",
                    h
                )));
            }
        }
        if let Some(occ) = self.occ {
            if occ > 8 {
                return Err(Error::InvalidParameter(format!(
                    "occ must be between 0 and 8, got {}",
                    occ
                )));
            }
        }

        let mut query = Query::new();
        query.push("dv", self.dv);
        query.push("dur", self.dur);
        query.push("stay", self.stay);
        query.push("launch", &self.launch);
        query.push_opt("h", self.h);
        query.push_opt("occ", self.occ);
        query.push_opt("spk", self.spk);
        query.push_opt("des", self.des.as_deref());
        query.push("plot", self.plot);
        Ok(query)
    }
}

/// Parameters for [`scout`].
#[derive(Debug, Clone, Default)]
pub struct ScoutParams {
    /// Temporary designation or internal object name.
    pub tdes: Option<String>,
    /// Requested plot types, e.g. `el:ca`.
    pub plot: Option<String>,
    /// `list` to enumerate available data files, or a file name.
    pub data_files: Option<String>,
    pub orbits: bool,
    pub n_orbits: Option<u32>,
    /// Ephemeris window and step, e.g. `2019-09-20T00:00:00`.
    pub eph_start: Option<String>,
    pub eph_stop: Option<String>,
    pub eph_step: Option<String>,
    /// MPC observatory code.
    pub obs_code: Option<String>,
}

impl ScoutParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        if let Some(n_orbits) = self.n_orbits {
            if !(1..=1000).contains(&n_orbits) {
                return Err(Error::InvalidParameter(format!(
                    "n_orbits must be between 1 and 1000, got {}",
                    n_orbits
                )));
            }
        }

        let mut query = Query::new();
        query.push_opt("tdes", self.tdes.as_deref());
        query.push_opt("plot", self.plot.as_deref());
        query.push_opt("file", self.data_files.as_deref());
        query.push("orbits", self.orbits);
        query.push_opt("n-orbits", self.n_orbits);
        query.push_opt("eph-start", self.eph_start.as_deref());
        query.push_opt("eph-stop", self.eph_stop.as_deref());
        query.push_opt("eph-step", self.eph_step.as_deref());
        query.push_opt("obs-code", self.obs_code.as_deref());
        Ok(query)
    }
}

/// Parameters for [`sentry`].
///
/// Without an object selector the summary table is returned; `spk` and
/// `des` each select a single object and cannot be combined.
#[derive(Debug, Clone, Default)]
pub struct SentryParams {
    pub spk: Option<u32>,
    pub des: Option<String>,
    /// Maximum absolute magnitude.
    pub h_max: Option<f64>,
    /// Minimum Palermo scale.
    pub ps_min: Option<i32>,
    /// Minimum impact probability.
    pub ip_min: Option<f64>,
    /// Only objects observed within this many days.
    pub last_obs_days: Option<u32>,
    /// Request complete virtual-impactor data.
    pub complete_data: bool,
    /// List objects removed from Sentry monitoring instead.
    pub removed: bool,
}

impl SentryParams {
    pub(crate) fn to_query(&self) -> Result<Query> {
        if self.spk.is_some() && self.des.is_some() {
            return Err(Error::InvalidParameter(
                "either spk or des may select an object, not both".to_string(),
            ));
        }

        let mut query = Query::new();
        query.push_opt("spk", self.spk);
        query.push_opt("des", self.des.as_deref());
        query.push_opt("h-max", self.h_max);
        query.push_opt("ps-min", self.ps_min);
        query.push_opt("ip-min", self.ip_min);
        query.push_opt("last-obs-days", self.last_obs_days);
        query.push("all", self.complete_data);
        query.push("removed", self.removed);
        Ok(query)
    }
}

/// Asteroid and comet close approaches to the planets from the CAD
/// service.
pub fn close_approach(params: &CloseApproachParams) -> Result<Value> {
    get("cad.api", params.to_query()?)
}

/// [`close_approach`] flattened into a table, one row per approach.
pub fn close_approach_table(params: &CloseApproachParams) -> Result<DataTable> {
    DataTable::from_fields_and_rows("close_approach", &close_approach(params)?)
}

/// Fireball atmospheric impact events reported by US Government sensors.
pub fn fireballs(params: &FireballParams) -> Result<Value> {
    get("fireball.api", params.to_query()?)
}

/// [`fireballs`] flattened into a table, one row per event.
pub fn fireballs_table(params: &FireballParams) -> Result<DataTable> {
    DataTable::from_fields_and_rows("fireballs", &fireballs(params)?)
}

/// Small-body mission design data for a single object.
pub fn mission_design(params: &MissionDesignParams) -> Result<Value> {
    get("mdesign.api", params.to_query()?)
}

/// Human-accessible NEOs from the NHATS study.
pub fn nhats(params: &NhatsParams) -> Result<Value> {
    get("nhats.api", params.to_query()?)
}

/// [`nhats`] summary data flattened into a table, one row per object.
pub fn nhats_table(params: &NhatsParams) -> Result<DataTable> {
    DataTable::from_records("nhats", &take_data(nhats(params)?))
}

/// Orbit and ephemeris estimates for unconfirmed objects on the NEOCP.
pub fn scout(params: &ScoutParams) -> Result<Value> {
    get("scout.api", params.to_query()?)
}

/// Objects monitored for potential future Earth impact by Sentry.
pub fn sentry(params: &SentryParams) -> Result<Value> {
    get("sentry.api", params.to_query()?)
}

/// [`sentry`] results flattened into a table, one row per object or
/// virtual impactor.
pub fn sentry_table(params: &SentryParams) -> Result<DataTable> {
    DataTable::from_records("sentry", &take_data(sentry(params)?))
}

// The record-list services wrap their rows in a "data" envelope next to
// the count and signature.
fn take_data(mut json: Value) -> Value {
    match json.get_mut("data") {
        Some(data) => data.take(),
        None => Value::Array(Vec::new()),
    }
}

fn get(endpoint: &str, query: Query) -> Result<Value> {
    let client = reqwest::blocking::Client::new();
    http::get_json(&client, &format!("{}/{}", SSD_HOST, endpoint), &query)
}
