//! Client library for NASA and related public web APIs.
//!
//! Endpoints on `api.nasa.gov` that take an API key are methods on
//! [`Nasa`]; the keyless services (JPL SSD/CNEOS, the NASA Image and
//! Video Library, TLE data) are free functions in their own modules.
//! Every call validates and serializes its parameters, issues one
//! blocking GET, and returns the parsed JSON. List-of-record responses
//! can be flattened into a [`DataTable`] for row/column access or CSV
//! export.

pub mod client;
pub mod config;
pub mod data;
pub mod error;
mod http;
pub mod media;
pub mod params;
pub mod ssd;
pub mod tle;

pub use client::{Nasa, DEMO_KEY};
pub use config::Config;
pub use data::data_provider::DataProvider;
pub use data::datatable::DataTable;
pub use error::{Error, Result};
pub use params::{julian_date, ApiDate};
