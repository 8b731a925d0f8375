//! Tabular normalization layer.
//!
//! Endpoint methods return raw `serde_json::Value` payloads; this module
//! flattens list-of-records JSON (and the SSD `fields`/`data` shape) into
//! a [`DataTable`](datatable::DataTable) when the caller wants rows and
//! columns instead.

pub mod data_provider;
pub mod datatable;
pub mod exporter;
