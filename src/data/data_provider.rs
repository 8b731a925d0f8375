//! Read-only data access trait.
//!
//! Export code works against this trait so it does not need to know
//! whether the rows came from a [`DataTable`] or some other source.
//!
//! [`DataTable`]: crate::data::datatable::DataTable

use std::fmt::Debug;

/// Core trait for read-only, row-oriented data access.
pub trait DataProvider: Send + Sync + Debug {
    /// Get a single row by index, rendered as strings.
    /// Returns None if the index is out of bounds.
    fn get_row(&self, index: usize) -> Option<Vec<String>>;

    /// Get all column names in display order.
    fn get_column_names(&self) -> Vec<String>;

    /// Get the total number of rows.
    fn get_row_count(&self) -> usize;

    /// Get the number of columns.
    fn get_column_count(&self) -> usize;
}
