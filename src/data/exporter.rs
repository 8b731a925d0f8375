use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::data_provider::DataProvider;
use crate::error::Result;

/// Handles exporting normalized data to CSV and JSON.
pub struct DataExporter;

impl DataExporter {
    /// Write the provider's rows as CSV, header line first.
    pub fn write_csv<W: Write>(provider: &dyn DataProvider, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(provider.get_column_names())?;

        for i in 0..provider.get_row_count() {
            if let Some(row) = provider.get_row(i) {
                wtr.write_record(&row)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    /// Export to a CSV file at the given path.
    pub fn export_csv(provider: &dyn DataProvider, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        Self::write_csv(provider, file)
    }

    /// Render the provider's rows as a CSV string.
    pub fn csv_string(provider: &dyn DataProvider) -> Result<String> {
        let mut buf = Vec::new();
        Self::write_csv(provider, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Rebuild the rows as an array of JSON objects keyed by column name.
    /// Values are the rendered strings, matching the CSV output.
    pub fn json_values(provider: &dyn DataProvider) -> Vec<Value> {
        let headers = provider.get_column_names();
        let mut result = Vec::new();

        for i in 0..provider.get_row_count() {
            if let Some(row) = provider.get_row(i) {
                let mut obj = serde_json::Map::new();
                for (j, value) in row.iter().enumerate() {
                    if j < headers.len() {
                        obj.insert(headers[j].clone(), Value::String(value.clone()));
                    }
                }
                result.push(Value::Object(obj));
            }
        }

        result
    }

    /// Export to a pretty-printed JSON file at the given path.
    pub fn export_json(provider: &dyn DataProvider, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &Self::json_values(provider))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datatable::DataTable;
    use serde_json::json;

    fn sample_table() -> DataTable {
        DataTable::from_records(
            "sample",
            &json!([
                {"name": "Bennu", "h": 20.9},
                {"name": "a, comma", "h": null},
            ]),
        )
        .unwrap()
    }

    #[test]
    fn test_csv_string_quotes_and_nulls() {
        let table = sample_table();
        let csv = DataExporter::csv_string(&table).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("h,name"));
        assert_eq!(lines.next(), Some("20.9,Bennu"));
        assert_eq!(lines.next(), Some(",\"a, comma\""));
    }

    #[test]
    fn test_json_values_keyed_by_column() {
        let table = sample_table();
        let values = DataExporter::json_values(&table);

        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["name"], json!("Bennu"));
        assert_eq!(values[1]["h"], json!(""));
    }
}
