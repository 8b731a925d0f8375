use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::data::data_provider::DataProvider;
use crate::error::{Error, Result};

/// Represents the data type of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Null,
    Mixed, // For columns with mixed types
}

impl DataType {
    /// Merge two types (for columns with mixed types)
    pub fn merge(&self, other: &DataType) -> DataType {
        if self == other {
            return self.clone();
        }

        match (self, other) {
            (DataType::Null, t) | (t, DataType::Null) => t.clone(),
            (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                DataType::Float
            }
            _ => DataType::Mixed,
        }
    }
}

/// Column metadata and definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub null_count: usize,
}

impl DataColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::String,
            nullable: true,
            null_count: 0,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

/// A single cell value in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(String), // ISO 8601 string, as the APIs return it
    Null,
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::String(_) => DataType::String,
            DataValue::Integer(_) => DataType::Integer,
            DataValue::Float(_) => DataType::Float,
            DataValue::Boolean(_) => DataType::Boolean,
            DataValue::DateTime(_) => DataType::DateTime,
            DataValue::Null => DataType::Null,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::DateTime(dt) => write!(f, "{}", dt),
            DataValue::Null => write!(f, ""),
        }
    }
}

/// A row of data in the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRow {
    pub values: Vec<DataValue>,
}

impl DataRow {
    pub fn new(values: Vec<DataValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&DataValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Flattened tabular form of a JSON response: rows are records, columns
/// are fields. Built per call and owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
    pub metadata: HashMap<String, String>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn add_column(&mut self, column: DataColumn) -> &mut Self {
        self.columns.push(column);
        self
    }

    pub fn add_row(&mut self, row: DataRow) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::Table(format!(
                "row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get_column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column names as a vector
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Infer and update column types based on data
    pub fn infer_column_types(&mut self) {
        for (col_idx, column) in self.columns.iter_mut().enumerate() {
            let mut inferred_type = DataType::Null;
            let mut null_count = 0;

            for row in &self.rows {
                if let Some(value) = row.get(col_idx) {
                    if value.is_null() {
                        null_count += 1;
                    } else {
                        inferred_type = inferred_type.merge(&value.data_type());
                    }
                }
            }

            column.data_type = inferred_type;
            column.null_count = null_count;
            column.nullable = null_count > 0;
        }
    }

    /// Get a value at specific row and column
    pub fn get_value(&self, row: usize, col: usize) -> Option<&DataValue> {
        self.rows.get(row)?.get(col)
    }

    /// Get a value by row index and column name
    pub fn get_value_by_name(&self, row: usize, col_name: &str) -> Option<&DataValue> {
        let col_idx = self.get_column_index(col_name)?;
        self.get_value(row, col_idx)
    }

    /// Convert to a vector of string vectors (for display/export)
    pub fn to_string_table(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.values.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    /// Flattens a JSON array of record objects into a table.
    ///
    /// The first record fixes the column set and ordering; fields missing
    /// from later records become [`DataValue::Null`] and extra fields are
    /// dropped. A list of scalars collapses into a single `value` column.
    pub fn from_records(name: &str, records: &JsonValue) -> Result<Self> {
        let records = records.as_array().ok_or_else(|| {
            Error::Table(format!(
                "expected a JSON array of records for table '{}'",
                name
            ))
        })?;

        let mut table = DataTable::new(name);

        let first_row = match records.first() {
            Some(first) => first,
            None => return Ok(table),
        };

        if let Some(obj) = first_row.as_object() {
            for key in obj.keys() {
                table.add_column(DataColumn::new(key.clone()));
            }

            for json_row in records {
                let row_obj = json_row.as_object().ok_or_else(|| {
                    Error::Table(format!(
                        "record list for table '{}' mixes objects and scalars",
                        name
                    ))
                })?;

                let values = table
                    .columns
                    .iter()
                    .map(|column| {
                        row_obj
                            .get(&column.name)
                            .map(json_value_to_data_value)
                            .unwrap_or(DataValue::Null)
                    })
                    .collect();

                table.add_row(DataRow::new(values))?;
            }
        } else {
            table.add_column(DataColumn::new("value"));
            for json_value in records {
                let value = json_value_to_data_value(json_value);
                table.add_row(DataRow::new(vec![value]))?;
            }
        }

        table.infer_column_types();

        debug!(
            target: "table",
            "flattened {} records into '{}' ({} columns)",
            table.row_count(),
            table.name,
            table.column_count()
        );

        Ok(table)
    }

    /// Flattens the SSD/CNEOS response shape into a table.
    ///
    /// Those services answer `{"signature": .., "count": .., "fields":
    /// [..], "data": [[..], ..]}`; each inner array becomes one row under
    /// the declared field names. Count and signature details are kept in
    /// the table metadata.
    pub fn from_fields_and_rows(name: &str, response: &JsonValue) -> Result<Self> {
        let fields = response
            .get("fields")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| {
                Error::Table(format!(
                    "response for table '{}' has no 'fields' array",
                    name
                ))
            })?;
        let data = response
            .get("data")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| {
                Error::Table(format!("response for table '{}' has no 'data' array", name))
            })?;

        let mut table = DataTable::new(name);

        for field in fields {
            let field = field.as_str().ok_or_else(|| {
                Error::Table(format!("non-string field name in table '{}'", name))
            })?;
            table.add_column(DataColumn::new(field));
        }

        for json_row in data {
            let cells = json_row.as_array().ok_or_else(|| {
                Error::Table(format!("non-array data row in table '{}'", name))
            })?;

            let values = (0..table.columns.len())
                .map(|i| {
                    cells
                        .get(i)
                        .map(json_value_to_data_value)
                        .unwrap_or(DataValue::Null)
                })
                .collect();

            table.add_row(DataRow::new(values))?;
        }

        table.infer_column_types();

        if let Some(count) = response.get("count") {
            // count arrives as a string in some API versions and a number
            // in others
            let count = match count {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            table.metadata.insert("count".to_string(), count);
        }
        if let Some(signature) = response.get("signature").and_then(JsonValue::as_object) {
            for (key, value) in signature {
                if let Some(value) = value.as_str() {
                    table.metadata.insert(key.clone(), value.to_string());
                }
            }
        }

        debug!(
            target: "table",
            "flattened {} data rows into '{}' ({} columns)",
            table.row_count(),
            table.name,
            table.column_count()
        );

        Ok(table)
    }

    /// Get a single row as strings
    pub fn get_row_as_strings(&self, index: usize) -> Option<Vec<String>> {
        self.rows
            .get(index)
            .map(|row| row.values.iter().map(|value| value.to_string()).collect())
    }
}

/// Helper function to convert a JSON value to a DataValue
fn json_value_to_data_value(json: &JsonValue) -> DataValue {
    match json {
        JsonValue::Null => DataValue::Null,
        JsonValue::Bool(b) => DataValue::Boolean(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                DataValue::Float(f)
            } else {
                DataValue::String(n.to_string())
            }
        }
        JsonValue::String(s) => {
            if looks_like_datetime(s) {
                DataValue::DateTime(s.clone())
            } else {
                DataValue::String(s.clone())
            }
        }
        // Nested structures stay as their JSON text; the rovers and DONKI
        // embed whole sub-objects in otherwise flat records.
        JsonValue::Array(_) | JsonValue::Object(_) => DataValue::String(json.to_string()),
    }
}

// Matches the date-ish strings the APIs emit ("2019-01-01",
// "2019-05-06T05:04Z") without attempting a full parse.
fn looks_like_datetime(s: &str) -> bool {
    s.len() >= 8
        && s.len() <= 30
        && s.contains('-')
        && s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

impl DataProvider for DataTable {
    fn get_row(&self, index: usize) -> Option<Vec<String>> {
        self.get_row_as_strings(index)
    }

    fn get_column_names(&self) -> Vec<String> {
        self.column_names()
    }

    fn get_row_count(&self) -> usize {
        self.row_count()
    }

    fn get_column_count(&self) -> usize {
        self.column_count()
    }
}
