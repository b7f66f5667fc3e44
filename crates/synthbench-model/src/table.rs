// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

/// One labeled training case: column name to cell value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseRecord {
    fields: BTreeMap<String, Value>,
}

impl CaseRecord {
    fn from_object(object: Map<String, Value>) -> Self {
        Self {
            fields: object.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Cell value for `column`; an absent cell reads as explicit JSON null.
    #[must_use]
    pub fn value(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&NULL)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn set(&mut self, column: &str, value: Value) {
        self.fields.insert(column.to_string(), value);
    }

    fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.fields.remove(from) {
            self.fields.insert(to.to_string(), value);
        }
    }
}

/// A row-oriented table of labeled cases with a stable column order.
///
/// Columns are the union of every row's fields in first-seen order. Rows
/// missing a column answer [`Value::Null`] for it; a column mismatch between
/// concatenated tables is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseTable {
    columns: Vec<String>,
    rows: Vec<CaseRecord>,
}

impl CaseTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse newline-delimited JSON objects. Blank lines are skipped; any
    /// other non-object line is a parse error naming the line number.
    pub fn from_ndjson(input: &str) -> Result<Self, ValidationError> {
        let mut table = Self::new();
        for (index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let object: Map<String, Value> = serde_json::from_str(line).map_err(|e| {
                ValidationError(format!("line {}: expected a JSON object: {e}", index + 1))
            })?;
            table.push_record(CaseRecord::from_object(object));
        }
        Ok(table)
    }

    fn push_record(&mut self, record: CaseRecord) {
        for name in record.field_names() {
            if !self.columns.iter().any(|c| c == name) {
                self.columns.push(name.to_string());
            }
        }
        self.rows.push(record);
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    #[must_use]
    pub fn rows(&self) -> &[CaseRecord] {
        &self.rows
    }

    /// Cell at `row`/`column`; out-of-range rows and absent cells read as null.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.rows.get(row).map_or(&NULL, |r| r.value(column))
    }

    /// Assign a constant column to every row, appending it when new.
    ///
    /// The column is recorded even when the table has no rows, so an empty
    /// edge file still contributes its provenance column to a merge.
    #[must_use]
    pub fn with_column(mut self, column: &str, value: Value) -> Self {
        for row in &mut self.rows {
            row.set(column, value.clone());
        }
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
        self
    }

    /// Append `other`'s rows; the column set becomes the union of both.
    #[must_use]
    pub fn concat(mut self, other: CaseTable) -> Self {
        for column in other.columns {
            if !self.has_column(&column) {
                self.columns.push(column);
            }
        }
        self.rows.extend(other.rows);
        self
    }

    /// Rename a column in place. A table without `from` is left untouched:
    /// the rename never invents a column the data does not carry.
    #[must_use]
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        if let Some(slot) = self.columns.iter_mut().find(|c| c.as_str() == from) {
            *slot = to.to_string();
            for row in &mut self.rows {
                row.rename(from, to);
            }
        }
        self
    }

    /// Serialize back to newline-delimited JSON, null-filling each row to the
    /// full column set so every emitted object answers the same schema.
    pub fn to_ndjson(&self) -> Result<String, ValidationError> {
        let mut out = String::new();
        for row in &self.rows {
            let mut object = Map::new();
            for column in &self.columns {
                object.insert(column.clone(), row.value(column).clone());
            }
            let line = serde_json::to_string(&Value::Object(object))
                .map_err(|e| ValidationError(format!("failed to encode row: {e}")))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}
