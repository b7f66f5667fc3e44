use crate::{StoreError, StoreErrorCode};
use serde_json::Value;
use std::fs;
use std::path::Path;
use synthbench_model::{dataset_local_files, CaseTable, DatasetName};

/// Boolean provenance column added to every merged row.
pub const EDGE_CASE_COLUMN: &str = "edge_case";

/// Read a dataset's two source files and merge them into one table.
///
/// Edge rows come first, tagged `edge_case = true`; random rows follow,
/// tagged `false`. A column mismatch between the two files widens the merged
/// column set, with absent cells reading as null.
pub fn read_edge_and_random(root: &Path, dataset: &DatasetName) -> Result<CaseTable, StoreError> {
    let files = dataset_local_files(root, dataset);
    let edge = read_case_file(&files.edge)?.with_column(EDGE_CASE_COLUMN, Value::Bool(true));
    let random = read_case_file(&files.random)?.with_column(EDGE_CASE_COLUMN, Value::Bool(false));
    Ok(edge.concat(random))
}

fn read_case_file(path: &Path) -> Result<CaseTable, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        StoreError::new(
            StoreErrorCode::Io,
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    CaseTable::from_ndjson(&raw)
        .map_err(|e| StoreError::new(StoreErrorCode::Parse, format!("{}: {e}", path.display())))
}
