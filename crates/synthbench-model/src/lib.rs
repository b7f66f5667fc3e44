#![forbid(unsafe_code)]
//! Dataset model SSOT for the synthbench workspace.

mod catalog;
mod dataset;
mod paths;
mod table;

pub use catalog::{
    all_problems, catalog_group, is_known_problem, CatalogGroup, PSB1_PROBLEMS, PSB2_PROBLEMS,
};
pub use dataset::{parse_dataset_name, DatasetName, ValidationError, DATASET_NAME_MAX_LEN};
pub use paths::{
    dataset_dir, dataset_edge_key, dataset_local_files, dataset_random_key, edge_file_name,
    random_file_name, DatasetFiles, EDGE_FILE_SUFFIX, RANDOM_FILE_SUFFIX,
};
pub use table::{CaseRecord, CaseTable};

pub const CRATE_NAME: &str = "synthbench-model";
