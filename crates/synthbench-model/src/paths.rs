use crate::{CatalogGroup, DatasetName};
use std::path::{Path, PathBuf};

pub const EDGE_FILE_SUFFIX: &str = "-edge.json";
pub const RANDOM_FILE_SUFFIX: &str = "-random.json";

/// The local file pair a dataset occupies under a cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    pub edge: PathBuf,
    pub random: PathBuf,
}

#[must_use]
pub fn edge_file_name(dataset: &DatasetName) -> String {
    format!("{}{}", dataset.as_str(), EDGE_FILE_SUFFIX)
}

#[must_use]
pub fn random_file_name(dataset: &DatasetName) -> String {
    format!("{}{}", dataset.as_str(), RANDOM_FILE_SUFFIX)
}

#[must_use]
pub fn dataset_dir(root: &Path, dataset: &DatasetName) -> PathBuf {
    root.join(dataset.as_str())
}

#[must_use]
pub fn dataset_local_files(root: &Path, dataset: &DatasetName) -> DatasetFiles {
    let dir = dataset_dir(root, dataset);
    DatasetFiles {
        edge: dir.join(edge_file_name(dataset)),
        random: dir.join(random_file_name(dataset)),
    }
}

#[must_use]
pub fn dataset_edge_key(group: CatalogGroup, dataset: &DatasetName) -> String {
    format!(
        "{}/datasets/{}/{}",
        group.as_str(),
        dataset.as_str(),
        edge_file_name(dataset)
    )
}

#[must_use]
pub fn dataset_random_key(group: CatalogGroup, dataset: &DatasetName) -> String {
    format!(
        "{}/datasets/{}/{}",
        group.as_str(),
        dataset.as_str(),
        random_file_name(dataset)
    )
}
