use crate::error::LoadError;
use crate::schema::Dataset;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Delivers the three collections in one call.
///
/// Implementations decide where the data lives. A failure must come back as
/// an error; returning an empty `Dataset` means "zero entities", not "failed".
pub trait DataSource {
    fn fetch_all(&self) -> Result<Dataset, LoadError>;

    /// Short label used in logs.
    fn describe(&self) -> String;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch_all(&self) -> Result<Dataset, LoadError> {
        (**self).fetch_all()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn fetch_all(&self) -> Result<Dataset, LoadError> {
        (**self).fetch_all()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A dataset already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DataSource for StaticSource {
    fn fetch_all(&self) -> Result<Dataset, LoadError> {
        Ok(self.dataset.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// A single JSON document shaped `{ "proposals": [], "deputies": [], "votes": [] }`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for JsonFileSource {
    fn fetch_all(&self) -> Result<Dataset, LoadError> {
        let raw = read_source(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// Same document shape as [`JsonFileSource`], written as YAML.
#[derive(Debug, Clone)]
pub struct YamlFileSource {
    path: PathBuf,
}

impl YamlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for YamlFileSource {
    fn fetch_all(&self) -> Result<Dataset, LoadError> {
        let raw = read_source(&self.path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        format!("yaml:{}", self.path.display())
    }
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    debug!(path = %path.display(), "reading data source");
    Ok(fs::read_to_string(path)?)
}
