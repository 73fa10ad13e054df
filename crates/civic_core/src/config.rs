use crate::db::SqliteSource;
use crate::fixture;
use crate::source::{DataSource, JsonFileSource, YamlFileSource};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "civic.toml";
pub const DEFAULT_LOG_FILTER: &str = "civic_core=info,civic=info";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CivicConfig {
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Json,
    Yaml,
    Sqlite,
    #[default]
    Fixture,
}

impl SourceKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "json" => Ok(SourceKind::Json),
            "yaml" | "yml" => Ok(SourceKind::Yaml),
            "sqlite" => Ok(SourceKind::Sqlite),
            "fixture" => Ok(SourceKind::Fixture),
            _ => Err(anyhow!("Unknown source kind: {value}")),
        }
    }
}

impl CivicConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: CivicConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

impl SourceConfig {
    /// Builds the data source this config names.
    pub fn open(&self) -> Result<Box<dyn DataSource>> {
        let path = || {
            self.path
                .clone()
                .ok_or_else(|| anyhow!("source kind {:?} needs a path", self.kind))
        };
        let source: Box<dyn DataSource> = match self.kind {
            SourceKind::Json => Box::new(JsonFileSource::new(path()?)),
            SourceKind::Yaml => Box::new(YamlFileSource::new(path()?)),
            SourceKind::Sqlite => Box::new(SqliteSource::new(path()?)),
            SourceKind::Fixture => Box::new(fixture::sample_source()),
        };
        Ok(source)
    }
}
