use thiserror::Error;

/// Failure to obtain a usable dataset from a data source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Unknown {field} value in {entity} {id}: {value}")]
    UnknownValue {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Why a catalog cannot be handed out yet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Entity store is still loading")]
    Loading,

    #[error("Entity store failed to load: {0}")]
    LoadFailed(String),
}
