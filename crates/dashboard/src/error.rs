use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (zero page size, clashing columns, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Export requested over an empty record set.
    #[error("nothing to export: the filtered set is empty")]
    NothingToExport,
}
