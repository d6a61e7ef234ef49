use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("configuration file not found in '{0}'")]
    NotFound(PathBuf),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Raised while building a [`Query`](crate::query::Query) from a filter
/// document. Matching itself never fails; bad filter shapes are rejected
/// up front instead of silently matching nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unsupported query operator '{0}'")]
    UnsupportedOperator(String),
    #[error("operator '{op}' expects {expected}")]
    MalformedOperand { op: String, expected: &'static str },
    #[error("condition for '{0}' mixes operators with literal fields")]
    MixedCondition(String),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Query(#[from] QueryError),

    // External errors
    #[error(transparent)]
    BsonSer(#[from] bson::ser::Error),
    #[error(transparent)]
    BsonDe(#[from] bson::de::Error),
}
