use thiserror::Error;

#[derive(Error, Debug)]
pub enum MakerboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Vote store error: {0}")]
    Store(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MakerboardError>;
