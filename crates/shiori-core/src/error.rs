use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The source document lacks a usable identity key, or is not an object.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
