use diet_types::TextError;

#[derive(Debug, thiserror::Error)]
pub enum DietError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] TextError),
    #[error("failed to read parser config: {0}")]
    ConfigRead(std::io::Error),
    #[error("invalid parser config: {0}")]
    ConfigParse(String),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type DietResult<T> = std::result::Result<T, DietError>;
