use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid object id: {0}")]
    InvalidId(#[from] digi_types::TypeError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(#[from] digi_store::StoreError),
}

pub type SdkResult<T> = Result<T, SdkError>;
