#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid metadata record: {0}")]
    InvalidRecord(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
