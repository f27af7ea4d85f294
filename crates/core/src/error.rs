use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PropscopeError>;
