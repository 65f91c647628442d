use thiserror::Error;

pub type ScopeResult<T> = Result<T, ScopeError>;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}
