use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortraitError {
    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PortraitError>;
