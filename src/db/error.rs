use thiserror::Error;

/// Errors that can occur while establishing the database connection
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Connection failed: {0}")]
    Failed(String),
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),
}

pub type Result<T> = std::result::Result<T, ConnectionError>;
