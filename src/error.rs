use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{command} failed: {stderr} {stdout}")]
    Subprocess {
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("failed to persist authz file: {0}")]
    Persist(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
