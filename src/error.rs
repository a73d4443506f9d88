use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlRowMapperError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    /// Error raised by a third-party driver, passed through untouched.
    #[error(transparent)]
    Driver(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid operation: the connection has been disposed")]
    Disposed,

    #[error("Cannot convert column `{column}` holding {found} into {target}")]
    ConversionError {
        column: String,
        target: &'static str,
        found: &'static str,
    },

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqlRowMapperError {
    /// Wrap an error produced by a driver so it reaches the caller unchanged.
    pub fn driver<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SqlRowMapperError::Driver(Box::new(err))
    }

    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(self, SqlRowMapperError::InvalidArgument(_))
    }

    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, SqlRowMapperError::Disposed)
    }

    #[must_use]
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, SqlRowMapperError::ConversionError { .. })
    }

    /// True for anything raised by the driver rather than by the mapper itself.
    #[must_use]
    pub fn is_driver_error(&self) -> bool {
        match self {
            #[cfg(feature = "sqlite")]
            SqlRowMapperError::SqliteError(_) => true,
            SqlRowMapperError::Driver(_)
            | SqlRowMapperError::ConfigError(_)
            | SqlRowMapperError::ConnectionError(_)
            | SqlRowMapperError::ExecutionError(_) => true,
            SqlRowMapperError::InvalidArgument(_)
            | SqlRowMapperError::Disposed
            | SqlRowMapperError::ConversionError { .. }
            | SqlRowMapperError::MissingColumn(_) => false,
        }
    }
}
