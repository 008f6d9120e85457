use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkgateError {
    Validation(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    StorageConnection(String),
    StorageOperation(String),
    Serialization(String),
    Config(String),
}

impl LinkgateError {
    pub fn code(&self) -> &'static str {
        match self {
            LinkgateError::Validation(_) => "E001",
            LinkgateError::Unauthorized(_) => "E002",
            LinkgateError::Forbidden(_) => "E003",
            LinkgateError::NotFound(_) => "E004",
            LinkgateError::Conflict(_) => "E005",
            LinkgateError::StorageConnection(_) => "E006",
            LinkgateError::StorageOperation(_) => "E007",
            LinkgateError::Serialization(_) => "E008",
            LinkgateError::Config(_) => "E009",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LinkgateError::Validation(_) => "Validation Error",
            LinkgateError::Unauthorized(_) => "Unauthorized",
            LinkgateError::Forbidden(_) => "Forbidden",
            LinkgateError::NotFound(_) => "Resource Not Found",
            LinkgateError::Conflict(_) => "Conflict",
            LinkgateError::StorageConnection(_) => "Storage Connection Error",
            LinkgateError::StorageOperation(_) => "Storage Operation Error",
            LinkgateError::Serialization(_) => "Serialization Error",
            LinkgateError::Config(_) => "Configuration Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LinkgateError::Validation(msg)
            | LinkgateError::Unauthorized(msg)
            | LinkgateError::Forbidden(msg)
            | LinkgateError::NotFound(msg)
            | LinkgateError::Conflict(msg)
            | LinkgateError::StorageConnection(msg)
            | LinkgateError::StorageOperation(msg)
            | LinkgateError::Serialization(msg)
            | LinkgateError::Config(msg) => msg,
        }
    }

    /// HTTP status this error maps to when it reaches an API handler.
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkgateError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkgateError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkgateError::Forbidden(_) => StatusCode::FORBIDDEN,
            LinkgateError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkgateError::Conflict(_) => StatusCode::CONFLICT,
            LinkgateError::StorageConnection(_)
            | LinkgateError::StorageOperation(_)
            | LinkgateError::Serialization(_)
            | LinkgateError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for LinkgateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LinkgateError {}

impl LinkgateError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Validation(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Forbidden(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkgateError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Conflict(msg.into())
    }

    pub fn storage_connection<T: Into<String>>(msg: T) -> Self {
        LinkgateError::StorageConnection(msg.into())
    }

    pub fn storage_operation<T: Into<String>>(msg: T) -> Self {
        LinkgateError::StorageOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkgateError::Config(msg.into())
    }
}

impl From<std::io::Error> for LinkgateError {
    fn from(err: std::io::Error) -> Self {
        LinkgateError::StorageOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkgateError {
    fn from(err: serde_json::Error) -> Self {
        LinkgateError::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for LinkgateError {
    fn from(err: redis::RedisError) -> Self {
        LinkgateError::StorageOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkgateError>;
