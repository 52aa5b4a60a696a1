use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    VersionControlUnavailable,
    PersistedFileCorrupt,
    FileSystemError,
    ConfigurationInvalid,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VersionControlUnavailable => "VERSION_CONTROL_UNAVAILABLE",
            Self::PersistedFileCorrupt => "PERSISTED_FILE_CORRUPT",
            Self::FileSystemError => "FILE_SYSTEM_ERROR",
            Self::ConfigurationInvalid => "CONFIGURATION_INVALID",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct VersionError {
    pub code: ErrorCode,
    pub message: String,
}

impl VersionError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn vcs_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::VersionControlUnavailable, message)
    }

    pub fn corrupt(path: &str, detail: &str) -> Self {
        Self::new(
            ErrorCode::PersistedFileCorrupt,
            format!("Cannot read version properties from {path}: {detail}"),
        )
    }

    pub fn file_system(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FileSystemError, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationInvalid, message)
    }
}

impl From<std::io::Error> for VersionError {
    fn from(e: std::io::Error) -> Self {
        Self::file_system(e.to_string())
    }
}

impl From<serde_json::Error> for VersionError {
    fn from(e: serde_json::Error) -> Self {
        Self::configuration(e.to_string())
    }
}
