//! Storage error taxonomy.

use super::kv::KvError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Sub-code carried by every `StorageError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// No local storage is reachable from this environment.
    Unavailable,
    /// Stored content is present but cannot be decoded.
    ParseError,
    /// The backend rejected a write for lack of capacity.
    QuotaExceeded,
    /// Validation failures and any other backend failure.
    Unknown,
}

impl StorageErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "UNAVAILABLE",
            Self::ParseError => "PARSE_ERROR",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Display for StorageErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single error kind surfaced by the résumé store.
#[derive(Debug)]
pub struct StorageError {
    pub code: StorageErrorCode,
    pub message: String,
    source: Option<KvError>,
}

impl StorageError {
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Generic failure (`UNKNOWN`), used for not-found and validation errors.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::Unknown, message)
    }

    /// Validation failure listing every error message.
    pub fn validation(errors: &[String]) -> Self {
        Self::unknown(format!("resume data validation failed: {}", errors.join("; ")))
    }

    /// Maps a backend failure on the read path.
    pub(crate) fn from_read(err: KvError) -> Self {
        let (code, message) = match &err {
            KvError::Unavailable => (
                StorageErrorCode::Unavailable,
                "local storage is only reachable from a client environment",
            ),
            KvError::Rejected { .. } => (StorageErrorCode::Unknown, "failed to read local storage"),
        };
        Self::new(code, message).with_source(err)
    }

    /// Maps a backend failure on the write path, detecting quota signals.
    pub(crate) fn from_write(err: KvError) -> Self {
        let (code, message) = if err.is_quota_signal() {
            (StorageErrorCode::QuotaExceeded, "local storage is full")
        } else if matches!(err, KvError::Unavailable) {
            (
                StorageErrorCode::Unavailable,
                "local storage is only reachable from a client environment",
            )
        } else {
            (StorageErrorCode::Unknown, "failed to write local storage")
        };
        Self::new(code, message).with_source(err)
    }

    fn with_source(mut self, source: KvError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.code == StorageErrorCode::QuotaExceeded
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}
