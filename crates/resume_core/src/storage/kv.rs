//! Key-value backend contract.
//!
//! Backends mimic browser-local storage: string keys, string values,
//! whole-value replacement, and platform-specific write failure signals.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error name reported by browsers when storage capacity is exhausted.
pub const QUOTA_EXCEEDED_NAME: &str = "QuotaExceededError";
/// Legacy numeric quota code (WebKit).
pub const QUOTA_EXCEEDED_CODE: i64 = 22;
/// Numeric quota code reported by Gecko (`NS_ERROR_DOM_QUOTA_REACHED`).
pub const QUOTA_REACHED_CODE: i64 = 1014;

pub type KvResult<T> = Result<T, KvError>;

/// Backend failure for key-value operations.
#[derive(Debug)]
pub enum KvError {
    /// No storage is reachable from the current environment.
    Unavailable,
    /// The backend rejected an operation.
    ///
    /// `name` and `code` carry the platform signals used for quota detection.
    Rejected {
        name: Option<String>,
        code: Option<i64>,
        message: String,
    },
}

impl KvError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            name: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::Rejected {
            name: Some(QUOTA_EXCEEDED_NAME.to_string()),
            code: Some(QUOTA_EXCEEDED_CODE),
            message: message.into(),
        }
    }

    /// Returns whether the failure carries any known quota signal.
    pub fn is_quota_signal(&self) -> bool {
        match self {
            Self::Unavailable => false,
            Self::Rejected { name, code, .. } => {
                name.as_deref() == Some(QUOTA_EXCEEDED_NAME)
                    || matches!(code, Some(QUOTA_EXCEEDED_CODE) | Some(QUOTA_REACHED_CODE))
            }
        }
    }
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "key-value storage is unavailable"),
            Self::Rejected { name, message, .. } => match name {
                Some(name) => write!(f, "{name}: {message}"),
                None => write!(f, "{message}"),
            },
        }
    }
}

impl Error for KvError {}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DiskFull) => Self::quota_exceeded(value.to_string()),
            _ => Self::rejected(value.to_string()),
        }
    }
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> KvResult<()>;
    fn remove_item(&self, key: &str) -> KvResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}

/// Backend for contexts without local storage (e.g. server-side rendering).
///
/// Every operation fails with `KvError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> KvResult<Option<String>> {
        Err(KvError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(KvError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> KvResult<()> {
        Err(KvError::Unavailable)
    }
}
