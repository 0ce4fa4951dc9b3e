//! Conversion of exported résumé files into `ResumeData`.
//!
//! # Invariants
//! - Imported data is always migrated to the current element format.
//! - Imported data always passes `validate_resume_data`.

use crate::migrate::migrate_resume_data;
use crate::model::resume::ResumeData;
use crate::model::validation::validate_resume_data;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Envelope keys that may wrap the exported résumé.
const ENVELOPE_KEYS: &[&str] = &["resumeData", "data"];

#[derive(Debug)]
pub enum ImportError {
    /// Content is not JSON, or not shaped like a résumé.
    Decode(serde_json::Error),
    /// Decoded data failed validation.
    Invalid(Vec<String>),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid resume export: {err}"),
            Self::Invalid(errors) => {
                write!(f, "resume export failed validation: {}", errors.join("; "))
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

pub trait ResumeImporter {
    fn import(&self, content: &str) -> Result<ResumeData, ImportError>;
}

/// Importer for the editor's JSON export format.
///
/// Accepts an envelope (`{"version": …, "resumeData": {…}}`, or `data`
/// instead of `resumeData`) as well as a bare résumé object.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportFileImporter;

impl ResumeImporter for ExportFileImporter {
    fn import(&self, content: &str) -> Result<ResumeData, ImportError> {
        let data = migrate_resume_data(decode_export(content)?);
        let report = validate_resume_data(&data);
        if !report.is_valid {
            return Err(ImportError::Invalid(report.errors));
        }
        Ok(data)
    }
}

/// Decodes an export file as written, without migrating or validating it.
pub fn decode_export(content: &str) -> Result<ResumeData, ImportError> {
    let mut value: Value = serde_json::from_str(content)?;
    let payload = ENVELOPE_KEYS
        .iter()
        .find_map(|key| match value.get_mut(*key) {
            Some(inner) if inner.is_object() => Some(inner.take()),
            _ => None,
        })
        .unwrap_or(value);
    Ok(serde_json::from_value(payload)?)
}
