//! Editor session use-cases.
//!
//! # Responsibility
//! - Prepare the initial document of a new editing session.
//! - Route saves through migration before they reach the store.
//! - Map storage failures to user-facing save messages.
//!
//! # Invariants
//! - Data handed to the store never contains legacy elements.
//! - Preparing a new résumé never fails and never writes.

use crate::migrate::migrate_resume_data;
use crate::model::resume::{ResumeData, StoredResume};
use crate::storage::{Clock, KeyValueStore, ResumeStore, StorageError, StorageResult, SystemClock};
use crate::template::{ExportFileImporter, ResumeImporter, TemplateLoader, TemplateSource};
use log::warn;

/// Message shown when a save is rejected for lack of storage space.
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "Save failed: local storage is full. Delete some older resumes, or export them as JSON and clear storage.";

pub struct ResumeService<K, T, C = SystemClock, I = ExportFileImporter>
where
    K: KeyValueStore,
    T: TemplateSource,
    C: Clock,
    I: ResumeImporter,
{
    store: ResumeStore<K, C>,
    templates: TemplateLoader<T, I>,
}

impl<K, T, C, I> ResumeService<K, T, C, I>
where
    K: KeyValueStore,
    T: TemplateSource,
    C: Clock,
    I: ResumeImporter,
{
    pub fn new(store: ResumeStore<K, C>, templates: TemplateLoader<T, I>) -> Self {
        Self { store, templates }
    }

    pub fn store(&self) -> &ResumeStore<K, C> {
        &self.store
    }

    /// Builds the starting document for a new editing session.
    ///
    /// # Contract
    /// - `clone_id` naming an existing record yields a copy of its data,
    ///   migrated and unsaved.
    /// - Otherwise the example (`use_example`) or default template is used,
    ///   falling back to `ResumeData::default()`.
    /// - Template-based documents without avatar get the configured default.
    pub fn prepare_new_resume(&self, clone_id: Option<&str>, use_example: bool) -> ResumeData {
        if let Some(clone_id) = clone_id {
            match self.store.get_resume_by_id(clone_id) {
                Ok(Some(entry)) => return migrate_resume_data(entry.resume_data),
                Ok(None) => {}
                Err(err) => warn!(
                    "event=resume_prepare module=service status=degraded stage=clone error_code={}",
                    err.code
                ),
            }
        }

        let template = if use_example {
            self.templates.load_example_template()
        } else {
            self.templates.load_default_template()
        };
        let mut base = template.unwrap_or_default();
        if base.avatar.as_deref().map_or(true, str::is_empty) {
            base.avatar = Some(self.templates.config().default_avatar.clone());
        }
        base
    }

    /// Lists stored records, most recent first.
    pub fn list_resumes(&self) -> StorageResult<Vec<StoredResume>> {
        self.store.get_all_resumes()
    }

    /// Loads one record for editing, with its data migrated.
    pub fn open_resume(&self, id: &str) -> StorageResult<Option<StoredResume>> {
        Ok(self.store.get_resume_by_id(id)?.map(|entry| StoredResume {
            resume_data: migrate_resume_data(entry.resume_data),
            ..entry
        }))
    }

    /// Persists a new record for the edited document.
    pub fn save_new(&self, data: ResumeData) -> StorageResult<StoredResume> {
        self.store.create_entry_from_data(migrate_resume_data(data))
    }

    /// Persists the edited document over an existing record.
    pub fn save_existing(&self, id: &str, data: ResumeData) -> StorageResult<StoredResume> {
        self.store.update_entry_data(id, migrate_resume_data(data))
    }

    pub fn delete_resumes(&self, ids: &[String]) -> StorageResult<()> {
        self.store.delete_resumes(ids)
    }
}

/// Interprets the `example` query flag (`1` or `true`).
pub fn parse_example_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// User-facing description of a failed save.
pub fn save_failure_message(err: &StorageError) -> String {
    if err.is_quota_exceeded() {
        QUOTA_EXCEEDED_MESSAGE.to_string()
    } else {
        format!("Save failed: {}", err.message)
    }
}
