//! Core domain logic for the résumé editor.
//! This crate is the single source of truth for document invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod migrate;
pub mod model;
pub mod service;
pub mod storage;
pub mod template;

pub use config::{IdStrategy, ReadPolicy, StoreConfig, TemplateConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use migrate::{migrate_element, migrate_resume_data, needs_migration};
pub use model::document::{JsonContent, Mark};
pub use model::resume::{
    ContentElement, InfoItem, InfoSection, LegacyModuleContentElement, Module,
    ModuleContentElement, ResumeData, ResumeId, Row, StoredResume,
};
pub use model::validation::{validate_resume_data, ValidationReport};
pub use service::resume_service::{save_failure_message, ResumeService};
pub use storage::{
    KeyValueStore, MemoryStore, ResumeStore, SqliteKeyValueStore, StorageError,
    StorageErrorCode, StorageResult,
};
pub use template::{DirTemplateSource, ExportFileImporter, StaticTemplateSource, TemplateLoader};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
