//! Store and template configuration.

/// Default key holding the serialized résumé list.
pub const RESUME_STORAGE_KEY: &str = "resume_entries";
pub const DEFAULT_TEMPLATE_PATH: &str = "/template.json";
pub const EXAMPLE_TEMPLATE_PATH: &str = "/example.json";
pub const DEFAULT_AVATAR: &str = "/default-avatar.jpg";

/// How the store treats stored content that cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Corrupt content reads as an empty list and a warning is logged.
    #[default]
    Lenient,
    /// Corrupt content fails with `StorageErrorCode::ParseError`.
    Strict,
}

/// Identifier scheme for newly created records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random UUID v4.
    #[default]
    Uuid,
    /// `{epoch_millis}-{8 base36 chars}`. Weaker collision resistance; only
    /// suitable for a single-user local store.
    TimestampRandom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub read_policy: ReadPolicy,
    pub id_strategy: IdStrategy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: RESUME_STORAGE_KEY.to_string(),
            read_policy: ReadPolicy::default(),
            id_strategy: IdStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub default_path: String,
    pub example_path: String,
    /// Avatar assigned to new résumés that have none.
    pub default_avatar: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            default_path: DEFAULT_TEMPLATE_PATH.to_string(),
            example_path: EXAMPLE_TEMPLATE_PATH.to_string(),
            default_avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}
