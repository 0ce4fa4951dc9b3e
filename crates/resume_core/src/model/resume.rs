//! Résumé aggregate model.
//!
//! # Responsibility
//! - Define `ResumeData` and its module/row/element hierarchy.
//! - Represent both element shapes (current tree, legacy segments) as one
//!   explicit tagged union.
//! - Define the persisted `StoredResume` envelope.
//!
//! # Invariants
//! - Unknown wire fields on containers survive a read/write round-trip.
//! - `updated_at` only moves forward for a persisted record.
//! - Legacy elements are never produced by core code, only read.

use crate::model::document::JsonContent;
use crate::model::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of a persisted résumé record.
pub type ResumeId = String;

/// Full résumé document as edited and previewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub title: String,
    /// Renders the title centered instead of left-aligned.
    #[serde(default)]
    pub center_title: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_intention_section: Option<InfoSection>,
    #[serde(default)]
    pub personal_info_section: InfoSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "timestamp::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeData {
    /// Creates an empty résumé with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            center_title: false,
            job_intention_section: None,
            personal_info_section: InfoSection::default(),
            avatar: None,
            modules: Vec::new(),
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Iterates every content element across all modules and rows.
    pub fn elements(&self) -> impl Iterator<Item = &ContentElement> {
        self.modules
            .iter()
            .flat_map(|module| module.rows.iter())
            .flat_map(|row| row.elements.iter())
    }
}

impl Default for ResumeData {
    /// Starter document used when no template is reachable.
    fn default() -> Self {
        let mut data = Self::new("My Resume");
        data.personal_info_section = InfoSection {
            items: ["Name", "Phone", "Email"]
                .iter()
                .enumerate()
                .map(|(idx, label)| InfoItem::new(format!("info-{}", idx + 1), *label, ""))
                .collect(),
            extra: Map::new(),
        };
        data.modules = vec![Module {
            id: "module-1".to_string(),
            title: "Experience".to_string(),
            icon: None,
            rows: vec![Row {
                id: "row-1".to_string(),
                columns: 1,
                elements: vec![ContentElement::Current(ModuleContentElement::empty(
                    "element-1",
                    0,
                ))],
                extra: Map::new(),
            }],
            extra: Map::new(),
        }];
        data
    }
}

/// Labelled key/value section (personal info, job intention).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoSection {
    #[serde(default)]
    pub items: Vec<InfoItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoItem {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InfoItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: value.into(),
            icon: None,
            extra: Map::new(),
        }
    }
}

/// Named résumé section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Horizontal band of a module; elements are placed by column index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default)]
    pub elements: Vec<ContentElement>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_columns() -> u32 {
    1
}

/// Content element in either supported shape.
///
/// The wire format carries no version tag; the legacy shape is recognised by a
/// `segments` array, which is why `Legacy` is tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentElement {
    Legacy(LegacyModuleContentElement),
    Current(ModuleContentElement),
}

impl ContentElement {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Legacy(element) => &element.id,
            Self::Current(element) => &element.id,
        }
    }

    pub fn column_index(&self) -> u32 {
        match self {
            Self::Legacy(element) => element.column_index,
            Self::Current(element) => element.column_index,
        }
    }
}

impl From<ModuleContentElement> for ContentElement {
    fn from(value: ModuleContentElement) -> Self {
        Self::Current(value)
    }
}

/// Current element format: one rich-text tree per element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleContentElement {
    pub id: String,
    pub content: JsonContent,
    #[serde(default)]
    pub column_index: u32,
}

impl ModuleContentElement {
    /// Creates an element holding the canonical empty document.
    pub fn empty(id: impl Into<String>, column_index: u32) -> Self {
        Self {
            id: id.into(),
            content: JsonContent::empty_doc(),
            column_index,
        }
    }
}

/// Deprecated element format with flat styled text runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyModuleContentElement {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: LegacyElementKind,
    pub segments: Vec<LegacyTextSegment>,
    #[serde(default)]
    pub column_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegacyElementKind {
    #[default]
    Text,
    BulletList,
    NumberedList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// One flat text run of a legacy element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyTextSegment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: LegacySegmentStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySegmentStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Point size; rendered as `"{n}pt"` after migration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bold: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub italic: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub underline: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: bool,
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Persisted record wrapping one résumé with its own identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub id: ResumeId,
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::required")]
    pub updated_at: DateTime<Utc>,
    pub resume_data: ResumeData,
}
