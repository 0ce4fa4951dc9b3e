//! Save-gating validation for résumé documents.
//!
//! # Responsibility
//! - Collect every structural problem of a `ResumeData` in one pass.
//!
//! # Invariants
//! - Validation never mutates its input.
//! - Any non-empty error list blocks persistence.

use crate::model::document::JsonContent;
use crate::model::resume::{ContentElement, InfoSection, ResumeData};
use std::collections::HashSet;

/// Outcome of validating one résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Human-readable problems in document order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates a résumé and reports all problems found.
pub fn validate_resume_data(data: &ResumeData) -> ValidationReport {
    let mut errors = Vec::new();

    if data.title.trim().is_empty() {
        errors.push("title is required".to_string());
    }

    validate_section(&data.personal_info_section, "personal info", &mut errors);
    if let Some(section) = &data.job_intention_section {
        validate_section(section, "job intention", &mut errors);
    }

    if let (Some(created_at), Some(updated_at)) = (data.created_at, data.updated_at) {
        if updated_at < created_at {
            errors.push("updatedAt is earlier than createdAt".to_string());
        }
    }

    let mut module_ids = HashSet::new();
    let mut element_ids = HashSet::new();
    for (module_idx, module) in data.modules.iter().enumerate() {
        if module.id.trim().is_empty() {
            errors.push(format!("module #{} has an empty id", module_idx + 1));
        } else if !module_ids.insert(module.id.as_str()) {
            errors.push(format!("duplicate module id `{}`", module.id));
        }

        for row in &module.rows {
            if row.columns == 0 {
                errors.push(format!("row `{}` must have at least one column", row.id));
            }
            for element in &row.elements {
                let id = element.id();
                if id.trim().is_empty() {
                    errors.push(format!("module `{}` has an element with an empty id", module.id));
                } else if !element_ids.insert(id) {
                    errors.push(format!("duplicate element id `{id}`"));
                }
                if row.columns > 0 && element.column_index() >= row.columns {
                    errors.push(format!(
                        "element `{id}` column index {} exceeds row `{}` column count {}",
                        element.column_index(),
                        row.id,
                        row.columns
                    ));
                }
                match element {
                    ContentElement::Legacy(_) => {
                        errors.push(format!("element `{id}` uses the legacy segment format"));
                    }
                    ContentElement::Current(current) => {
                        validate_content(id, &current.content, &mut errors);
                    }
                }
            }
        }
    }

    ValidationReport::from_errors(errors)
}

fn validate_section(section: &InfoSection, name: &str, errors: &mut Vec<String>) {
    for (idx, item) in section.items.iter().enumerate() {
        if item.id.trim().is_empty() {
            errors.push(format!("{name} item #{} has an empty id", idx + 1));
        }
    }
}

fn validate_content(element_id: &str, content: &JsonContent, errors: &mut Vec<String>) {
    if !content.is_doc() {
        errors.push(format!(
            "element `{element_id}` content root must be `doc`, got `{}`",
            content.kind
        ));
    }
    let mut has_empty_text = false;
    content.walk(&mut |node| {
        if node.is_text() && node.text.as_deref().map_or(true, str::is_empty) {
            has_empty_text = true;
        }
    });
    if has_empty_text {
        errors.push(format!("element `{element_id}` contains an empty text node"));
    }
}
