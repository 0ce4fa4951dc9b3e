//! Legacy element migration.
//!
//! # Responsibility
//! - Convert flat styled-segment elements into the document tree format.
//! - Leave current-format elements untouched.
//!
//! # Invariants
//! - Migration is idempotent: current data maps to a value-equal result.
//! - After `migrate_resume_data`, `needs_migration` is false.
//! - Empty segments never become text nodes.

use crate::model::document::{
    Attrs, JsonContent, Mark, MARK_BOLD, MARK_CODE, MARK_ITALIC, MARK_TEXT_STYLE, MARK_UNDERLINE,
};
use crate::model::resume::{
    ContentElement, LegacyModuleContentElement, LegacySegmentStyle, LegacyTextSegment,
    ModuleContentElement, ResumeData,
};
use log::debug;
use serde_json::Value;

/// Returns whether any element of the résumé still uses the legacy format.
pub fn needs_migration(data: &ResumeData) -> bool {
    data.elements().any(ContentElement::is_legacy)
}

/// Converts one element into the current format.
///
/// Current-format elements are returned as-is.
pub fn migrate_element(element: ContentElement) -> ModuleContentElement {
    match element {
        ContentElement::Current(element) => element,
        ContentElement::Legacy(legacy) => migrate_legacy(legacy),
    }
}

/// Migrates every element of every row of every module.
pub fn migrate_resume_data(data: ResumeData) -> ResumeData {
    let mut migrated_count = 0_usize;
    let modules = data
        .modules
        .into_iter()
        .map(|mut module| {
            module.rows = module
                .rows
                .into_iter()
                .map(|mut row| {
                    row.elements = row
                        .elements
                        .into_iter()
                        .map(|element| {
                            if element.is_legacy() {
                                migrated_count += 1;
                            }
                            ContentElement::Current(migrate_element(element))
                        })
                        .collect();
                    row
                })
                .collect();
            module
        })
        .collect();

    if migrated_count > 0 {
        debug!("event=resume_migrate module=migrate status=ok migrated_elements={migrated_count}");
    }

    ResumeData { modules, ..data }
}

fn migrate_legacy(legacy: LegacyModuleContentElement) -> ModuleContentElement {
    let mut content = segments_to_document(&legacy.segments);

    if let Some(align) = legacy.align {
        if let Some(first_block) = content.content.as_mut().and_then(|blocks| blocks.first_mut()) {
            first_block.set_attr("textAlign", Value::String(align.as_str().to_string()));
        }
    }

    ModuleContentElement {
        id: legacy.id,
        content,
        column_index: legacy.column_index,
    }
}

fn segments_to_document(segments: &[LegacyTextSegment]) -> JsonContent {
    let text_nodes = segments
        .iter()
        .filter(|segment| !segment.text.is_empty())
        .map(|segment| JsonContent::text_node(segment.text.clone(), style_to_marks(&segment.style)))
        .collect();

    JsonContent::doc(vec![JsonContent::paragraph(text_nodes)])
}

fn style_to_marks(style: &LegacySegmentStyle) -> Vec<Mark> {
    let mut marks = Vec::new();
    for (enabled, kind) in [
        (style.bold, MARK_BOLD),
        (style.italic, MARK_ITALIC),
        (style.underline, MARK_UNDERLINE),
        (style.code, MARK_CODE),
    ] {
        if enabled {
            marks.push(Mark::simple(kind));
        }
    }

    let mut attrs = Attrs::new();
    if let Some(color) = style.color.as_deref().filter(|value| !value.is_empty()) {
        attrs.insert("color".to_string(), Value::String(color.to_string()));
    }
    if let Some(family) = style.font_family.as_deref().filter(|value| !value.is_empty()) {
        attrs.insert("fontFamily".to_string(), Value::String(family.to_string()));
    }
    if let Some(size) = style.font_size.filter(|size| *size != 0.0 && !size.is_nan()) {
        attrs.insert("fontSize".to_string(), Value::String(format!("{size}pt")));
    }
    if !attrs.is_empty() {
        marks.push(Mark::with_attrs(MARK_TEXT_STYLE, attrs));
    }

    marks
}

#[cfg(test)]
mod tests {
    use super::style_to_marks;
    use crate::model::resume::LegacySegmentStyle;
    use serde_json::json;

    #[test]
    fn font_size_renders_in_points() {
        let style = LegacySegmentStyle {
            font_size: Some(10.5),
            ..LegacySegmentStyle::default()
        };
        let marks = serde_json::to_value(style_to_marks(&style)).unwrap();
        assert_eq!(
            marks,
            json!([{"type": "textStyle", "attrs": {"fontSize": "10.5pt"}}])
        );
    }

    #[test]
    fn whole_point_sizes_have_no_fraction() {
        let style = LegacySegmentStyle {
            font_size: Some(12.0),
            ..LegacySegmentStyle::default()
        };
        let marks = serde_json::to_value(style_to_marks(&style)).unwrap();
        assert_eq!(marks[0]["attrs"]["fontSize"], "12pt");
    }

    #[test]
    fn falsy_style_values_produce_no_marks() {
        let style = LegacySegmentStyle {
            font_size: Some(0.0),
            color: Some(String::new()),
            ..LegacySegmentStyle::default()
        };
        assert!(style_to_marks(&style).is_empty());
    }
}
