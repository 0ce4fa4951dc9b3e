use resume_core::{
    migrate_element, migrate_resume_data, needs_migration, ContentElement, ModuleContentElement,
    ResumeData,
};
use serde_json::{json, Value};

fn element(value: Value) -> ContentElement {
    serde_json::from_value(value).unwrap()
}

fn resume_with_elements(elements: Vec<Value>) -> ResumeData {
    serde_json::from_value(json!({
        "title": "Jane Doe",
        "modules": [{
            "id": "m1",
            "title": "Experience",
            "rows": [{"id": "r1", "columns": 2, "elements": elements}]
        }]
    }))
    .unwrap()
}

#[test]
fn legacy_shape_is_detected_by_segments_array() {
    let legacy = element(json!({
        "id": "e1",
        "type": "text",
        "segments": [],
        "columnIndex": 0
    }));
    assert!(legacy.is_legacy());

    let current = element(json!({
        "id": "e2",
        "content": {"type": "doc", "content": [{"type": "paragraph", "content": []}]},
        "columnIndex": 1
    }));
    assert!(!current.is_legacy());
}

#[test]
fn non_array_segments_fall_back_to_current_shape() {
    let value = element(json!({
        "id": "e1",
        "segments": "not a list",
        "content": {"type": "doc", "content": []},
        "columnIndex": 0
    }));
    assert!(!value.is_legacy());
}

#[test]
fn bold_and_color_segment_maps_to_expected_marks() {
    let migrated = migrate_element(element(json!({
        "id": "e1",
        "type": "text",
        "segments": [{"id": "s1", "text": "Bob", "style": {"bold": true, "color": "#fff"}}],
        "columnIndex": 0
    })));

    let content = serde_json::to_value(&migrated.content).unwrap();
    assert_eq!(
        content,
        json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "content": [{
                    "type": "text",
                    "text": "Bob",
                    "marks": [
                        {"type": "bold"},
                        {"type": "textStyle", "attrs": {"color": "#fff"}}
                    ]
                }]
            }]
        })
    );
    assert_eq!(migrated.id, "e1");
    assert_eq!(migrated.column_index, 0);
}

#[test]
fn segments_map_one_to_one_in_order_and_skip_empty_text() {
    let migrated = migrate_element(element(json!({
        "id": "e1",
        "type": "bullet-list",
        "segments": [
            {"id": "s1", "text": "Rust", "style": {}},
            {"id": "s2", "text": "", "style": {"bold": true}},
            {"id": "s3", "text": " and ", "style": {"italic": true, "underline": true}},
            {"id": "s4", "style": {}},
            {"id": "s5", "text": "SQL", "style": {"code": true, "fontFamily": "Mono", "fontSize": 11}}
        ],
        "columnIndex": 1
    })));

    let blocks = migrated.content.children();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, "paragraph");

    let texts: Vec<&str> = blocks[0]
        .children()
        .iter()
        .map(|node| node.text.as_deref().unwrap())
        .collect();
    assert_eq!(texts, vec!["Rust", " and ", "SQL"]);

    let inline = serde_json::to_value(blocks[0].children()).unwrap();
    assert!(inline[0].get("marks").is_none());
    assert_eq!(inline[1]["marks"], json!([{"type": "italic"}, {"type": "underline"}]));
    assert_eq!(
        inline[2]["marks"],
        json!([
            {"type": "code"},
            {"type": "textStyle", "attrs": {"fontFamily": "Mono", "fontSize": "11pt"}}
        ])
    );
}

#[test]
fn zero_segments_yield_canonical_empty_document() {
    let migrated = migrate_element(element(json!({
        "id": "e1",
        "type": "text",
        "segments": [],
        "columnIndex": 0
    })));
    assert_eq!(
        serde_json::to_value(&migrated.content).unwrap(),
        json!({"type": "doc", "content": [{"type": "paragraph", "content": []}]})
    );
}

#[test]
fn alignment_becomes_text_align_on_first_paragraph() {
    let migrated = migrate_element(element(json!({
        "id": "e1",
        "type": "text",
        "segments": [{"id": "s1", "text": "Centered", "style": {}}],
        "columnIndex": 0,
        "align": "center",
        "indent": 2
    })));
    let paragraph = &migrated.content.children()[0];
    assert_eq!(paragraph.attrs.as_ref().and_then(|attrs| attrs.get("textAlign")), Some(&json!("center")));
}

#[test]
fn current_element_passes_through_unchanged() {
    let current = ModuleContentElement {
        id: "e1".to_string(),
        content: serde_json::from_value(json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "attrs": {"textAlign": "right"},
                "content": [{"type": "text", "text": "Hello", "marks": [{"type": "bold"}]}]
            }]
        }))
        .unwrap(),
        column_index: 1,
    };

    let migrated = migrate_element(ContentElement::Current(current.clone()));
    assert_eq!(migrated, current);
}

#[test]
fn migrate_resume_data_converts_every_element_and_is_idempotent() {
    let data = resume_with_elements(vec![
        json!({"id": "e1", "type": "text", "segments": [{"id": "s", "text": "Old", "style": {}}], "columnIndex": 0}),
        json!({"id": "e2", "content": {"type": "doc", "content": [{"type": "paragraph", "content": []}]}, "columnIndex": 1}),
    ]);
    assert!(needs_migration(&data));

    let once = migrate_resume_data(data);
    assert!(!needs_migration(&once));
    assert_eq!(once.modules[0].id, "m1");
    assert_eq!(once.modules[0].rows[0].columns, 2);
    assert_eq!(once.modules[0].rows[0].elements.len(), 2);

    let twice = migrate_resume_data(once.clone());
    assert_eq!(twice, once);
}

#[test]
fn needs_migration_is_false_for_current_data() {
    let data = resume_with_elements(vec![json!({
        "id": "e1",
        "content": {"type": "doc", "content": []},
        "columnIndex": 0
    })]);
    assert!(!needs_migration(&data));
    assert!(!needs_migration(&ResumeData::default()));
}

#[test]
fn null_segment_fields_read_as_falsy() {
    let migrated = migrate_element(element(json!({
        "id": "e1",
        "type": "text",
        "segments": [
            {"id": null, "text": null, "style": {"bold": null}},
            {"id": "s2", "text": "ok", "style": {"bold": null, "italic": true, "color": null}},
            {"id": "s3", "text": "plain", "style": null}
        ],
        "columnIndex": 0
    })));
    assert_eq!(
        serde_json::to_value(&migrated.content).unwrap(),
        json!({"type": "doc", "content": [{"type": "paragraph", "content": [
            {"type": "text", "text": "ok", "marks": [{"type": "italic"}]},
            {"type": "text", "text": "plain"}
        ]}]})
    );
}
