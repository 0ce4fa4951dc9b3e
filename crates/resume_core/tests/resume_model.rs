use resume_core::model::timestamp;
use resume_core::{
    validate_resume_data, ContentElement, JsonContent, ModuleContentElement, ResumeData,
    StoredResume,
};
use serde_json::json;

#[test]
fn resume_data_uses_camel_case_wire_fields_and_keeps_unknown_fields() {
    let input = json!({
        "title": "Jane Doe",
        "centerTitle": true,
        "jobIntentionSection": {"items": [{"id": "j1", "label": "Role", "value": "Engineer"}], "enabled": true},
        "personalInfoSection": {"items": [{"id": "p1", "label": "Email", "value": "jane@example.com", "icon": "mdi:email"}], "showLabels": false},
        "avatar": "/me.jpg",
        "modules": [],
        "createdAt": "2024-05-01T08:30:00.000Z",
        "updatedAt": "2024-05-02T09:00:00.000Z",
        "theme": {"accent": "#336699"}
    });

    let data: ResumeData = serde_json::from_value(input.clone()).unwrap();
    assert!(data.center_title);
    assert_eq!(data.personal_info_section.items[0].icon.as_deref(), Some("mdi:email"));
    assert_eq!(data.extra["theme"], json!({"accent": "#336699"}));

    assert_eq!(serde_json::to_value(&data).unwrap(), input);
}

#[test]
fn empty_timestamps_read_as_absent() {
    let data: ResumeData = serde_json::from_value(json!({
        "title": "Jane",
        "createdAt": "",
        "updatedAt": ""
    }))
    .unwrap();
    assert_eq!(data.created_at, None);
    assert_eq!(data.updated_at, None);
}

#[test]
fn stored_resume_wire_shape_matches_persisted_collection() {
    let now = timestamp::parse("2024-05-01T08:30:00.000Z").unwrap();
    let entry = StoredResume {
        id: "a".to_string(),
        created_at: now,
        updated_at: now,
        resume_data: ResumeData::new("Jane"),
    };
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["id"], "a");
    assert_eq!(value["createdAt"], "2024-05-01T08:30:00.000Z");
    assert_eq!(value["updatedAt"], "2024-05-01T08:30:00.000Z");
    assert_eq!(value["resumeData"]["title"], "Jane");

    let decoded: StoredResume = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn default_resume_is_valid() {
    let report = validate_resume_data(&ResumeData::default());
    assert!(report.is_valid, "{:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[test]
fn validation_collects_every_problem() {
    let mut data = ResumeData::new("  ");
    data.modules = serde_json::from_value(json!([
        {"id": "m1", "rows": [{"id": "r1", "columns": 1, "elements": [
            {"id": "e1", "content": {"type": "doc", "content": []}, "columnIndex": 3},
            {"id": "e1", "type": "text", "segments": [], "columnIndex": 0}
        ]}]},
        {"id": "m1", "rows": []}
    ]))
    .unwrap();

    let report = validate_resume_data(&data);
    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec![
            "title is required".to_string(),
            "element `e1` column index 3 exceeds row `r1` column count 1".to_string(),
            "duplicate element id `e1`".to_string(),
            "element `e1` uses the legacy segment format".to_string(),
            "duplicate module id `m1`".to_string(),
        ]
    );
}

#[test]
fn validation_rejects_non_doc_roots_and_empty_text_nodes() {
    let mut data = ResumeData::new("Jane");
    let mut bad_root = ModuleContentElement::empty("e1", 0);
    bad_root.content = JsonContent::paragraph(Vec::new());
    let mut empty_text = ModuleContentElement::empty("e2", 0);
    empty_text.content = JsonContent::doc(vec![JsonContent::paragraph(vec![
        JsonContent::text_node("", Vec::new()),
    ])]);
    data.modules = ResumeData::default().modules;
    data.modules[0].rows[0].elements = vec![
        ContentElement::Current(bad_root),
        ContentElement::Current(empty_text),
    ];

    let report = validate_resume_data(&data);
    assert_eq!(
        report.errors,
        vec![
            "element `e1` content root must be `doc`, got `paragraph`".to_string(),
            "element `e2` contains an empty text node".to_string(),
        ]
    );
}

#[test]
fn validation_rejects_updated_before_created() {
    let mut data = ResumeData::new("Jane");
    data.created_at = timestamp::parse("2024-05-02T00:00:00Z");
    data.updated_at = timestamp::parse("2024-05-01T00:00:00Z");
    let report = validate_resume_data(&data);
    assert_eq!(report.errors, vec!["updatedAt is earlier than createdAt".to_string()]);
}
