use chrono::{TimeZone, Utc};
use noesis_core::{Category, Entry, EntryDraft, EntryType};

#[test]
fn entry_serializes_with_camel_case_wire_fields() {
    let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let mut entry = Entry::from_draft(
        "e1".to_string(),
        "thinking-lighthouse",
        Category::Thinking,
        EntryDraft::titled("Idea")
            .with_link("https://example.com")
            .with_kind(EntryType::Link),
        created_at,
    );
    entry.attachment_name = "board.png".to_string();
    entry.related_material_ids = vec!["m-12".to_string()];

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], "e1");
    assert_eq!(json["landmarkId"], "thinking-lighthouse");
    assert_eq!(json["category"], "thinking");
    assert_eq!(json["type"], "link");
    assert_eq!(json["attachmentName"], "board.png");
    assert_eq!(json["sketchNote"], "");
    assert_eq!(json["relatedMaterialIds"][0], "m-12");
    assert_eq!(json["createdAt"], "2026-03-01T09:30:00Z");

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn deserialize_defaults_missing_optional_fields() {
    let value = serde_json::json!({
        "id": "legacy",
        "landmarkId": "finance-vault",
        "title": "Old note",
        "createdAt": "2025-12-31T23:59:59.999Z"
    });

    let entry: Entry = serde_json::from_value(value).unwrap();
    assert_eq!(entry.category, Category::Other);
    assert_eq!(entry.kind, EntryType::Text);
    assert!(entry.text.is_empty());
    assert!(entry.tags.is_empty());
    assert!(entry.related_material_ids.is_empty());
}

#[test]
fn deserialize_rejects_unknown_entry_type() {
    let value = serde_json::json!({
        "id": "bad",
        "landmarkId": "finance-vault",
        "type": "video",
        "createdAt": "2025-12-31T23:59:59Z"
    });

    assert!(serde_json::from_value::<Entry>(value).is_err());
}

#[test]
fn wire_names_parse_back_case_insensitively() {
    assert_eq!(EntryType::parse(" Sketch "), Some(EntryType::Sketch));
    assert_eq!(EntryType::parse("video"), None);
    assert_eq!(Category::parse("CAREER"), Some(Category::Career));
    for category in Category::ALL {
        assert_eq!(Category::parse(category.as_str()), Some(category));
    }
}
