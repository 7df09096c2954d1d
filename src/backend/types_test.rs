use super::*;
use time::macros::datetime;

fn entry(id: &str, skill: &str, category: Option<&str>) -> WaitingListEntry {
    WaitingListEntry {
        id: id.to_owned(),
        desired_skill: skill.to_owned(),
        category: category.map(str::to_owned),
        description: None,
        notify: false,
        created_at: datetime!(2024-03-09 17:45:00 UTC),
        email: Some("a@example.com".to_owned()),
        user_id: Some("u-1".to_owned()),
    }
}

// =============================================================================
// Category
// =============================================================================

#[test]
fn category_labels_parse_back() {
    for category in Category::ALL {
        assert_eq!(category.label().parse::<Category>(), Ok(category));
    }
}

#[test]
fn category_parse_trims_whitespace() {
    assert_eq!("  Music ".parse::<Category>(), Ok(Category::Music));
}

#[test]
fn category_parse_rejects_unknown_label() {
    let err = "Gardening".parse::<Category>().unwrap_err();
    assert_eq!(err, UnknownCategory("Gardening".to_owned()));
}

#[test]
fn category_parse_is_case_sensitive() {
    assert!("music".parse::<Category>().is_err());
}

#[test]
fn category_serializes_as_label() {
    let json = serde_json::to_value(Category::ArtsAndCrafts).unwrap();
    assert_eq!(json, serde_json::json!("Arts & Crafts"));
}

#[test]
fn category_display_matches_label() {
    assert_eq!(Category::ProgrammingAndTechnology.to_string(), "Programming & Technology");
}

// =============================================================================
// WaitingListEntry
// =============================================================================

#[test]
fn entry_deserializes_store_row() {
    let row = serde_json::json!({
        "id": "e-1",
        "desired_skill": "Pottery",
        "category": "Arts & Crafts",
        "created_at": "2024-03-09T17:45:00.123456+00:00",
        "email": "a@example.com",
        "user_id": "u-1"
    });
    let entry: WaitingListEntry = serde_json::from_value(row).unwrap();
    assert_eq!(entry.desired_skill, "Pottery");
    assert_eq!(entry.category_label(), "Arts & Crafts");
    assert!(!entry.notify);
    assert_eq!(entry.description, None);
    assert_eq!(entry.requested_on().to_string(), "2024-03-09");
}

#[test]
fn entry_missing_category_labels_as_other() {
    assert_eq!(entry("e-1", "Chess", None).category_label(), "Other");
}

#[test]
fn entry_blank_category_labels_as_other() {
    assert_eq!(entry("e-1", "Chess", Some("  ")).category_label(), "Other");
}

#[test]
fn entry_requested_on_keeps_date_portion_only() {
    let e = entry("e-1", "Chess", None);
    assert_eq!(e.requested_on().to_string(), "2024-03-09");
}

#[test]
fn new_entry_serializes_as_insert_row() {
    let new_entry = NewWaitingListEntry {
        email: "a@example.com".to_owned(),
        skill_name: "Pottery".to_owned(),
        category: Some(Category::ArtsAndCrafts),
        description: None,
        notify: true,
        user_id: "u-1".to_owned(),
    };
    let json = serde_json::to_value(&new_entry).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "email": "a@example.com",
            "desired_skill": "Pottery",
            "category": "Arts & Crafts",
            "notify": true,
            "user_id": "u-1"
        })
    );
}

#[test]
fn new_entry_without_category_serializes_null() {
    let new_entry = NewWaitingListEntry {
        email: "a@example.com".to_owned(),
        skill_name: "Chess".to_owned(),
        category: None,
        description: Some("openings".to_owned()),
        notify: false,
        user_id: "u-1".to_owned(),
    };
    let json = serde_json::to_value(&new_entry).unwrap();
    assert_eq!(json["category"], serde_json::Value::Null);
    assert_eq!(json["description"], "openings");
    assert!(json.get("notify").is_none());
}

#[test]
fn quick_add_payload_has_only_core_columns() {
    let user = User { id: "u-1".to_owned(), email: "a@example.com".to_owned() };
    let new_entry = crate::page::form::validate_quick_add(Some(&user), "Chess").unwrap();
    let json = serde_json::to_value(&new_entry).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "email": "a@example.com",
            "desired_skill": "Chess",
            "category": null,
            "user_id": "u-1"
        })
    );
}

// =============================================================================
// Skill catalog
// =============================================================================

#[test]
fn normalize_skill_name_trims_and_lowercases() {
    assert_eq!(normalize_skill_name("  PoTTery "), "pottery");
}

#[test]
fn find_skill_matches_case_insensitively() {
    let skills = vec![
        SkillItem { id: "s-1".to_owned(), name: "Guitar".to_owned() },
        SkillItem { id: "s-2".to_owned(), name: "Pottery".to_owned() },
    ];
    assert_eq!(find_skill(&skills, "POTTERY").map(|s| s.id.as_str()), Some("s-2"));
}

#[test]
fn find_skill_misses_unknown_name() {
    let skills = vec![SkillItem { id: "s-1".to_owned(), name: "Guitar".to_owned() }];
    assert!(find_skill(&skills, "Pottery").is_none());
}

#[test]
fn find_skill_in_empty_catalog_misses() {
    assert!(find_skill(&[], "Guitar").is_none());
}

#[test]
fn user_skill_teach_serializes_type_column() {
    let record = UserSkill::teach("u-1", "s-2");
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json, serde_json::json!({ "user_id": "u-1", "skill_id": "s-2", "type": "teach" }));
}

#[test]
fn user_deserializes_without_email() {
    let user: User = serde_json::from_str(r#"{"id":"u-1"}"#).unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "");
}
