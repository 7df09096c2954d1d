use super::*;

fn user() -> User {
    User { id: "u-1".to_owned(), email: "learner@example.com".to_owned() }
}

fn form(skill_name: &str, category: &str) -> RequestForm {
    RequestForm { skill_name: skill_name.to_owned(), category: category.to_owned(), ..RequestForm::default() }
}

// =============================================================================
// validate_quick_add
// =============================================================================

#[test]
fn quick_add_trims_and_omits_category() {
    let entry = validate_quick_add(Some(&user()), "  Sourdough  ").unwrap();
    assert_eq!(entry.skill_name, "Sourdough");
    assert_eq!(entry.category, None);
    assert_eq!(entry.email, "learner@example.com");
    assert_eq!(entry.user_id, "u-1");
}

#[test]
fn quick_add_requires_user() {
    assert_eq!(validate_quick_add(None, "Sourdough"), Err(ValidationError::NotSignedIn));
}

#[test]
fn quick_add_rejects_blank_name() {
    assert_eq!(validate_quick_add(Some(&user()), "   "), Err(ValidationError::MissingSkillName));
}

// =============================================================================
// validate_request
// =============================================================================

#[test]
fn request_accepts_every_listed_category() {
    for category in Category::ALL {
        let entry = validate_request(Some(&user()), &form("Pottery", category.label())).unwrap();
        assert_eq!(entry.category, Some(category));
    }
}

#[test]
fn request_forwards_description_and_notify() {
    let mut f = form("Pottery", "Arts & Crafts");
    f.description = "  wheel throwing  ".to_owned();
    f.notify = true;
    let entry = validate_request(Some(&user()), &f).unwrap();
    assert_eq!(entry.description.as_deref(), Some("wheel throwing"));
    assert!(entry.notify);
}

#[test]
fn request_blank_description_is_none() {
    let mut f = form("Pottery", "Arts & Crafts");
    f.description = "   ".to_owned();
    let entry = validate_request(Some(&user()), &f).unwrap();
    assert_eq!(entry.description, None);
}

#[test]
fn request_requires_user_before_fields() {
    assert_eq!(validate_request(None, &form("", "")), Err(ValidationError::NotSignedIn));
}

#[test]
fn request_rejects_missing_skill_name() {
    assert_eq!(
        validate_request(Some(&user()), &form(" ", "Music")),
        Err(ValidationError::MissingSkillName)
    );
}

#[test]
fn request_rejects_missing_category() {
    assert_eq!(
        validate_request(Some(&user()), &form("Pottery", "")),
        Err(ValidationError::MissingCategory)
    );
}

#[test]
fn request_rejects_category_outside_list() {
    assert_eq!(
        validate_request(Some(&user()), &form("Pottery", "Gardening")),
        Err(ValidationError::UnknownCategory("Gardening".to_owned()))
    );
}

#[test]
fn field_errors_share_one_message() {
    assert_eq!(ValidationError::MissingCategory.description(), ValidationError::MissingSkillName.description());
    assert_ne!(ValidationError::NotSignedIn.title(), ValidationError::MissingCategory.title());
}
