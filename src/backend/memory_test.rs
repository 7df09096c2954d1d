use super::*;
use crate::backend::Category;

fn new_entry(skill: &str) -> NewWaitingListEntry {
    NewWaitingListEntry {
        email: "a@example.com".to_owned(),
        skill_name: skill.to_owned(),
        category: Some(Category::Music),
        description: None,
        notify: false,
        user_id: "u-1".to_owned(),
    }
}

#[tokio::test]
async fn add_assigns_id_and_stores_category_label() {
    let backend = MemoryBackend::new();
    let stored = backend.add_to_waiting_list(&new_entry("Guitar")).await.unwrap();
    assert!(!stored.id.is_empty());
    assert_eq!(stored.category.as_deref(), Some("Music"));

    let entries = backend.fetch_waiting_list_entries().await.unwrap();
    assert_eq!(entries, vec![stored]);
}

#[tokio::test]
async fn duplicate_submissions_are_kept() {
    let backend = MemoryBackend::new();
    backend.add_to_waiting_list(&new_entry("Guitar")).await.unwrap();
    backend.add_to_waiting_list(&new_entry("Guitar")).await.unwrap();
    assert_eq!(backend.fetch_waiting_list_entries().await.unwrap().len(), 2);
}

#[tokio::test]
async fn remove_deletes_entry() {
    let backend = MemoryBackend::new();
    let stored = backend.add_to_waiting_list(&new_entry("Guitar")).await.unwrap();
    backend.remove_from_waiting_list(&stored.id).await.unwrap();
    assert!(backend.fetch_waiting_list_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_unknown_entry_is_not_found() {
    let backend = MemoryBackend::new();
    let err = backend.remove_from_waiting_list("missing").await.unwrap_err();
    assert!(matches!(err, BackendError::NotFound(id) if id == "missing"));
}

#[tokio::test]
async fn seed_skills_keeps_order_with_distinct_ids() {
    let backend = MemoryBackend::new();
    backend.seed_skills(&["Guitar", "Pottery"]).await;
    let skills = backend.list_skills().await.unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].name, "Guitar");
    assert_eq!(skills[1].name, "Pottery");
    assert_ne!(skills[0].id, skills[1].id);
}

#[tokio::test]
async fn insert_user_skill_is_recorded() {
    let backend = MemoryBackend::new();
    backend.insert_user_skill(&UserSkill::teach("u-1", "s-1")).await.unwrap();
    assert_eq!(backend.user_skills().await, vec![UserSkill::teach("u-1", "s-1")]);
}

#[tokio::test]
async fn resolve_user_by_registered_token() {
    let backend = MemoryBackend::new();
    let user = User { id: "u-1".to_owned(), email: "a@example.com".to_owned() };
    backend.register_session("tok", user.clone()).await;
    assert_eq!(backend.resolve_user("tok").await.unwrap(), Some(user));
    assert_eq!(backend.resolve_user("other").await.unwrap(), None);
}
