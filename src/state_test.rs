use super::test_helpers::*;
use super::*;
use crate::page::notify::ToastBuffer;

#[tokio::test]
async fn resolve_known_token() {
    let (state, _backend) = test_app_state().await;
    let user = state.resolve_user(TEST_TOKEN).await.unwrap();
    assert_eq!(user, Some(test_user()));
}

#[tokio::test]
async fn resolve_unknown_token_is_signed_out() {
    let (state, _backend) = test_app_state().await;
    assert_eq!(state.resolve_user("nope").await.unwrap(), None);
}

#[tokio::test]
async fn memory_seed_registers_dev_session_and_catalog() {
    let seed = MemorySeed {
        skills: vec!["Pottery".to_owned(), "Chess".to_owned()],
        dev_token: Some("dev".to_owned()),
        dev_email: "dev@localhost".to_owned(),
    };
    let handle = BackendHandle::memory(&seed).await;
    let BackendHandle::Memory(backend) = &handle else {
        panic!("expected memory backend");
    };
    assert_eq!(backend.list_skills().await.unwrap().len(), 2);

    let state = AppState::new(handle);
    let user = state.resolve_user("dev").await.unwrap().unwrap();
    assert_eq!(user.email, "dev@localhost");
}

#[tokio::test]
async fn memory_seed_without_token_has_no_sessions() {
    let handle = BackendHandle::memory(&MemorySeed::default()).await;
    let state = AppState::new(handle);
    assert_eq!(state.resolve_user("").await.unwrap(), None);
}

#[tokio::test]
async fn pages_share_the_memory_store() {
    let (state, _backend) = test_app_state().await;

    let first = state.page(Some(TEST_TOKEN), Arc::new(ToastBuffer::new()));
    first.mount().await;
    first.set_quick_add("Chess").await;
    first.quick_add(Some(&test_user())).await.unwrap();

    let second = state.page(None, Arc::new(ToastBuffer::new()));
    second.mount().await;
    let state = second.snapshot().await;
    assert_eq!(state.entries.len(), 1);
    assert_eq!(state.skills.len(), 1);
}
