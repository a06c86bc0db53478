use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{InMemoryUserRepository, UserRepository};
use crate::test_support::sample_user;

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let user = sample_user("123456", "alice", "admin");

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, "123456");

    assert_eq!(repo.find_by_id("123456").await.unwrap(), Some(user.clone()));
    assert_eq!(repo.find_by_username("alice").await.unwrap(), Some(user));
    assert!(repo.find_by_username("ALICE").await.unwrap().is_none());
    assert!(repo.exists_by_role("admin").await.unwrap());
    assert!(!repo.exists_by_role("sadmin").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(sample_user("111111", "alice", "student")).await.unwrap();

    let result = repo.create(sample_user("222222", "alice", "teach")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists { .. }))
    ));
}

#[tokio::test]
async fn test_duplicate_id_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(sample_user("111111", "alice", "student")).await.unwrap();

    let result = repo.create(sample_user("111111", "bob", "student")).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_update_missing_user() {
    let repo = InMemoryUserRepository::new();

    let result = repo.update(sample_user("999999", "ghost", "student")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_cannot_steal_username() {
    let repo = InMemoryUserRepository::new();
    repo.create(sample_user("111111", "alice", "student")).await.unwrap();
    repo.create(sample_user("222222", "bob", "student")).await.unwrap();

    let mut bob: User = repo.find_by_id("222222").await.unwrap().unwrap();
    bob.username = "alice".to_string();

    assert!(repo.update(bob).await.is_err());
}

#[tokio::test]
async fn test_find_all_is_ordered_and_delete() {
    let repo = InMemoryUserRepository::new();
    repo.create(sample_user("500000", "carol", "teach")).await.unwrap();
    repo.create(sample_user("100000", "alice", "student")).await.unwrap();

    let ids: Vec<String> = repo.find_all().await.unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec!["100000", "500000"]);

    assert!(repo.delete("100000").await.unwrap());
    assert!(!repo.delete("100000").await.unwrap());
    assert!(!repo.exists_by_id("100000").await.unwrap());
    assert!(!repo.exists_by_username("alice").await.unwrap());
}
