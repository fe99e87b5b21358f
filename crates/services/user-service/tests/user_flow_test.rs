//! Registration and listing through the service over an in-memory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use common::{AppError, AppResult};
use domain::{NewUser, User};
use user_service_lib::repository::UserRepository;
use user_service_lib::service::{UserManager, UserService};

/// Store that assigns identifiers like an auto-increment column and counts
/// every call it receives.
#[derive(Default)]
struct InMemoryUserStore {
    rows: Mutex<Vec<User>>,
    calls: AtomicUsize,
}

impl InMemoryUserStore {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(User::new(id, user.name));
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().clone())
    }
}

fn setup() -> (Arc<InMemoryUserStore>, UserManager) {
    let store = Arc::new(InMemoryUserStore::default());
    let service = UserManager::new(store.clone());
    (store, service)
}

#[tokio::test]
async fn test_register_then_list() {
    let (_, service) = setup();

    service.register_user("Alice").await.unwrap();
    let users = service.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Alice");
    assert_ne!(users[0].id, 0);
}

#[tokio::test]
async fn test_empty_name_performs_no_storage_operations() {
    let (store, service) = setup();

    let err = service.register_user("").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_whitespace_name_is_stored() {
    let (store, service) = setup();

    service.register_user("   ").await.unwrap();
    let users = service.list_users().await.unwrap();

    assert_eq!(store.calls(), 2);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "   ");
}

#[tokio::test]
async fn test_list_on_empty_store() {
    let (store, service) = setup();

    let users = service.list_users().await.unwrap();

    assert!(users.is_empty());
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_failed_registration_does_not_block_others() {
    let (store, service) = setup();

    let names = ["Kushal", "", "DevOps"];
    let mut failures = 0;
    for name in names {
        if service.register_user(name).await.is_err() {
            failures += 1;
        }
    }

    let users = service.list_users().await.unwrap();
    assert_eq!(failures, 1);
    assert_eq!(
        users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Kushal", "DevOps"]
    );
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(store.calls(), 3);
}
