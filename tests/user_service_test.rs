//! User directory unit tests.

use std::sync::Arc;

use mockall::predicate::eq;

use pam_desa_api::domain::{ConnectionStatus, NewUser, User, UserChanges, UserRole};
use pam_desa_api::errors::AppError;
use pam_desa_api::infra::{
    BillRepository, Datastore, MockBillRepository, MockReportRepository, MockTariffRepository,
    MockUserRepository, ReportRepository, TariffRepository, UserRepository,
};
use pam_desa_api::services::{UserDirectory, UserService};

fn test_user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: "Budi Santoso".to_string(),
        email: "budi@example.com".to_string(),
        phone_number: "081311122233".to_string(),
        password: "rahasia123".to_string(),
        address: "Jalan Melati No. 5".to_string(),
        customer_number: "CUST104217".to_string(),
        role: UserRole::User,
        connection_status: ConnectionStatus::Active,
        avatar_url: "https://i.pravatar.cc/150?u=CUST104217".to_string(),
    }
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Rina Wati".to_string(),
        email: email.to_string(),
        phone_number: "081377766655".to_string(),
        password: "sandi-rina-1".to_string(),
        address: "Jalan Anggrek No. 3".to_string(),
        role: UserRole::User,
    }
}

/// Test mock for Datastore; only the user repository is exercised here
struct TestDatastore {
    users: Arc<MockUserRepository>,
    bills: Arc<MockBillRepository>,
    tariffs: Arc<MockTariffRepository>,
    reports: Arc<MockReportRepository>,
}

impl TestDatastore {
    fn new(users: MockUserRepository) -> Self {
        Self {
            users: Arc::new(users),
            bills: Arc::new(MockBillRepository::new()),
            tariffs: Arc::new(MockTariffRepository::new()),
            reports: Arc::new(MockReportRepository::new()),
        }
    }
}

impl Datastore for TestDatastore {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn bills(&self) -> Arc<dyn BillRepository> {
        self.bills.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    fn tariffs(&self) -> Arc<dyn TariffRepository> {
        self.tariffs.clone()
    }
}

fn directory(users: MockUserRepository) -> UserDirectory<TestDatastore> {
    UserDirectory::new(Arc::new(TestDatastore::new(users)))
}

#[tokio::test]
async fn test_get_user_success() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq("user-budi"))
        .returning(|id| Ok(Some(test_user(id))));

    let result = directory(repo).get_user("user-budi").await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, "user-budi");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let result = directory(repo).get_user("user-ghost").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("user")));
}

#[tokio::test]
async fn test_list_users_success() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .returning(|| Ok(vec![test_user("user-budi"), test_user("user-siti")]));

    let result = directory(repo).list_users().await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_user_generates_directory_fields() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .with(eq("rina@example.com"))
        .returning(|_| Ok(None));
    repo.expect_create().returning(|mut user| {
        user.id = "user-new".to_string();
        Ok(user)
    });

    let result = directory(repo).add_user(new_user("rina@example.com")).await;

    let user = result.unwrap();
    assert_eq!(user.id, "user-new");
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.connection_status, ConnectionStatus::Active);
    // CUST plus six digits, and the avatar is derived from it
    assert!(user.customer_number.starts_with("CUST"));
    assert_eq!(user.customer_number.len(), 10);
    assert_eq!(
        user.avatar_url,
        format!("https://i.pravatar.cc/150?u={}", user.customer_number)
    );
}

#[tokio::test]
async fn test_add_user_rejects_duplicate_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(|_| Ok(Some(test_user("user-budi"))));

    let result = directory(repo).add_user(new_user("budi@example.com")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_user_returns_updated_record() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().returning(|id, changes| {
        let mut user = test_user(id);
        if let Some(name) = changes.name {
            user.name = name;
        }
        Ok(user)
    });

    let changes = UserChanges {
        name: Some("Budi Setiawan".to_string()),
        ..Default::default()
    };
    let result = directory(repo).update_user("user-budi", changes).await;

    assert_eq!(result.unwrap().name, "Budi Setiawan");
}

#[tokio::test]
async fn test_update_unknown_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .returning(|_, _| Err(AppError::NotFound("user")));

    let changes = UserChanges {
        address: Some("Jalan Baru No. 1".to_string()),
        ..Default::default()
    };
    let result = directory(repo).update_user("user-ghost", changes).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("user")));
}

#[tokio::test]
async fn test_reset_password_overwrites_credential() {
    let mut repo = MockUserRepository::new();
    repo.expect_set_password()
        .with(eq("user-budi"), eq("sandi-baru-99"))
        .returning(|_, _| Ok(()));

    let result = directory(repo)
        .reset_password("user-budi", "sandi-baru-99")
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_reset_password_unknown_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_set_password()
        .returning(|_, _| Err(AppError::NotFound("user")));

    let result = directory(repo).reset_password("user-ghost", "sandi").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("user")));
}
