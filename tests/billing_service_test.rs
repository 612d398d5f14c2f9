//! Billing engine unit tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;

use pam_desa_api::domain::{Bill, BillStatus, ConnectionStatus, Tariff, TariffChanges, User, UserRole};
use pam_desa_api::errors::AppError;
use pam_desa_api::infra::{
    BillRepository, Datastore, MockBillRepository, MockReportRepository, MockTariffRepository,
    MockUserRepository, ReportRepository, TariffRepository, UserRepository,
};
use pam_desa_api::services::{BillingEngine, BillingService};

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

fn test_bill(id: &str, user_id: &str, current_reading: u32, status: BillStatus) -> Bill {
    Bill {
        id: id.to_string(),
        user_id: user_id.to_string(),
        period: "Juli 2024".to_string(),
        last_reading: current_reading.saturating_sub(15),
        current_reading,
        usage: 15,
        rate_per_m3: 5000,
        admin_fee: 10000,
        total_amount: 85000,
        status,
        due_date: Utc.with_ymd_and_hms(2024, 8, 20, 0, 0, 0).unwrap(),
        paid_date: None,
    }
}

fn test_tariff() -> Tariff {
    Tariff {
        id: "tariff-standard".to_string(),
        name: "Tarif Rumah Tangga".to_string(),
        rate_per_m3: 5000,
        admin_fee: 10000,
        description: "Tarif standar pelanggan rumah tangga".to_string(),
        active: true,
    }
}

/// Test mock for Datastore that wraps per-collection mock repositories
struct TestDatastore {
    users: Arc<MockUserRepository>,
    bills: Arc<MockBillRepository>,
    tariffs: Arc<MockTariffRepository>,
    reports: Arc<MockReportRepository>,
}

impl TestDatastore {
    fn new(users: MockUserRepository, bills: MockBillRepository, tariffs: MockTariffRepository) -> Self {
        Self {
            users: Arc::new(users),
            bills: Arc::new(bills),
            tariffs: Arc::new(tariffs),
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

fn engine(
    users: MockUserRepository,
    bills: MockBillRepository,
    tariffs: MockTariffRepository,
) -> BillingEngine<TestDatastore> {
    BillingEngine::new(Arc::new(TestDatastore::new(users, bills, tariffs)))
}

#[tokio::test]
async fn test_record_reading_computes_exact_total() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq("user-budi"))
        .returning(|id| Ok(Some(test_user(id))));

    let mut bills = MockBillRepository::new();
    bills
        .expect_latest_for_user()
        .returning(|user_id| Ok(Some(test_bill("bill-juli", user_id, 100, BillStatus::Unpaid))));
    bills
        .expect_insert()
        .returning(|bill| Ok(Bill { id: "bill-new".to_string(), ..bill }));

    let mut tariffs = MockTariffRepository::new();
    tariffs.expect_find_active().returning(|| Ok(Some(test_tariff())));

    let service = engine(users, bills, tariffs);
    let bill = service.record_meter_reading("user-budi", 115).await.unwrap();

    // 15 m3 * 5000 + 10000 admin fee
    assert_eq!(bill.last_reading, 100);
    assert_eq!(bill.current_reading, 115);
    assert_eq!(bill.usage, 15);
    assert_eq!(bill.total_amount, 85000);
    assert_eq!(bill.rate_per_m3, 5000);
    assert_eq!(bill.admin_fee, 10000);
    assert_eq!(bill.status, BillStatus::Unpaid);
    assert!(bill.paid_date.is_none());
}

#[tokio::test]
async fn test_first_reading_starts_from_zero() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let mut bills = MockBillRepository::new();
    bills.expect_latest_for_user().returning(|_| Ok(None));
    bills
        .expect_insert()
        .returning(|bill| Ok(Bill { id: "bill-new".to_string(), ..bill }));

    let mut tariffs = MockTariffRepository::new();
    tariffs.expect_find_active().returning(|| Ok(Some(test_tariff())));

    let service = engine(users, bills, tariffs);
    let bill = service.record_meter_reading("user-budi", 7).await.unwrap();

    assert_eq!(bill.last_reading, 0);
    assert_eq!(bill.usage, 7);
    assert_eq!(bill.total_amount, 7 * 5000 + 10000);
}

#[tokio::test]
async fn test_reading_equal_to_previous_is_rejected() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let mut bills = MockBillRepository::new();
    bills
        .expect_latest_for_user()
        .returning(|user_id| Ok(Some(test_bill("bill-juli", user_id, 100, BillStatus::Unpaid))));

    let service = engine(users, bills, MockTariffRepository::new());
    let result = service.record_meter_reading("user-budi", 100).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::InvalidReading {
            last: 100,
            submitted: 100
        }
    ));
}

#[tokio::test]
async fn test_reading_for_unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = engine(users, MockBillRepository::new(), MockTariffRepository::new());
    let result = service.record_meter_reading("ghost", 42).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("user")));
}

#[tokio::test]
async fn test_reading_without_active_tariff_is_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let mut bills = MockBillRepository::new();
    bills.expect_latest_for_user().returning(|_| Ok(None));

    let mut tariffs = MockTariffRepository::new();
    tariffs.expect_find_active().returning(|| Ok(None));

    let service = engine(users, bills, tariffs);
    let result = service.record_meter_reading("user-budi", 42).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("tariff")));
}

#[tokio::test]
async fn test_settle_marks_bill_paid() {
    let mut bills = MockBillRepository::new();
    bills
        .expect_find_by_id()
        .with(eq("bill-juli"))
        .returning(|id| Ok(Some(test_bill(id, "user-budi", 115, BillStatus::Unpaid))));
    bills.expect_mark_paid().returning(|id, paid_at| {
        Ok(Bill {
            status: BillStatus::Paid,
            paid_date: Some(paid_at),
            ..test_bill(id, "user-budi", 115, BillStatus::Paid)
        })
    });

    let service = engine(MockUserRepository::new(), bills, MockTariffRepository::new());
    let bill = service.settle_bill("bill-juli").await.unwrap();

    assert!(bill.is_paid());
    assert!(bill.paid_date.is_some());
}

#[tokio::test]
async fn test_settle_already_paid_bill_conflicts() {
    let mut bills = MockBillRepository::new();
    bills
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_bill(id, "user-budi", 115, BillStatus::Paid))));

    let service = engine(MockUserRepository::new(), bills, MockTariffRepository::new());
    let result = service.settle_bill("bill-juli").await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_settle_unknown_bill_is_not_found() {
    let mut bills = MockBillRepository::new();
    bills.expect_find_by_id().returning(|_| Ok(None));

    let service = engine(MockUserRepository::new(), bills, MockTariffRepository::new());
    let result = service.settle_bill("ghost").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound("bill")));
}

#[tokio::test]
async fn test_update_tariff_rejects_empty_changes() {
    let service = engine(
        MockUserRepository::new(),
        MockBillRepository::new(),
        MockTariffRepository::new(),
    );
    let result = service
        .update_tariff("tariff-standard", TariffChanges::default())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}
