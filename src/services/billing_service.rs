//! Billing engine - meter readings, bill settlement, tariff administration.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{
    due_date_following_month, period_label, Bill, BillStatus, Tariff, TariffChanges,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Datastore;

/// Billing service trait for dependency injection
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Turn a submitted meter reading into an unpaid bill.
    ///
    /// The previous reading is the `current_reading` of the customer's
    /// latest bill by due date, or 0 for a first bill. The submitted
    /// reading must be strictly greater. Pricing comes from the active
    /// tariff at submission time and is frozen onto the bill.
    async fn record_meter_reading(&self, user_id: &str, reading: u32) -> AppResult<Bill>;

    /// Settle an unpaid bill, stamping the payment time.
    ///
    /// Settling a bill that is already paid is a conflict; settlement
    /// happens at most once.
    async fn settle_bill(&self, bill_id: &str) -> AppResult<Bill>;

    /// Outstanding bills across all customers
    async fn list_unpaid_bills(&self) -> AppResult<Vec<Bill>>;

    /// One customer's bills, newest first
    async fn list_bills_for_user(&self, user_id: &str) -> AppResult<Vec<Bill>>;

    /// Every bill, newest first
    async fn list_all_bills(&self) -> AppResult<Vec<Bill>>;

    /// Every configured tariff
    async fn list_tariffs(&self) -> AppResult<Vec<Tariff>>;

    /// The tariff new bills are priced from
    async fn active_tariff(&self) -> AppResult<Tariff>;

    /// Change tariff pricing; existing bills keep their frozen figures
    async fn update_tariff(&self, tariff_id: &str, changes: TariffChanges) -> AppResult<Tariff>;
}

/// Concrete implementation of BillingService over the datastore
pub struct BillingEngine<D: Datastore> {
    ds: Arc<D>,
}

impl<D: Datastore> BillingEngine<D> {
    pub fn new(ds: Arc<D>) -> Self {
        Self { ds }
    }
}

#[async_trait]
impl<D: Datastore> BillingService for BillingEngine<D> {
    async fn record_meter_reading(&self, user_id: &str, reading: u32) -> AppResult<Bill> {
        self.ds
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("user")?;

        // Two concurrent readings for the same customer can both observe
        // the same latest bill; the second one wins the baseline race.
        // Accepted: readings are entered by one admin at a time.
        let last_reading = self
            .ds
            .bills()
            .latest_for_user(user_id)
            .await?
            .map(|bill| bill.current_reading)
            .unwrap_or(0);

        if reading <= last_reading {
            return Err(AppError::InvalidReading {
                last: last_reading,
                submitted: reading,
            });
        }

        let tariff = self.active_tariff().await?;
        let usage = reading - last_reading;
        let total_amount = i64::from(usage) * tariff.rate_per_m3 + tariff.admin_fee;

        let now = Utc::now();
        let bill = Bill {
            id: String::new(),
            user_id: user_id.to_string(),
            period: period_label(now),
            last_reading,
            current_reading: reading,
            usage,
            rate_per_m3: tariff.rate_per_m3,
            admin_fee: tariff.admin_fee,
            total_amount,
            status: BillStatus::Unpaid,
            due_date: due_date_following_month(now),
            paid_date: None,
        };

        let bill = self.ds.bills().insert(bill).await?;
        tracing::info!(
            user_id,
            bill_id = %bill.id,
            usage,
            total_amount,
            "meter reading recorded"
        );
        Ok(bill)
    }

    async fn settle_bill(&self, bill_id: &str) -> AppResult<Bill> {
        let bill = self
            .ds
            .bills()
            .find_by_id(bill_id)
            .await?
            .ok_or_not_found("bill")?;

        if bill.is_paid() {
            return Err(AppError::conflict("bill is already settled"));
        }

        let bill = self.ds.bills().mark_paid(bill_id, Utc::now()).await?;
        tracing::info!(bill_id, amount = bill.total_amount, "bill settled");
        Ok(bill)
    }

    async fn list_unpaid_bills(&self) -> AppResult<Vec<Bill>> {
        self.ds.bills().list_unpaid().await
    }

    async fn list_bills_for_user(&self, user_id: &str) -> AppResult<Vec<Bill>> {
        self.ds.bills().list_for_user(user_id).await
    }

    async fn list_all_bills(&self) -> AppResult<Vec<Bill>> {
        self.ds.bills().list_all().await
    }

    async fn list_tariffs(&self) -> AppResult<Vec<Tariff>> {
        self.ds.tariffs().list().await
    }

    async fn active_tariff(&self) -> AppResult<Tariff> {
        self.ds
            .tariffs()
            .find_active()
            .await?
            .ok_or_not_found("tariff")
    }

    async fn update_tariff(&self, tariff_id: &str, changes: TariffChanges) -> AppResult<Tariff> {
        if changes.is_empty() {
            return Err(AppError::validation("tariff update carries no changes"));
        }
        let tariff = self.ds.tariffs().update(tariff_id, changes).await?;
        tracing::info!(
            tariff_id,
            rate_per_m3 = tariff.rate_per_m3,
            admin_fee = tariff.admin_fee,
            "tariff updated"
        );
        Ok(tariff)
    }
}
