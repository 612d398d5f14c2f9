//! Bill domain entity and billing-period helpers.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::BILL_DUE_DAY;

/// Payment state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Unpaid,
    Paid,
}

/// Monthly water bill.
///
/// Tariff figures are copied onto the bill at creation time, so later
/// tariff edits never change what an existing bill charges. Amounts are
/// whole rupiah.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Document id, kept outside the stored body
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    /// Human-readable billing period, e.g. "Juli 2024"
    #[schema(example = "Juli 2024")]
    pub period: String,
    /// Meter value the previous bill ended at (0 for a first bill)
    pub last_reading: u32,
    pub current_reading: u32,
    /// Consumption in cubic meters for this period
    pub usage: u32,
    pub rate_per_m3: i64,
    pub admin_fee: i64,
    pub total_amount: i64,
    pub status: BillStatus,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        matches!(self.status, BillStatus::Paid)
    }
}

/// Indonesian month names, January first
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Billing-period label for the month a reading was submitted in
pub fn period_label(submitted_at: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        MONTH_NAMES[submitted_at.month0() as usize],
        submitted_at.year()
    )
}

/// Due date for a bill created at `submitted_at`: the 20th of the
/// following month, rolling into January of the next year after December.
pub fn due_date_following_month(submitted_at: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if submitted_at.month() == 12 {
        (submitted_at.year() + 1, 1)
    } else {
        (submitted_at.year(), submitted_at.month() + 1)
    };
    Utc.with_ymd_and_hms(year, month, BILL_DUE_DAY, 0, 0, 0)
        .single()
        .expect("due day is valid in every month")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 30, 0).unwrap()
    }

    #[test]
    fn period_label_uses_indonesian_month_names() {
        assert_eq!(period_label(at(2024, 7, 15)), "Juli 2024");
        assert_eq!(period_label(at(2025, 1, 1)), "Januari 2025");
    }

    #[test]
    fn due_date_falls_on_the_20th_of_next_month() {
        let due = due_date_following_month(at(2024, 7, 15));
        assert_eq!((due.year(), due.month(), due.day()), (2024, 8, 20));
    }

    #[test]
    fn december_due_date_rolls_into_next_year() {
        let due = due_date_following_month(at(2024, 12, 3));
        assert_eq!((due.year(), due.month(), due.day()), (2025, 1, 20));
    }

    #[test]
    fn bill_serializes_with_document_field_names() {
        let bill = Bill {
            id: "b-1".into(),
            user_id: "u-1".into(),
            period: "Juli 2024".into(),
            last_reading: 100,
            current_reading: 115,
            usage: 15,
            rate_per_m3: 5000,
            admin_fee: 10000,
            total_amount: 85000,
            status: BillStatus::Unpaid,
            due_date: at(2024, 8, 20),
            paid_date: None,
        };
        let value = serde_json::to_value(&bill).unwrap();
        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["totalAmount"], 85000);
        assert_eq!(value["status"], "unpaid");
        // absent until the bill is settled
        assert!(value.get("paidDate").is_none());
    }
}
