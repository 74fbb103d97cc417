use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::JobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Paid => write!(f, "PAID"),
            Self::Refunded => write!(f, "REFUNDED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Commercial status of the order as seen by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// One ordered service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl LineItem {
    pub fn new(title: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            title: title.into(),
            quantity,
            unit_price,
            total_price: unit_price * Decimal::from(quantity),
        }
    }
}

/// Customer fields copied onto the order at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub customer_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// One committed dispatch transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub from: JobStatus,
    pub to: JobStatus,
    pub barber_id: String,
    pub at: DateTime<Utc>,
}

/// A customer purchase of one or more services.
///
/// The dispatch fields (`job_status`, `assigned_barber_id`, `decline_reason`,
/// `timeline`) are written only by the job state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub status: OrderStatus,
    pub customer: CustomerRef,
    pub job_status: JobStatus,
    pub assigned_barber_id: Option<String>,
    pub decline_reason: Option<String>,
    /// Customer rating (1-5) left after completion.
    pub review_rating: Option<u8>,
    pub timeline: Vec<TimelineEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new order at checkout.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: String,
    pub items: Vec<LineItem>,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub customer: CustomerRef,
    pub created_at: DateTime<Utc>,
}

/// Fields an upstream collaborator may change outside the dispatch lifecycle.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
}

impl Order {
    pub fn is_assigned_to(&self, barber_id: &str) -> bool {
        self.assigned_barber_id.as_deref() == Some(barber_id)
    }
}

/// Compact view returned to operators after an assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub job_status: JobStatus,
    pub assigned_barber_id: Option<String>,
    pub customer_name: String,
    pub total_amount: Decimal,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            order_number: order.order_number.clone(),
            job_status: order.job_status,
            assigned_barber_id: order.assigned_barber_id.clone(),
            customer_name: order.customer.name.clone(),
            total_amount: order.total_amount,
        }
    }
}
