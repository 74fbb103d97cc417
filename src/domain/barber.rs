use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::AvailabilityWindow;

/// Administrative status, set by back-office staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarberStatus {
    #[default]
    Active,
    Suspended,
    Inactive,
}

impl fmt::Display for BarberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Suspended => write!(f, "SUSPENDED"),
            Self::Inactive => write!(f, "INACTIVE"),
        }
    }
}

/// A field service provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: String,
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: BarberStatus,
    pub is_online: bool,
    /// Fraction of the order total paid to the barber; `None` means the configured default.
    pub commission_rate: Option<Decimal>,
    pub rating_avg: f64,
    pub total_reviews: u32,
    pub total_bookings: u32,
    pub availability: Vec<AvailabilityWindow>,
    pub created_at: DateTime<Utc>,
}

impl Barber {
    pub fn is_active(&self) -> bool {
        self.status == BarberStatus::Active
    }
}

/// Payload for onboarding a barber.
#[derive(Debug, Clone)]
pub struct BarberCreate {
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub commission_rate: Option<Decimal>,
    pub availability: Vec<AvailabilityWindow>,
    pub created_at: DateTime<Utc>,
}

/// Administrative edits.
#[derive(Debug, Clone, Default)]
pub struct BarberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<BarberStatus>,
    pub commission_rate: Option<Decimal>,
}
