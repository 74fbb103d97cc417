//! Read-only earnings rollups for one barber.
//!
//! Two denominators are used and never mixed: order-level totals for the headline
//! figures, item-level `total_price` for the per-service breakdown.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::clock::OperatingCalendar;
use crate::commission::{round_money, split};
use crate::domain::{Barber, JobStatus, Order, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarningsPeriod {
    Today,
    /// Rolling 7 days
    Week,
    /// See [`MonthWindow`]
    Month,
    All,
}

impl FromStr for EarningsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            _ => Err(format!("Invalid earnings period: {s}")),
        }
    }
}

/// How the `MONTH` period is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthWindow {
    #[default]
    Rolling30Days,
    CalendarMonth,
}

impl FromStr for MonthWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rolling" => Ok(Self::Rolling30Days),
            "calendar" => Ok(Self::CalendarMonth),
            _ => Err(format!("Invalid month window: {s}")),
        }
    }
}

/// Inclusive lower bound of `period`, or `None` for all time.
pub fn period_start(
    period: EarningsPeriod,
    window: MonthWindow,
    now: DateTime<Utc>,
    calendar: &OperatingCalendar,
) -> Option<DateTime<Utc>> {
    match period {
        EarningsPeriod::Today => Some(calendar.start_of_day(now)),
        EarningsPeriod::Week => Some(now - Duration::days(7)),
        EarningsPeriod::Month => Some(match window {
            MonthWindow::Rolling30Days => now - Duration::days(30),
            MonthWindow::CalendarMonth => calendar.start_of_month(now),
        }),
        EarningsPeriod::All => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceEarning {
    pub title: String,
    pub quantity: u32,
    pub order_count: u32,
    pub earnings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarningsSummary {
    pub period: EarningsPeriod,
    pub commission_rate: Decimal,
    pub total_earnings: Decimal,
    pub order_count: u32,
    pub pending_earnings: Decimal,
    pub pending_order_count: u32,
    pub by_service: Vec<ServiceEarning>,
}

fn is_completed_paid(order: &Order) -> bool {
    order.job_status == JobStatus::Completed && order.payment_status == PaymentStatus::Paid
}

fn is_pending_payout(order: &Order) -> bool {
    order.job_status.is_in_flight()
        && matches!(order.payment_status, PaymentStatus::Pending | PaymentStatus::Paid)
}

fn completed_within(order: &Order, since: Option<DateTime<Utc>>) -> bool {
    match (since, order.completed_at) {
        (None, _) => true,
        (Some(since), Some(done)) => done >= since,
        (Some(_), None) => false,
    }
}

/// Roll up `orders` for `barber` at `rate`.
///
/// Orders not assigned to the barber are ignored, so callers may pass a superset.
pub fn compute_earnings(
    orders: &[Order],
    barber: &Barber,
    rate: Decimal,
    period: EarningsPeriod,
    since: Option<DateTime<Utc>>,
) -> EarningsSummary {
    let mine = || orders.iter().filter(|o| o.is_assigned_to(&barber.id));

    let completed: Vec<&Order> = mine()
        .filter(|&o| is_completed_paid(o) && completed_within(o, since))
        .collect();
    let pending: Vec<&Order> = mine().filter(|&o| is_pending_payout(o)).collect();

    let total_earnings: Decimal = completed
        .iter()
        .map(|o| split(o.total_amount, rate).barber_earning)
        .sum();
    let pending_earnings: Decimal = pending
        .iter()
        .map(|o| split(o.total_amount, rate).barber_earning)
        .sum();

    let mut services: BTreeMap<&str, ServiceEarning> = BTreeMap::new();
    for order in &completed {
        let mut titles_seen: HashSet<&str> = HashSet::new();
        for item in &order.items {
            let entry = services.entry(item.title.as_str()).or_insert_with(|| ServiceEarning {
                title: item.title.clone(),
                quantity: 0,
                order_count: 0,
                earnings: Decimal::ZERO,
            });
            entry.quantity += item.quantity;
            if titles_seen.insert(item.title.as_str()) {
                entry.order_count += 1;
            }
            entry.earnings += split(item.total_price, rate).barber_earning;
        }
    }
    let mut by_service: Vec<ServiceEarning> = services
        .into_values()
        .map(|s| ServiceEarning {
            earnings: round_money(s.earnings),
            ..s
        })
        .collect();
    // Stable sort keeps alphabetical order among equal earnings.
    by_service.sort_by(|a, b| b.earnings.cmp(&a.earnings));

    EarningsSummary {
        period,
        commission_rate: rate,
        total_earnings: round_money(total_earnings),
        order_count: completed.len() as u32,
        pending_earnings: round_money(pending_earnings),
        pending_order_count: pending.len() as u32,
        by_service,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_assigned: u32,
    pub pending_acceptance: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub today_earnings: Decimal,
    pub rating_avg: f64,
    pub total_reviews: u32,
    pub total_bookings: u32,
}

fn count_with(orders: &[&Order], wanted: impl Fn(JobStatus) -> bool) -> u32 {
    orders.iter().filter(|o| wanted(o.job_status)).count() as u32
}

pub fn dashboard_stats(
    orders: &[Order],
    barber: &Barber,
    rate: Decimal,
    today_start: DateTime<Utc>,
) -> DashboardStats {
    let mine: Vec<&Order> = orders.iter().filter(|o| o.is_assigned_to(&barber.id)).collect();
    let today = compute_earnings(orders, barber, rate, EarningsPeriod::Today, Some(today_start));

    DashboardStats {
        total_assigned: mine.len() as u32,
        pending_acceptance: count_with(&mine, |s| s == JobStatus::PendingAcceptance),
        in_progress: count_with(&mine, |s| s.is_in_flight()),
        completed: count_with(&mine, |s| s == JobStatus::Completed),
        today_earnings: today.total_earnings,
        rating_avg: barber.rating_avg,
        total_reviews: barber.total_reviews,
        total_bookings: barber.total_bookings,
    }
}
