//! Barber / company split of an order total.
//!
//! Money is computed in `Decimal`. The company share is derived by subtraction so the
//! two parts always add back up to the total exactly.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Rate used when a barber record carries none.
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(70, 0, 0, false, 2);

const MONEY_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommissionSplit {
    pub barber_earning: Decimal,
    pub company_commission: Decimal,
}

/// Split `order_total` at `commission_rate` (the barber's fraction).
///
/// Only meaningful for paid orders; callers filter by payment status.
pub fn split(order_total: Decimal, commission_rate: Decimal) -> CommissionSplit {
    let barber_earning = order_total * commission_rate;
    CommissionSplit {
        barber_earning,
        company_commission: order_total - barber_earning,
    }
}

/// The rate that applies to a barber, falling back to `default_rate`.
pub fn effective_rate(barber_rate: Option<Decimal>, default_rate: Decimal) -> Decimal {
    barber_rate.unwrap_or(default_rate)
}

/// Round for display, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
