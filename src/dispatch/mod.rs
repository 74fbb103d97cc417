//! Request handlers for operators, barbers and customers.
//!
//! [`DispatchService`] holds no state of its own: every precondition is checked against
//! a fresh read from the record actors and re-checked by the order actor at write time.
//! Notifications go out only after the write has been committed.

mod barber_portal;
mod lifecycle;
mod orchestrator;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::app_system::DispatchConfig;
use crate::clients::{BarberClient, OrderClient};
use crate::clock::{Clock, LocalMoment, OperatingCalendar};
use crate::commission::effective_rate;
use crate::domain::Barber;
use crate::notifications::{Notification, NotificationDispatcher};

#[derive(Clone)]
pub struct DispatchService {
    orders: OrderClient,
    barbers: BarberClient,
    notifications: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    calendar: OperatingCalendar,
    config: Arc<DispatchConfig>,
}

impl DispatchService {
    pub fn new(
        orders: OrderClient,
        barbers: BarberClient,
        notifications: NotificationDispatcher,
        clock: Arc<dyn Clock>,
        config: Arc<DispatchConfig>,
    ) -> Self {
        Self {
            orders,
            barbers,
            notifications,
            clock,
            calendar: OperatingCalendar::new(config.timezone),
            config,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn local_now(&self) -> LocalMoment {
        self.calendar.localize(self.now())
    }

    fn commission_rate(&self, barber: &Barber) -> Decimal {
        effective_rate(barber.commission_rate, self.config.default_commission_rate)
    }

    /// Fire and forget. The spawned task owns its own failure handling.
    fn notify(&self, notifications: impl IntoIterator<Item = Notification>) {
        drop(self.notifications.dispatch_all(notifications.into_iter().collect()));
    }
}
