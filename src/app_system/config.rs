//! Runtime configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DISPATCH_TIMEZONE | UTC | operating civil timezone (IANA name) |
//! | DEFAULT_COMMISSION_RATE | 0.70 | barber share when the barber has no rate |
//! | EARNINGS_MONTH_WINDOW | rolling | `rolling` (30 days) or `calendar` |
//! | NOTIFICATION_TIMEOUT_MS | 5000 | per-notification timeout |
//! | OPERATOR_CHANNEL | operators | recipient of decline notices |
//! | REQUIRE_DISPATCH_ELIGIBILITY | false | assignment requires online and within hours |
//! | ACTOR_BUFFER_SIZE | 100 | mpsc buffer of each record actor |

use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::commission::DEFAULT_COMMISSION_RATE;
use crate::earnings::MonthWindow;

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub timezone: Tz,
    pub default_commission_rate: Decimal,
    pub month_window: MonthWindow,
    pub notification_timeout: Duration,
    pub operator_channel: String,
    pub require_dispatch_eligibility: bool,
    pub actor_buffer_size: usize,
}

/// Read `key`, falling back to `default` when it is unset or does not parse.
fn var_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(e) => {
                warn!(key, value = %raw, error = %e, fallback = %default, "Invalid config value");
                default
            }
        },
        None => default,
    }
}

impl DispatchConfig {
    /// Load from the process environment. Unset or invalid variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let default_commission_rate = var_or(&get, "DEFAULT_COMMISSION_RATE", defaults.default_commission_rate);
        let default_commission_rate = if (Decimal::ZERO..=Decimal::ONE).contains(&default_commission_rate) {
            default_commission_rate
        } else {
            warn!(rate = %default_commission_rate, "Commission rate outside [0, 1], using default");
            defaults.default_commission_rate
        };

        let month_window = match get("EARNINGS_MONTH_WINDOW") {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Invalid EARNINGS_MONTH_WINDOW, using rolling");
                defaults.month_window
            }),
            None => defaults.month_window,
        };

        let actor_buffer_size = match var_or(&get, "ACTOR_BUFFER_SIZE", defaults.actor_buffer_size) {
            0 => {
                warn!("ACTOR_BUFFER_SIZE must be positive, using default");
                defaults.actor_buffer_size
            }
            n => n,
        };

        Self {
            timezone: var_or(&get, "DISPATCH_TIMEZONE", defaults.timezone),
            default_commission_rate,
            month_window,
            notification_timeout: Duration::from_millis(var_or(
                &get,
                "NOTIFICATION_TIMEOUT_MS",
                defaults.notification_timeout.as_millis() as u64,
            )),
            operator_channel: var_or(&get, "OPERATOR_CHANNEL", defaults.operator_channel),
            require_dispatch_eligibility: var_or(
                &get,
                "REQUIRE_DISPATCH_ELIGIBILITY",
                defaults.require_dispatch_eligibility,
            ),
            actor_buffer_size,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            default_commission_rate: DEFAULT_COMMISSION_RATE,
            month_window: MonthWindow::Rolling30Days,
            notification_timeout: Duration::from_millis(5000),
            operator_channel: "operators".to_string(),
            require_dispatch_eligibility: false,
            actor_buffer_size: 100,
        }
    }
}
