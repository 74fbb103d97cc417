use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::availability::sanitize_windows;
use crate::domain::{Barber, BarberCreate, BarberPatch, BarberStatus};

use super::actions::{BarberAction, BarberActionResult};
use super::error::BarberError;

fn validate_rate(rate: Option<Decimal>) -> Result<(), BarberError> {
    match rate {
        Some(rate) if rate < Decimal::ZERO || rate > Decimal::ONE => Err(BarberError::ValidationError(
            format!("Commission rate must be within [0, 1], got {rate}"),
        )),
        _ => Ok(()),
    }
}

impl Entity for Barber {
    type Id = String;
    type CreateParams = BarberCreate;
    type Patch = BarberPatch;
    type Action = BarberAction;
    type ActionResult = BarberActionResult;
    type Error = BarberError;

    const KIND: &'static str = "Barber";

    fn id(&self) -> &String {
        &self.id
    }

    /// Onboards a barber as `ACTIVE` and offline.
    fn from_create_params(id: String, params: BarberCreate) -> Result<Self, BarberError> {
        if params.code.trim().is_empty() {
            return Err(BarberError::ValidationError("Barber code is required".to_string()));
        }
        validate_rate(params.commission_rate)?;

        Ok(Self {
            id,
            code: params.code,
            name: params.name,
            email: params.email,
            phone: params.phone,
            status: BarberStatus::Active,
            is_online: false,
            commission_rate: params.commission_rate,
            rating_avg: 0.0,
            total_reviews: 0,
            total_bookings: 0,
            availability: sanitize_windows(params.availability),
            created_at: params.created_at,
        })
    }

    /// Administrative edits: profile fields, status and commission rate.
    fn on_update(&mut self, patch: BarberPatch) -> Result<(), BarberError> {
        validate_rate(patch.commission_rate)?;
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(rate) = patch.commission_rate {
            self.commission_rate = Some(rate);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: BarberAction) -> Result<BarberActionResult, BarberError> {
        match action {
            BarberAction::SetOnline(is_online) => {
                self.is_online = is_online;
                Ok(BarberActionResult::SetOnline(is_online))
            }
            BarberAction::ReplaceAvailability(windows) => {
                self.availability = sanitize_windows(windows);
                Ok(BarberActionResult::ReplaceAvailability(self.availability.clone()))
            }
            BarberAction::RecordReview(rating) => {
                if !(1..=5).contains(&rating) {
                    return Err(BarberError::ValidationError(format!(
                        "Rating must be between 1 and 5, got {rating}"
                    )));
                }
                let total = f64::from(self.total_reviews);
                self.rating_avg = (self.rating_avg * total + f64::from(rating)) / (total + 1.0);
                self.total_reviews += 1;
                Ok(BarberActionResult::RecordReview {
                    rating_avg: self.rating_avg,
                    total_reviews: self.total_reviews,
                })
            }
            BarberAction::RecordBooking => {
                self.total_bookings += 1;
                Ok(BarberActionResult::RecordBooking(self.total_bookings))
            }
        }
    }
}
