use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::barber_actor::{BarberAction, BarberActionResult, BarberError};
use crate::domain::{AvailabilityWindow, Barber, BarberCreate, BarberPatch};

/// Client for the Barber record actor.
#[derive(Clone)]
pub struct BarberClient {
    inner: ResourceClient<Barber>,
}

crate::impl_basic_client!(BarberClient, Barber, BarberError, barber);

fn unexpected() -> BarberError {
    BarberError::ActorCommunicationError("Unexpected result".to_string())
}

impl BarberClient {
    #[instrument(skip(self, barber), fields(code = %barber.code))]
    pub async fn create_barber(&self, barber: BarberCreate) -> Result<String, BarberError> {
        debug!("Sending request");
        self.inner.create(barber).await
    }

    #[instrument(skip(self))]
    pub async fn update_barber(&self, id: &str, patch: BarberPatch) -> Result<Barber, BarberError> {
        debug!("Sending request");
        self.inner.update(id.to_string(), patch).await
    }

    #[instrument(skip(self))]
    pub async fn set_online(&self, id: &str, is_online: bool) -> Result<bool, BarberError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), BarberAction::SetOnline(is_online)).await? {
            BarberActionResult::SetOnline(value) => Ok(value),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self, windows), fields(window_count = windows.len()))]
    pub async fn replace_availability(
        &self,
        id: &str,
        windows: Vec<AvailabilityWindow>,
    ) -> Result<Vec<AvailabilityWindow>, BarberError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id.to_string(), BarberAction::ReplaceAvailability(windows))
            .await?
        {
            BarberActionResult::ReplaceAvailability(stored) => Ok(stored),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn record_review(&self, id: &str, rating: u8) -> Result<(f64, u32), BarberError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), BarberAction::RecordReview(rating)).await? {
            BarberActionResult::RecordReview {
                rating_avg,
                total_reviews,
            } => Ok((rating_avg, total_reviews)),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn record_booking(&self, id: &str) -> Result<u32, BarberError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), BarberAction::RecordBooking).await? {
            BarberActionResult::RecordBooking(total) => Ok(total),
            _ => Err(unexpected()),
        }
    }
}
