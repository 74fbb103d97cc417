//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior and
//! answer on the supplied responder.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// No actor runs behind the client: the test plays the actor's part, which makes
/// failures and odd replies easy to simulate.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barber_actor::{BarberAction, BarberActionResult, BarberError};
    use crate::clients::BarberClient;
    use crate::domain::{Barber, BarberCreate};
    use chrono::Utc;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Barber>(10);
        let client = BarberClient::new(client);

        let create_task = tokio::spawn(async move {
            client
                .create_barber(BarberCreate {
                    code: "BRB-7".to_string(),
                    name: "Test".to_string(),
                    email: None,
                    phone: None,
                    commission_rate: None,
                    availability: Vec::new(),
                    created_at: Utc::now(),
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.code, "BRB-7");
        responder.send(Ok("barber_1".to_string())).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok("barber_1".to_string()));
    }

    #[tokio::test]
    async fn test_mismatched_action_result_is_an_error() {
        let (client, mut receiver) = create_mock_client::<Barber>(10);
        let client = BarberClient::new(client);

        let task = tokio::spawn(async move { client.set_online("barber_1", true).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "barber_1");
        assert!(matches!(action, BarberAction::SetOnline(true)));
        responder.send(Ok(BarberActionResult::RecordBooking(3))).unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(BarberError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_dropped_responder_surfaces_as_communication_error() {
        let (client, mut receiver) = create_mock_client::<Barber>(10);
        let client = BarberClient::new(client);

        let task = tokio::spawn(async move { client.get_barber("barber_9").await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "barber_9");
        drop(responder);

        assert!(matches!(
            task.await.unwrap(),
            Err(BarberError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_require_missing_barber_is_not_found() {
        let (client, mut receiver) = create_mock_client::<Barber>(10);
        let client = BarberClient::new(client);

        let task = tokio::spawn(async move { client.require_barber("barber_9").await });

        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        responder.send(Ok(None)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(BarberError::NotFound("Barber barber_9".to_string()))
        );
    }
}
