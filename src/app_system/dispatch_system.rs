use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{BarberClient, OrderClient};
use crate::clock::Clock;
use crate::dispatch::DispatchService;
use crate::domain::{Barber, Order};
use crate::notifications::{NotificationDispatcher, Notifier};

use super::DispatchConfig;

/// Sequential ids of the form `{prefix}_{n}`, starting at 1.
fn id_sequence(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{prefix}_{}", counter.fetch_add(1, Ordering::SeqCst))
}

/// Owns the record actors and hands out the clients and the request handlers.
pub struct DispatchSystem {
    pub order_client: OrderClient,
    pub barber_client: BarberClient,
    pub service: DispatchService,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DispatchSystem {
    /// Start the order and barber actors. Must be called inside a tokio runtime.
    pub fn new(config: DispatchConfig, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        let config = Arc::new(config);

        let (barber_actor, barber_resource_client) =
            ResourceActor::<Barber>::new(config.actor_buffer_size, id_sequence("barber"));
        let barber_client = BarberClient::new(barber_resource_client);
        let barber_handle = tokio::spawn(barber_actor.run());

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.actor_buffer_size, id_sequence("order"));
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        let notifications = NotificationDispatcher::new(notifier, config.notification_timeout);
        let service = DispatchService::new(
            order_client.clone(),
            barber_client.clone(),
            notifications,
            clock,
            Arc::clone(&config),
        );

        info!(timezone = %config.timezone, "Dispatch system started");
        Self {
            order_client,
            barber_client,
            service,
            handles: vec![barber_handle, order_handle],
        }
    }

    /// Drop every client so the actors see their channels close, then wait for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.service);
        drop(self.order_client);
        drop(self.barber_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
