use std::sync::Arc;
use tracing::{error, info};

use crate::clients::OrderClient;
use crate::config::EngineConfig;
use crate::order_actor::{Clock, OrderContext, SystemClock};

/// Owns the running order store and hands out its client.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(&EngineConfig::default());
/// let id = system.order_client.place_order(state).await?;
/// system.order_client.advance(id).await?;
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for the order store. Clone it freely.
    pub order_client: OrderClient,

    /// Task handles for the running actors (awaited on shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the order store on the system clock. Must be called inside a
    /// Tokio runtime.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Starts the order store with an injected clock.
    pub fn with_clock(config: &EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let (order_actor, order_client) = crate::order_actor::new(config.store_buffer);
        let order_client = order_client.with_business_hours(config.business_hours());

        let order_handle = tokio::spawn(order_actor.run(OrderContext::new(clock)));
        info!(buffer = config.store_buffer, "Order system started");

        Self {
            order_client,
            handles: vec![order_handle],
        }
    }

    /// Drops the client and waits for every actor to drain its queue.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);

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
