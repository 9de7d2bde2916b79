use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, instrument};

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::metrics::{aggregate_with_hours, BusinessHours, Report, ReportWindow};
use crate::model::{OrderCreate, OrderId, OrderRecord, OrderState, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::pricing::Receipt;

/// Client for the order store.
///
/// Validation of the payload happens in the actor's `from_create_params`, so
/// a rejected order comes back as [`OrderError::Rejected`] carrying every
/// validation error.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<OrderRecord>,
    hours: BusinessHours,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<OrderRecord>) -> Self {
        Self {
            inner,
            hours: BusinessHours::default(),
        }
    }

    /// Sets the hours covered by all-time reports.
    pub fn with_business_hours(mut self, hours: BusinessHours) -> Self {
        self.hours = hours;
        self
    }

    /// Persists a confirmed order and returns its id.
    #[instrument(skip(self, payload), fields(items = payload.len()))]
    pub async fn place_order(&self, payload: OrderState) -> Result<OrderId, OrderError> {
        debug!(?payload, "place_order called");
        let id = self
            .inner
            .create(OrderCreate { payload })
            .await
            .map_err(Self::map_error)?;
        info!(%id, "Order placed");
        Ok(id)
    }

    /// Fetches an order, failing with [`OrderError::NotFound`] when absent.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<OrderRecord, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Moves the order one step forward and returns the new status.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        match self.action(id, OrderAction::Advance).await? {
            OrderActionResult::Advance(status) => Ok(status),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Writes a status directly, without the advance ordering.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<OrderRecord, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn receipt(&self, id: OrderId) -> Result<Receipt, OrderError> {
        debug!("Sending request");
        match self.action(id, OrderAction::Receipt).await? {
            OrderActionResult::Receipt(receipt) => Ok(receipt),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Every stored order, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrderError> {
        let mut orders = self.list().await?;
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(orders)
    }

    /// Aggregates the stored orders for `window` as seen from `clock`.
    #[instrument(skip(self, clock))]
    pub async fn report(
        &self,
        window: ReportWindow,
        clock: DateTime<FixedOffset>,
    ) -> Result<Report, OrderError> {
        let orders = self.list_orders().await?;
        let report = aggregate_with_hours(&orders, window, clock, self.hours);
        info!(
            %window,
            orders = report.total_orders,
            revenue = %report.total_revenue,
            "Report built"
        );
        Ok(report)
    }

    async fn action(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    fn unexpected(result: OrderActionResult) -> OrderError {
        OrderError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
    }
}

#[async_trait]
impl ActorClient<OrderRecord> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<OrderRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
