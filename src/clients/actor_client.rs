use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Shared surface of the domain clients: `get`, `delete` and `list` come for
/// free once a client exposes its inner [`ResourceClient`] and says how to
/// translate framework errors.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Every entity, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
