//! The client half of the store.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// Cloneable handle to a [`ResourceActor`](super::ResourceActor).
///
/// Every call sends one request and awaits its one-shot reply. A send failure
/// means the actor has stopped ([`FrameworkError::ActorClosed`]); a dropped
/// reply means it stopped mid-request ([`FrameworkError::ActorDropped`]).
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T> + Send,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
