//! Request envelope sent from [`ResourceClient`](super::ResourceClient) to
//! [`ResourceActor`](super::ResourceActor).

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// CRUD plus `List` plus an entity-specific `Action`.
///
/// Every variant is typed by the entity's associated types, so a payload for
/// one entity cannot be sent to another entity's actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    /// Every entity, in creation order.
    List { respond_to: Response<Vec<T>> },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Operation name, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
            ResourceRequest::List { .. } => "list",
            ResourceRequest::Action { .. } => "action",
        }
    }
}
