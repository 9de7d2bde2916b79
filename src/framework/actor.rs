//! The server half of the store: a task that owns every entity of one type.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the entities of type `T` and processes requests sequentially.
///
/// The store needs no lock: only the task running [`run`](Self::run) ever
/// touches it. Ids come from a `u32` counter starting at 1 and are never
/// reused, even after a delete.
///
/// ## Operations
///
/// * **Create**: mint an id, `from_create_params`, `on_create`, then store.
///   A failing hook stores nothing but still consumes the id.
/// * **Get**: a clone of the entity, or `None`.
/// * **Update**: `on_update` mutates in place; replies with the new state.
/// * **Delete**: `on_delete`, then remove.
/// * **List**: clones of every entity in creation order.
/// * **Action**: `handle_action` on the stored entity.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    created: Vec<T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and a client for it. `buffer_size` bounds the
    /// channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            created: Vec::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serves requests until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // "OrderRecord" rather than the full module path
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    self.created.push(id.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match item.on_update(update, &context).await {
                        Ok(()) => {
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.created.retain(|existing| existing != &id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .created
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
