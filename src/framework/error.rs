//! Errors raised by the actor plumbing, as opposed to the entity's own rules.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A hook on the entity refused the request.
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from [`FrameworkError::EntityError`].
    pub fn into_entity_error<E: std::error::Error + 'static>(self) -> Result<E, Self> {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(inner) => Err(FrameworkError::EntityError(inner)),
            },
            other => Err(other),
        }
    }
}
