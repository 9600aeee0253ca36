//! Scene-level errors

use crate::animation::AnimationError;
use crate::ecs::EntityId;
use thiserror::Error;

/// Result type of every scene callback
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while ticking or drawing a scene
///
/// The scheduler and the render pass never swallow these: the first error
/// aborts the rest of the tick or frame and is handed back to the driver.
#[derive(Error, Debug)]
pub enum SceneError {
    /// An entity's one-time initialization failed; it will not be retried
    #[error("Entity {entity} failed to initialize: {source}")]
    Initialization {
        /// Entity whose initializer failed
        entity: EntityId,
        /// Error returned by the initializer
        #[source]
        source: Box<SceneError>,
    },

    /// A tick, task or collision callback failed
    #[error("Callback error: {0}")]
    Callback(String),

    /// A drawing callback failed
    #[error("Draw error: {0}")]
    Draw(String),

    /// Insertion index past the end of the entity list
    #[error("Index {index} out of bounds for {len} entities")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Current number of entities
        len: usize,
    },

    /// Keyframe animation precondition violated
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),
}

impl SceneError {
    /// Convenience constructor for callback failures
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }

    /// Convenience constructor for drawing failures
    pub fn draw(message: impl Into<String>) -> Self {
        Self::Draw(message.into())
    }
}
