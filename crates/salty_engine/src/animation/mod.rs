//! Keyframe animation
//!
//! [`LinearKeyframeAnimation`] precomputes per-tick deltas from sparse
//! keyframes; [`EntityAnimation`] applies them to an entity attribute.

pub mod entity_animation;
pub mod keyframe;

pub use entity_animation::{AnimationControl, EntityAnimation};
pub use keyframe::{AnimationError, Keyframe, LinearKeyframeAnimation};
