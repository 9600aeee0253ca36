//! Entity and component model
//!
//! Entities are owned by a scene and dispatched through the [`Behavior`] and
//! [`Component`] capability traits.

pub mod component;
pub mod components;
mod entity;

pub use component::{Component, ComponentStatus};
pub use entity::{Behavior, CollisionEvent, EmptyBehavior, Entity, EntityId, EntityState};
