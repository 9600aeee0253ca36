//! Component trait
//!
//! Components are attachments on an entity that take part in the tick, the
//! render pass and collision handling next to the entity's own behavior.

use super::entity::{CollisionEvent, EntityState};
use crate::render::Surface;
use crate::scene::{SceneResult, TickContext};

/// What the scheduler should do with a component after its tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    /// Keep the component attached
    Keep,
    /// Detach and drop the component
    Remove,
}

/// An attachment driven by its parent entity
///
/// Disabled components are skipped by ticks, collisions and drawing but stay
/// attached.
pub trait Component: Send {
    /// Name used to find and remove the component
    fn name(&self) -> &str;

    /// Whether the component currently takes part in callbacks
    fn is_enabled(&self) -> bool {
        true
    }

    /// Runs once per tick, before the parent's own tick
    fn on_fixed_tick(&mut self, parent: &mut EntityState, ctx: &mut TickContext) -> SceneResult<ComponentStatus>;

    /// Draws after the parent, with the parent's rotation applied
    fn draw(&self, _parent: &EntityState, _surface: &mut dyn Surface) -> SceneResult<()> {
        Ok(())
    }

    /// Runs after the parent's collision callback for every overlap
    fn on_collision(&mut self, _parent: &mut EntityState, _event: &CollisionEvent) -> SceneResult<()> {
        Ok(())
    }
}
