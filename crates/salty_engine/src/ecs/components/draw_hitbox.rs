//! Hitbox overlay

use crate::ecs::{Component, ComponentStatus, EntityState};
use crate::render::{Color, Surface};
use crate::scene::{SceneResult, TickContext};

/// Fills the parent's hitbox with a translucent color, for debugging collisions
#[derive(Debug, Clone)]
pub struct DrawHitbox {
    name: String,
    color: Color,
    enabled: bool,
}

impl DrawHitbox {
    /// Component name used when none is given
    pub const DEFAULT_NAME: &'static str = "draw_hitbox";

    /// Create the component with the default translucent red
    pub fn new() -> Self {
        Self::with_color(Color::RED.with_alpha(0.25))
    }

    /// Create the component with a custom fill color
    pub fn with_color(color: Color) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            color,
            enabled: true,
        }
    }

    /// Show or hide the overlay
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for DrawHitbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DrawHitbox {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn on_fixed_tick(&mut self, _parent: &mut EntityState, _ctx: &mut TickContext) -> SceneResult<ComponentStatus> {
        Ok(ComponentStatus::Keep)
    }

    fn draw(&self, parent: &EntityState, surface: &mut dyn Surface) -> SceneResult<()> {
        surface.fill_rect(parent.hitbox(), self.color);
        Ok(())
    }
}
