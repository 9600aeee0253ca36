//! Periodic state dump

use super::FixedRate;
use crate::ecs::{Component, ComponentStatus, EntityState};
use crate::foundation::math::Rect;
use crate::render::{Color, Surface};
use crate::scene::{SceneResult, TickContext};

/// Logs the parent's state at debug level every `gate + 1` ticks
///
/// Also draws a small red marker above the parent's top-left corner so the
/// logged entity can be found on screen.
#[derive(Debug, Clone)]
pub struct DebugStats {
    rate: FixedRate,
}

impl DebugStats {
    /// Component name
    pub const NAME: &'static str = "debug_stats";

    /// Ticks skipped between dumps by default
    pub const DEFAULT_GATE: u32 = 100;

    /// Create the component with the default gate
    pub fn new() -> Self {
        Self::with_gate(Self::DEFAULT_GATE)
    }

    /// Create the component with a custom gate
    pub fn with_gate(gate: u32) -> Self {
        Self {
            rate: FixedRate::new(gate),
        }
    }

    /// Change the gate
    pub fn set_gate(&mut self, gate: u32) {
        self.rate.set_gate(gate);
    }
}

impl Default for DebugStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DebugStats {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_fixed_tick(&mut self, parent: &mut EntityState, ctx: &mut TickContext) -> SceneResult<ComponentStatus> {
        if self.rate.tick() {
            let transform = &parent.transform;
            log::debug!(
                "[tick {}] {} '{}': x = {}, y = {}, width = {}, height = {}, rotation = {} deg, gravity = {}",
                ctx.tick(),
                parent.id(),
                parent.tag,
                transform.x(),
                transform.y(),
                transform.width(),
                transform.height(),
                transform.rotation.degrees(),
                parent.gravity_enabled,
            );
        }
        Ok(ComponentStatus::Keep)
    }

    fn draw(&self, parent: &EntityState, surface: &mut dyn Surface) -> SceneResult<()> {
        let marker = Rect::new(parent.transform.x() - 20.0, parent.transform.y() - 20.0, 20.0, 20.0);
        surface.fill_rect(marker, Color::RED);
        Ok(())
    }
}
