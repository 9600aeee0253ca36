//! Global effects system
//!
//! Scene-wide visual effects (screen shake, particles, flashes) that live
//! outside any entity. The scene ticks them after all entities and draws them
//! after the UI overlay.

use super::surface::Surface;
use crate::scene::SceneResult;

/// Scene-wide effects driven once per tick and once per render pass
pub trait EffectsSystem: Send {
    /// Advance all effects by one tick
    fn on_fixed_tick(&mut self) -> SceneResult<()>;

    /// Draw all effects
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()>;

    /// Start running an effect
    fn add_effect(&mut self, effect: Box<dyn Effect>);
}

/// A single effect managed by [`GfxController`]
pub trait Effect: Send {
    /// Advance by one tick; return `false` once the effect is finished
    fn on_fixed_tick(&mut self) -> SceneResult<bool>;

    /// Draw the effect
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()>;
}

/// Default effects system: an ordered list of effects, dropped when finished
#[derive(Default)]
pub struct GfxController {
    effects: Vec<Box<dyn Effect>>,
}

impl GfxController {
    /// Create an empty controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all effects
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Number of running effects
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

impl EffectsSystem for GfxController {
    fn on_fixed_tick(&mut self) -> SceneResult<()> {
        let mut index = 0;
        while index < self.effects.len() {
            if self.effects[index].on_fixed_tick()? {
                index += 1;
            } else {
                self.effects.remove(index);
            }
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        for effect in &self.effects {
            effect.draw(surface)?;
        }
        Ok(())
    }

    /// Effects are drawn in the order they were added
    fn add_effect(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Rect;
    use crate::render::surface::{Color, CommandSurface};

    struct Flash {
        ticks_left: u32,
    }

    impl Effect for Flash {
        fn on_fixed_tick(&mut self) -> SceneResult<bool> {
            self.ticks_left = self.ticks_left.saturating_sub(1);
            Ok(self.ticks_left > 0)
        }

        fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
            surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
            Ok(())
        }
    }

    #[test]
    fn test_finished_effects_are_dropped() {
        let mut controller = GfxController::new();
        controller.add_effect(Box::new(Flash { ticks_left: 1 }));
        controller.add_effect(Box::new(Flash { ticks_left: 3 }));

        controller.on_fixed_tick().unwrap();
        assert_eq!(controller.effect_count(), 1);

        let mut surface = CommandSurface::new(8.0, 8.0);
        controller.draw(&mut surface).unwrap();
        assert_eq!(surface.commands().len(), 1);

        controller.on_fixed_tick().unwrap();
        controller.on_fixed_tick().unwrap();
        assert_eq!(controller.effect_count(), 0);
    }
}
