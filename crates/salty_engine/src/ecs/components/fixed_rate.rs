//! Tick gate

use crate::ecs::{Component, ComponentStatus, EntityState};
use crate::scene::{SceneResult, TickContext};

/// Opens once every `gate + 1` ticks
///
/// Call [`tick`](Self::tick) once per fixed tick; [`now`](Self::now) then
/// reports whether the gate opened on that tick. Attached to an entity as a
/// component it ticks itself, before the entity's behavior runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRate {
    gate: u32,
    ticks: u32,
    now: bool,
}

impl FixedRate {
    /// Component name
    pub const NAME: &'static str = "fixed_rate";

    /// Create a gate that skips `gate` ticks between openings
    pub const fn new(gate: u32) -> Self {
        Self {
            gate,
            ticks: 0,
            now: false,
        }
    }

    /// Advance by one tick and return whether the gate opened
    pub fn tick(&mut self) -> bool {
        if self.ticks >= self.gate {
            self.now = true;
            self.ticks = 0;
        } else {
            self.now = false;
            self.ticks += 1;
        }
        self.now
    }

    /// Whether the gate opened on the last tick
    pub fn now(&self) -> bool {
        self.now
    }

    /// Number of skipped ticks between openings
    pub fn gate(&self) -> u32 {
        self.gate
    }

    /// Change the gate; the running count is kept
    pub fn set_gate(&mut self, gate: u32) {
        self.gate = gate;
    }
}

impl Component for FixedRate {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_fixed_tick(&mut self, _parent: &mut EntityState, _ctx: &mut TickContext) -> SceneResult<ComponentStatus> {
        self.tick();
        Ok(ComponentStatus::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{EmptyBehavior, Entity};
    use crate::foundation::math::Transform2D;

    #[test]
    fn test_opens_every_gate_plus_one_ticks() {
        let mut rate = FixedRate::new(2);
        let openings: Vec<bool> = (0..7).map(|_| rate.tick()).collect();
        assert_eq!(openings, vec![false, false, true, false, false, true, false]);
        assert!(!rate.now());
    }

    #[test]
    fn test_zero_gate_opens_every_tick() {
        let mut rate = FixedRate::new(0);
        assert!(rate.tick());
        assert!(rate.tick());
        assert!(rate.now());
    }

    #[test]
    fn test_component_ticks_itself_and_stays_attached() {
        let mut rate = FixedRate::new(1);
        let mut entity = Entity::new("gated", Transform2D::default(), EmptyBehavior);
        let mut ctx = TickContext::new(0, 0.0, 0.0);

        let first = Component::on_fixed_tick(&mut rate, entity.state_mut(), &mut ctx).unwrap();
        let second = Component::on_fixed_tick(&mut rate, entity.state_mut(), &mut ctx).unwrap();
        assert_eq!(first, ComponentStatus::Keep);
        assert_eq!(second, ComponentStatus::Keep);
        assert!(rate.now());

        entity.add_component(rate);
        for _ in 0..3 {
            entity.fixed_tick(&mut ctx).unwrap();
        }
        assert_eq!(entity.component_names().collect::<Vec<_>>(), vec![FixedRate::NAME]);
    }
}
