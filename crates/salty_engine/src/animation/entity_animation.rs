//! Keyframe-driven attribute animation
//!
//! [`EntityAnimation`] is a component that adds one delta per tick from a
//! [`LinearKeyframeAnimation`] to a single attribute of its parent.

use super::keyframe::{Keyframe, LinearKeyframeAnimation};
use crate::ecs::{Component, ComponentStatus, EntityState};
use crate::scene::{SceneResult, TickContext};

/// Attribute of the parent an [`EntityAnimation`] drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationControl {
    /// Width
    Width,
    /// Height
    Height,
    /// X position
    XPos,
    /// Y position
    YPos,
    /// Rotation in degrees
    Rotation,
}

impl AnimationControl {
    fn apply(self, state: &mut EntityState, delta: f32) {
        let transform = &mut state.transform;
        match self {
            Self::Width => transform.dimensions.width += delta,
            Self::Height => transform.dimensions.height += delta,
            Self::XPos => transform.move_x(delta),
            Self::YPos => transform.move_y(delta),
            Self::Rotation => {
                let degrees = transform.rotation.degrees() + delta;
                transform.rotation.set_degrees(degrees);
            }
        }
    }
}

/// Component animating one attribute of its parent
///
/// The keyframe table is rebuilt lazily on the next tick after keyframes
/// change or after [`start_over`](Self::start_over) / [`stop`](Self::stop).
/// When the animation ends it restarts if looping, otherwise the component
/// removes itself from the parent.
#[derive(Debug, Clone)]
pub struct EntityAnimation {
    name: String,
    control: AnimationControl,
    animation: LinearKeyframeAnimation,
    looping: bool,
    enabled: bool,
    recalculate_on_next_step: bool,
}

impl EntityAnimation {
    /// Create a running, non-looping animation with only the origin keyframe
    pub fn new(name: impl Into<String>, control: AnimationControl) -> Self {
        Self {
            name: name.into(),
            control,
            animation: LinearKeyframeAnimation::new(),
            looping: false,
            enabled: true,
            recalculate_on_next_step: true,
        }
    }

    /// Builder pattern: add a keyframe
    pub fn with_keyframe(mut self, timing: u32, value: f32) -> Self {
        self.add_keyframe(timing, value);
        self
    }

    /// Builder pattern: set looping
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Add a keyframe, picked up on the next tick
    pub fn add_keyframe(&mut self, timing: u32, value: f32) {
        self.animation.add_keyframe(Keyframe::new(timing, value));
    }

    /// Controlled attribute
    pub fn control(&self) -> AnimationControl {
        self.control
    }

    /// Whether the animation restarts when it ends
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Set whether the animation restarts when it ends
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Resume ticking
    pub fn start(&mut self) {
        self.enabled = true;
    }

    /// Suspend ticking, keeping the position
    pub fn pause(&mut self) {
        self.enabled = false;
    }

    /// Suspend ticking and rewind to the start
    pub fn stop(&mut self) {
        self.recalculate_on_next_step = true;
        self.enabled = false;
    }

    /// Rewind to the start on the next tick
    pub fn start_over(&mut self) {
        self.recalculate_on_next_step = true;
    }

    /// Underlying keyframe animation
    pub fn animation(&self) -> &LinearKeyframeAnimation {
        &self.animation
    }
}

impl Component for EntityAnimation {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn on_fixed_tick(&mut self, parent: &mut EntityState, _ctx: &mut TickContext) -> SceneResult<ComponentStatus> {
        if self.recalculate_on_next_step || self.animation.needs_recalculation() {
            self.animation.calculate_animation()?;
            self.recalculate_on_next_step = false;
        }

        if self.animation.animation_ended() {
            if self.looping {
                self.animation.restart();
            } else {
                log::debug!("Animation '{}' of entity {} finished", self.name, parent.id());
                return Ok(ComponentStatus::Remove);
            }
        }

        let delta = self.animation.next_delta()?;
        self.control.apply(parent, delta);
        Ok(ComponentStatus::Keep)
    }
}
