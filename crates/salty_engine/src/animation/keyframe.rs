//! Linear keyframe interpolation
//!
//! A [`LinearKeyframeAnimation`] turns a sparse set of `(timing, value)`
//! control points into a dense table of per-tick deltas. The table is built
//! once by [`LinearKeyframeAnimation::calculate_animation`] and then consumed
//! one delta per tick, so animators only ever add a delta to their attribute.
//!
//! ```rust
//! use salty_engine::animation::LinearKeyframeAnimation;
//!
//! let mut animation = LinearKeyframeAnimation::new();
//! animation.add(4, 8.0);
//! animation.calculate_animation().unwrap();
//!
//! let total: f32 = (0..4).map(|_| animation.next_delta().unwrap()).sum();
//! assert!((total - 8.0).abs() < 1e-5);
//! assert!(animation.animation_ended());
//! ```

use thiserror::Error;

/// A control point of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Tick offset from the start of the animation
    pub timing: u32,

    /// Absolute value at `timing`
    pub value: f32,
}

impl Keyframe {
    /// Create a keyframe
    pub const fn new(timing: u32, value: f32) -> Self {
        Self { timing, value }
    }
}

/// Keyframe animation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Interpolation needs a start and an end point
    #[error("At least 2 keyframes are required to calculate an animation, got {0}")]
    NotEnoughKeyframes(usize),

    /// Deltas were requested before the table was built
    #[error("Animation deltas requested before calculate_animation()")]
    NotCalculated,
}

/// Piecewise-linear keyframe animation producing per-tick deltas
#[derive(Debug, Clone)]
pub struct LinearKeyframeAnimation {
    keyframes: Vec<Keyframe>,
    /// Relative values only: `deltas[t]` is the change applied at tick `t`
    deltas: Vec<f32>,
    end: u32,
    /// Number of deltas handed out since the last restart
    consumed: u32,
    calculated: bool,
    dirty: bool,
}

impl Default for LinearKeyframeAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearKeyframeAnimation {
    /// Create an animation containing only the origin keyframe `(0, 0.0)`
    pub fn new() -> Self {
        Self::with_keyframes(Vec::new())
    }

    /// Create an animation from existing keyframes plus the origin `(0, 0.0)`
    ///
    /// Later keyframes win over earlier ones with the same timing, and the
    /// origin only fills in when no keyframe at timing 0 was given.
    pub fn with_keyframes(keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut animation = Self {
            keyframes: vec![Keyframe::new(0, 0.0)],
            deltas: Vec::new(),
            end: 0,
            consumed: 0,
            calculated: false,
            dirty: true,
        };
        for keyframe in keyframes {
            animation.add_keyframe(keyframe);
        }
        animation
    }

    /// All keyframes in insertion order (sorted after a calculation)
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Add a keyframe; an existing keyframe with the same timing is overwritten
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        match self.keyframes.iter_mut().find(|k| k.timing == keyframe.timing) {
            Some(existing) => existing.value = keyframe.value,
            None => self.keyframes.push(keyframe),
        }
        self.dirty = true;
    }

    /// Add a keyframe at `timing` with `value`
    pub fn add(&mut self, timing: u32, value: f32) {
        self.add_keyframe(Keyframe::new(timing, value));
    }

    /// Remove a keyframe equal to `keyframe`
    pub fn remove(&mut self, keyframe: &Keyframe) {
        self.retain(|k| k != keyframe);
    }

    /// Remove the keyframe at `timing`
    pub fn remove_by_timing(&mut self, timing: u32) {
        self.retain(|k| k.timing != timing);
    }

    /// Remove every keyframe whose value equals `value`
    #[allow(clippy::float_cmp)]
    pub fn remove_by_value(&mut self, value: f32) {
        self.retain(|k| k.value != value);
    }

    fn retain(&mut self, keep: impl FnMut(&Keyframe) -> bool) {
        let before = self.keyframes.len();
        self.keyframes.retain(keep);
        if self.keyframes.len() != before {
            self.dirty = true;
        }
    }

    /// Whether keyframes changed since the table was last built
    pub fn needs_recalculation(&self) -> bool {
        self.dirty
    }

    /// Sort the keyframes and rebuild the delta table
    ///
    /// Resets the cursor, so the next [`next_delta`](Self::next_delta) returns
    /// the first entry of the new table.
    pub fn calculate_animation(&mut self) -> Result<(), AnimationError> {
        if self.keyframes.len() < 2 {
            return Err(AnimationError::NotEnoughKeyframes(self.keyframes.len()));
        }

        // Stable sort keeps insertion order for equal timings
        self.keyframes.sort_by_key(|k| k.timing);
        self.end = self.keyframes[self.keyframes.len() - 1].timing;

        self.deltas.clear();
        self.deltas.resize(self.end as usize, 0.0);

        for pair in self.keyframes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let duration = to.timing - from.timing;
            let step = (to.value - from.value) / duration as f32;
            self.deltas[from.timing as usize..to.timing as usize].fill(step);
        }

        self.consumed = 0;
        self.calculated = true;
        self.dirty = false;
        Ok(())
    }

    /// Next per-tick delta
    ///
    /// Returns `0.0` without advancing once the animation has ended.
    pub fn next_delta(&mut self) -> Result<f32, AnimationError> {
        if !self.calculated {
            return Err(AnimationError::NotCalculated);
        }

        if self.animation_ended() {
            return Ok(0.0);
        }

        let delta = self.deltas[self.consumed as usize];
        self.consumed += 1;
        Ok(delta)
    }

    /// Whether all deltas up to the last keyframe have been handed out
    pub fn animation_ended(&self) -> bool {
        self.consumed >= self.end
    }

    /// Rewind to the start, reusing the calculated table
    pub fn restart(&mut self) {
        self.consumed = 0;
    }

    /// Tick index of the last delta handed out, `None` right after a restart
    pub fn current_frame(&self) -> Option<u32> {
        self.consumed.checked_sub(1)
    }

    /// Move the cursor so the next delta is the one after `frame`
    ///
    /// `None` rewinds like [`restart`](Self::restart); frames past the end
    /// clamp to the end.
    pub fn set_current_frame(&mut self, frame: Option<u32>) {
        self.consumed = frame.map_or(0, |f| f.saturating_add(1).min(self.end));
    }

    /// Timing of the last keyframe, as of the last calculation
    pub fn end(&self) -> u32 {
        self.end
    }
}
