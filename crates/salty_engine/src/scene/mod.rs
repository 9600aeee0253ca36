//! Scene: registry, fixed-tick scheduler and render pass
//!
//! A [`Scene`] owns the entities, periodic tasks and drawing routines of one
//! level, plus its simulation parameters and optional UI, effects and
//! lighting. It is `Send + Sync` and meant to be shared as `Arc<Scene>`
//! between a fixed-tick driver calling [`Scene::on_fixed_tick`] and a render
//! loop calling [`Scene::draw`].
//!
//! All structural changes to the three registry lists go through one lock,
//! so neither loop ever sees a list mid-mutation. The lock is held while
//! tick callbacks run and is not reentrant: calling `Scene` methods from a
//! callback is unsupported and blocks the tick. Callbacks register and
//! unregister entities, tasks and drawing routines through their
//! [`TickContext`] instead.

mod context;
mod error;
mod registry;
mod scene_renderer;
mod scheduler;
mod task;


pub use context::TickContext;
pub use error::{SceneError, SceneResult};
pub use task::{routine_fn, task_fn, DrawingPosition, DrawingRoutine, FixedTask, RoutineFn, RoutineId, TaskFn, TaskId};

use crate::config::SceneConfig;
use crate::ecs::{Entity, EntityId};
use crate::render::{Effect, EffectsSystem, GfxController, LightingComposite, UiOverlay};
use registry::Registry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

/// Scalar simulation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
struct SceneParams {
    gravity: f32,
    friction: f32,
}

/// One level of the game
pub struct Scene {
    registry: Mutex<Registry>,
    params: RwLock<SceneParams>,
    ui: Mutex<Option<Box<dyn UiOverlay>>>,
    lighting: Mutex<Option<Box<dyn LightingComposite>>>,
    effects: Mutex<Box<dyn EffectsSystem>>,
    ticks: AtomicU64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("entities", &self.entity_count())
            .field("tasks", &self.fixed_task_count())
            .field("routines", &self.drawing_routine_count())
            .field("ticks", &self.tick_count())
            .finish_non_exhaustive()
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
///
/// Every structural operation completes before its guard drops, so a poisoned
/// lock still guards consistent lists.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Scene {
    /// Create an empty scene with default parameters
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene from settings
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            params: RwLock::new(SceneParams {
                gravity: config.gravity,
                friction: config.friction,
            }),
            ui: Mutex::new(None),
            lighting: Mutex::new(None),
            effects: Mutex::new(Box::new(GfxController::new())),
            ticks: AtomicU64::new(0),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        lock(&self.registry)
    }

    fn params(&self) -> SceneParams {
        *self.params.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_params(&self, update: impl FnOnce(&mut SceneParams)) {
        update(&mut *self.params.write().unwrap_or_else(PoisonError::into_inner));
    }

    // Entities

    /// Register an entity after the existing ones
    pub fn add_entity(&self, entity: Entity) -> EntityId {
        self.registry().add_entity(entity)
    }

    /// Register an entity at `index`, shifting later ones back
    ///
    /// `index == entity_count()` appends; anything larger is an error and the
    /// entity is dropped.
    pub fn insert_entity(&self, index: usize, entity: Entity) -> SceneResult<EntityId> {
        self.registry().insert_entity(index, entity)
    }

    /// Unregister an entity, handing it back; unknown IDs are a no-op
    pub fn remove_entity(&self, id: EntityId) -> Option<Entity> {
        self.registry().remove_entity(id)
    }

    /// Unregister all entities
    pub fn clear_entities(&self) {
        self.registry().entities.clear();
    }

    /// Number of registered entities
    pub fn entity_count(&self) -> usize {
        self.registry().entities.len()
    }

    /// IDs of all registered entities, in order
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.registry().entities.iter().map(Entity::id).collect()
    }

    /// Inspect an entity under the registry lock
    pub fn with_entity<R>(&self, id: EntityId, f: impl FnOnce(&Entity) -> R) -> Option<R> {
        self.registry().entity(id).map(f)
    }

    /// Mutate an entity under the registry lock
    ///
    /// This is the only way to change an entity from outside its own
    /// callbacks. Do not call back into the scene from `f`.
    pub fn with_entity_mut<R>(&self, id: EntityId, f: impl FnOnce(&mut Entity) -> R) -> Option<R> {
        self.registry().entity_mut(id).map(f)
    }

    /// Turn gravity on or off for every registered entity
    pub fn set_gravity_enabled(&self, enabled: bool) {
        for entity in &mut self.registry().entities {
            entity.state_mut().gravity_enabled = enabled;
        }
    }

    // Periodic tasks

    /// Register a task run once per tick before the entities
    pub fn add_fixed_task(&self, task: impl FixedTask + 'static) -> TaskId {
        self.registry().add_task(Box::new(task))
    }

    /// Unregister a task; returns whether it was registered
    pub fn remove_fixed_task(&self, id: TaskId) -> bool {
        self.registry().remove_task(id)
    }

    /// Unregister every task matching `predicate`; returns how many were removed
    pub fn remove_fixed_tasks_where(&self, predicate: impl FnMut(TaskId, &dyn FixedTask) -> bool) -> usize {
        self.registry().remove_tasks_where(predicate)
    }

    /// Unregister all tasks
    pub fn clear_fixed_tasks(&self) {
        self.registry().tasks.clear();
    }

    /// Number of registered tasks
    pub fn fixed_task_count(&self) -> usize {
        self.registry().tasks.len()
    }

    // Drawing routines

    /// Register a drawing routine
    pub fn add_drawing_routine(&self, routine: impl DrawingRoutine + 'static) -> RoutineId {
        self.registry().add_routine(Box::new(routine))
    }

    /// Unregister a drawing routine; returns whether it was registered
    pub fn remove_drawing_routine(&self, id: RoutineId) -> bool {
        self.registry().remove_routine(id)
    }

    /// Unregister every routine matching `predicate`; returns how many were removed
    pub fn remove_drawing_routines_where(
        &self,
        predicate: impl FnMut(RoutineId, &dyn DrawingRoutine) -> bool,
    ) -> usize {
        self.registry().remove_routines_where(predicate)
    }

    /// Unregister all drawing routines
    pub fn clear_drawing_routines(&self) {
        self.registry().routines.clear();
    }

    /// Number of registered drawing routines
    pub fn drawing_routine_count(&self) -> usize {
        self.registry().routines.len()
    }

    // Parameters

    /// Gravity magnitude
    pub fn gravity(&self) -> f32 {
        self.params().gravity
    }

    /// Set the gravity magnitude, seen by callbacks from the next tick on
    pub fn set_gravity(&self, gravity: f32) {
        self.update_params(|params| params.gravity = gravity);
    }

    /// Friction coefficient
    pub fn friction(&self) -> f32 {
        self.params().friction
    }

    /// Set the friction coefficient, seen by callbacks from the next tick on
    pub fn set_friction(&self, friction: f32) {
        self.update_params(|params| params.friction = friction);
    }

    /// Number of ticks started so far
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    // Collaborators

    /// Attach a UI overlay, returning the previous one
    pub fn set_ui(&self, ui: impl UiOverlay + 'static) -> Option<Box<dyn UiOverlay>> {
        lock(&self.ui).replace(Box::new(ui))
    }

    /// Detach the UI overlay
    pub fn take_ui(&self) -> Option<Box<dyn UiOverlay>> {
        lock(&self.ui).take()
    }

    /// Whether a UI overlay is attached
    pub fn has_ui(&self) -> bool {
        lock(&self.ui).is_some()
    }

    /// Attach a lighting composite, returning the previous one
    pub fn set_lighting(&self, lighting: impl LightingComposite + 'static) -> Option<Box<dyn LightingComposite>> {
        lock(&self.lighting).replace(Box::new(lighting))
    }

    /// Detach the lighting composite
    pub fn take_lighting(&self) -> Option<Box<dyn LightingComposite>> {
        lock(&self.lighting).take()
    }

    /// Whether a lighting composite is attached
    pub fn has_lighting(&self) -> bool {
        lock(&self.lighting).is_some()
    }

    /// Replace the effects system, returning the previous one
    pub fn set_effects(&self, effects: impl EffectsSystem + 'static) -> Box<dyn EffectsSystem> {
        std::mem::replace(&mut *lock(&self.effects), Box::new(effects))
    }

    /// Hand an effect to the effects system
    pub fn add_effect(&self, effect: impl Effect + 'static) {
        lock(&self.effects).add_effect(Box::new(effect));
    }
}
