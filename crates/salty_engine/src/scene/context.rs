//! Per-tick callback context

use super::task::{DrawingRoutine, FixedTask, RoutineId, TaskId};
use crate::ecs::{Entity, EntityId};
use std::fmt;

/// Data handed to every callback during one tick
///
/// Callbacks run while the scene's registry is locked, and that lock is not
/// reentrant: calling [`Scene`](super::Scene) methods from inside a callback
/// is unsupported and blocks the tick. Callbacks register and unregister
/// through the context instead.
///
/// Spawned entities join the registry right after the callback returns and
/// are visited later in the same tick. Despawns, and every task or drawing
/// routine change, are applied once every entity has been visited, so a new
/// task first runs on the next tick.
pub struct TickContext {
    tick: u64,
    gravity: f32,
    friction: f32,
    spawned: Vec<Entity>,
    despawned: Vec<EntityId>,
    added_tasks: Vec<(TaskId, Box<dyn FixedTask>)>,
    removed_tasks: Vec<TaskId>,
    added_routines: Vec<(RoutineId, Box<dyn DrawingRoutine>)>,
    removed_routines: Vec<RoutineId>,
}

/// Task and routine changes requested during a tick
#[derive(Default)]
pub(crate) struct PendingChanges {
    pub(crate) added_tasks: Vec<(TaskId, Box<dyn FixedTask>)>,
    pub(crate) removed_tasks: Vec<TaskId>,
    pub(crate) added_routines: Vec<(RoutineId, Box<dyn DrawingRoutine>)>,
    pub(crate) removed_routines: Vec<RoutineId>,
}

impl fmt::Debug for TickContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickContext")
            .field("tick", &self.tick)
            .field("gravity", &self.gravity)
            .field("friction", &self.friction)
            .field("spawned", &self.spawned.len())
            .field("despawned", &self.despawned)
            .field("added_tasks", &self.added_tasks.len())
            .field("removed_tasks", &self.removed_tasks)
            .field("added_routines", &self.added_routines.len())
            .field("removed_routines", &self.removed_routines)
            .finish()
    }
}

impl TickContext {
    /// Create a context for tick number `tick`
    pub fn new(tick: u64, gravity: f32, friction: f32) -> Self {
        Self {
            tick,
            gravity,
            friction,
            spawned: Vec::new(),
            despawned: Vec::new(),
            added_tasks: Vec::new(),
            removed_tasks: Vec::new(),
            added_routines: Vec::new(),
            removed_routines: Vec::new(),
        }
    }

    /// Number of the running tick, starting at 0
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Scene gravity as of the start of the tick
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Scene friction as of the start of the tick
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Register an entity with the scene
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        self.spawned.push(entity);
        id
    }

    /// Unregister an entity at the end of the tick; unknown IDs are ignored
    pub fn despawn(&mut self, id: EntityId) {
        self.despawned.push(id);
    }

    /// Register a periodic task at the end of the tick
    ///
    /// The ID is valid immediately, so the same tick may remove it again.
    pub fn add_fixed_task(&mut self, task: impl FixedTask + 'static) -> TaskId {
        let id = TaskId::next();
        self.added_tasks.push((id, Box::new(task)));
        id
    }

    /// Unregister a task at the end of the tick; unknown IDs are ignored
    pub fn remove_fixed_task(&mut self, id: TaskId) {
        self.removed_tasks.push(id);
    }

    /// Register a drawing routine at the end of the tick
    pub fn add_drawing_routine(&mut self, routine: impl DrawingRoutine + 'static) -> RoutineId {
        let id = RoutineId::next();
        self.added_routines.push((id, Box::new(routine)));
        id
    }

    /// Unregister a drawing routine at the end of the tick; unknown IDs are ignored
    pub fn remove_drawing_routine(&mut self, id: RoutineId) {
        self.removed_routines.push(id);
    }

    pub(crate) fn take_spawned(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.spawned)
    }

    pub(crate) fn take_despawned(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.despawned)
    }

    pub(crate) fn take_pending(&mut self) -> PendingChanges {
        PendingChanges {
            added_tasks: std::mem::take(&mut self.added_tasks),
            removed_tasks: std::mem::take(&mut self.removed_tasks),
            added_routines: std::mem::take(&mut self.added_routines),
            removed_routines: std::mem::take(&mut self.removed_routines),
        }
    }
}
