//! Periodic tasks and drawing routines

use super::{SceneResult, TickContext};
use crate::render::Surface;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_ROUTINE_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a registered [`FixedTask`], unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Identifier of a registered [`DrawingRoutine`], unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutineId(pub(crate) u64);

impl RoutineId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ROUTINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RoutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "routine#{}", self.0)
    }
}

/// Callback run once per tick before any entity
pub trait FixedTask: Send {
    /// Run the task
    fn on_fixed_tick(&mut self, ctx: &mut TickContext) -> SceneResult<()>;

    /// Human-readable label for logs
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Periodic task made from a closure, see [`task_fn`]
pub struct TaskFn<F> {
    label: String,
    run: F,
}

impl<F> FixedTask for TaskFn<F>
where
    F: FnMut(&mut TickContext) -> SceneResult<()> + Send,
{
    fn on_fixed_tick(&mut self, ctx: &mut TickContext) -> SceneResult<()> {
        (self.run)(ctx)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Wrap a closure as a periodic task, labelled for logs
pub fn task_fn<F>(label: impl Into<String>, run: F) -> TaskFn<F>
where
    F: FnMut(&mut TickContext) -> SceneResult<()> + Send,
{
    TaskFn {
        label: label.into(),
        run,
    }
}

/// Where a drawing routine runs within the render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawingPosition {
    /// Before any entity, e.g. backgrounds
    BeforeEntities,
    /// After the UI and effects, below the lighting
    AfterEntities,
}

/// Callback run once per render pass
pub trait DrawingRoutine: Send {
    /// Phase of the render pass this routine belongs to
    fn drawing_position(&self) -> DrawingPosition;

    /// Draw
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()>;
}

/// Drawing routine made from a closure, see [`routine_fn`]
pub struct RoutineFn<F> {
    position: DrawingPosition,
    draw: F,
}

impl<F> DrawingRoutine for RoutineFn<F>
where
    F: Fn(&mut dyn Surface) -> SceneResult<()> + Send,
{
    fn drawing_position(&self) -> DrawingPosition {
        self.position
    }

    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        (self.draw)(surface)
    }
}

/// Wrap a closure as a drawing routine at `position`
pub fn routine_fn<F>(position: DrawingPosition, draw: F) -> RoutineFn<F>
where
    F: Fn(&mut dyn Surface) -> SceneResult<()> + Send,
{
    RoutineFn { position, draw }
}
