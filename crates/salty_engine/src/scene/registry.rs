//! Entity registry
//!
//! Three insertion-ordered lists (entities, periodic tasks and drawing
//! routines) owned by a scene and guarded together by the scene's registry
//! lock. Nothing outside the scene gets at the lists directly.

use super::context::PendingChanges;
use super::task::{DrawingRoutine, FixedTask, RoutineId, TaskId};
use super::{SceneError, SceneResult};
use crate::ecs::{Entity, EntityId};

#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) entities: Vec<Entity>,
    pub(crate) tasks: Vec<(TaskId, Box<dyn FixedTask>)>,
    pub(crate) routines: Vec<(RoutineId, Box<dyn DrawingRoutine>)>,
}

impl Registry {
    pub(crate) fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        log::debug!("Registered entity {} ({})", id, entity.tag());
        self.entities.push(entity);
        id
    }

    pub(crate) fn insert_entity(&mut self, index: usize, entity: Entity) -> SceneResult<EntityId> {
        if index > self.entities.len() {
            return Err(SceneError::IndexOutOfBounds {
                index,
                len: self.entities.len(),
            });
        }

        let id = entity.id();
        log::debug!("Registered entity {} ({}) at index {}", id, entity.tag(), index);
        self.entities.insert(index, entity);
        Ok(id)
    }

    pub(crate) fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        log::debug!("Unregistered entity {}", id);
        Some(self.entities.remove(index))
    }

    pub(crate) fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub(crate) fn add_task(&mut self, task: Box<dyn FixedTask>) -> TaskId {
        let id = TaskId::next();
        self.push_task(id, task);
        id
    }

    pub(crate) fn push_task(&mut self, id: TaskId, task: Box<dyn FixedTask>) {
        log::debug!("Registered {} ({})", id, task.label());
        self.tasks.push((id, task));
    }

    pub(crate) fn remove_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(task_id, _)| *task_id != id);
        self.tasks.len() != before
    }

    pub(crate) fn remove_tasks_where(&mut self, mut predicate: impl FnMut(TaskId, &dyn FixedTask) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|(id, task)| !predicate(*id, task.as_ref()));
        before - self.tasks.len()
    }

    pub(crate) fn add_routine(&mut self, routine: Box<dyn DrawingRoutine>) -> RoutineId {
        let id = RoutineId::next();
        self.push_routine(id, routine);
        id
    }

    pub(crate) fn push_routine(&mut self, id: RoutineId, routine: Box<dyn DrawingRoutine>) {
        log::debug!("Registered {} ({:?})", id, routine.drawing_position());
        self.routines.push((id, routine));
    }

    pub(crate) fn remove_routine(&mut self, id: RoutineId) -> bool {
        let before = self.routines.len();
        self.routines.retain(|(routine_id, _)| *routine_id != id);
        self.routines.len() != before
    }

    pub(crate) fn remove_routines_where(
        &mut self,
        mut predicate: impl FnMut(RoutineId, &dyn DrawingRoutine) -> bool,
    ) -> usize {
        let before = self.routines.len();
        self.routines.retain(|(id, routine)| !predicate(*id, routine.as_ref()));
        before - self.routines.len()
    }

    /// Apply task and routine changes collected during a tick; additions first
    pub(crate) fn apply(&mut self, pending: PendingChanges) {
        for (id, task) in pending.added_tasks {
            self.push_task(id, task);
        }
        for (id, routine) in pending.added_routines {
            self.push_routine(id, routine);
        }
        for id in pending.removed_tasks {
            self.remove_task(id);
        }
        for id in pending.removed_routines {
            self.remove_routine(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EmptyBehavior;
    use crate::foundation::math::Transform2D;
    use crate::scene::task::{routine_fn, task_fn, DrawingPosition};

    fn entity(tag: &str) -> Entity {
        Entity::new(tag, Transform2D::default(), EmptyBehavior)
    }

    fn tags(registry: &Registry) -> Vec<&str> {
        registry.entities.iter().map(Entity::tag).collect()
    }

    #[test]
    fn test_add_then_remove_restores_size() {
        let mut registry = Registry::default();
        registry.add_entity(entity("a"));
        let before = registry.entities.len();

        let id = registry.add_entity(entity("b"));
        assert!(registry.remove_entity(id).is_some());
        assert_eq!(registry.entities.len(), before);

        let task = registry.add_task(Box::new(task_fn("noop", |_| Ok(()))));
        assert!(registry.remove_task(task));
        assert!(registry.tasks.is_empty());

        let routine = registry.add_routine(Box::new(routine_fn(DrawingPosition::BeforeEntities, |_| Ok(()))));
        assert!(registry.remove_routine(routine));
        assert!(registry.routines.is_empty());
    }

    #[test]
    fn test_removing_absent_is_noop() {
        let mut registry = Registry::default();
        registry.add_entity(entity("a"));
        let stranger = entity("stranger");

        assert!(registry.remove_entity(stranger.id()).is_none());
        assert!(!registry.remove_task(TaskId(u64::MAX)));
        assert!(!registry.remove_routine(RoutineId(u64::MAX)));
        assert_eq!(registry.entities.len(), 1);
    }

    #[test]
    fn test_insert_at_index() {
        let mut registry = Registry::default();
        registry.add_entity(entity("a"));
        registry.add_entity(entity("c"));

        registry.insert_entity(1, entity("b")).unwrap();
        registry.insert_entity(3, entity("d")).unwrap();
        assert_eq!(tags(&registry), vec!["a", "b", "c", "d"]);

        let err = registry.insert_entity(9, entity("z")).unwrap_err();
        assert!(matches!(err, SceneError::IndexOutOfBounds { index: 9, len: 4 }));
        assert_eq!(registry.entities.len(), 4);
    }

    #[test]
    fn test_remove_by_predicate() {
        let mut registry = Registry::default();
        let keep = registry.add_task(Box::new(task_fn("noop", |_| Ok(()))));
        let drop_a = registry.add_task(Box::new(task_fn("noop", |_| Ok(()))));
        let drop_b = registry.add_task(Box::new(task_fn("noop", |_| Ok(()))));

        let removed = registry.remove_tasks_where(|id, _| id == drop_a || id == drop_b);
        assert_eq!(removed, 2);
        assert_eq!(registry.tasks.len(), 1);
        assert_eq!(registry.tasks[0].0, keep);

        registry.add_routine(Box::new(routine_fn(DrawingPosition::BeforeEntities, |_| Ok(()))));
        registry.add_routine(Box::new(routine_fn(DrawingPosition::AfterEntities, |_| Ok(()))));
        let removed =
            registry.remove_routines_where(|_, routine| routine.drawing_position() == DrawingPosition::AfterEntities);
        assert_eq!(removed, 1);
        assert_eq!(registry.routines[0].1.drawing_position(), DrawingPosition::BeforeEntities);
    }
}
