//! Fixed-tick scheduler
//!
//! One call to [`Scene::on_fixed_tick`] advances the simulation by one
//! quantum:
//!
//! 1. periodic tasks, in registration order;
//! 2. entities, in registration order: lazy one-time initialization,
//!    collision detection against every other entity, component ticks and
//!    finally the entity's own tick;
//! 3. the global effects system;
//! 4. the UI overlay, if attached.
//!
//! Steps 1 and 2 run under one hold of the registry lock. Task and routine
//! changes requested through the [`TickContext`] are applied before the lock
//! is released, even when the tick fails. The first error aborts the rest of
//! the tick and is returned to the driver.

use super::registry::Registry;
use super::{lock, Scene, SceneResult, TickContext};
use crate::ecs::{CollisionEvent, Entity, EntityId};
use std::sync::atomic::Ordering;

impl Scene {
    /// Advance the scene by one tick
    pub fn on_fixed_tick(&self) -> SceneResult<()> {
        let tick = self.ticks.fetch_add(1, Ordering::AcqRel);
        let params = self.params();
        let mut ctx = TickContext::new(tick, params.gravity, params.friction);
        log::trace!("Tick {} started", tick);

        let result = self
            .tick_registry(&mut ctx)
            .and_then(|()| self.tick_collaborators());
        if let Err(e) = &result {
            log::error!("Tick {} aborted: {}", tick, e);
        }
        result
    }

    fn tick_collaborators(&self) -> SceneResult<()> {
        lock(&self.effects).on_fixed_tick()?;
        let mut ui = lock(&self.ui);
        if let Some(ui) = ui.as_mut() {
            ui.on_fixed_tick()?;
        }
        Ok(())
    }

    fn tick_registry(&self, ctx: &mut TickContext) -> SceneResult<()> {
        let mut registry = self.registry();

        let result = run_tasks(&mut registry, ctx).and_then(|()| tick_entities(&mut registry.entities, ctx));

        // Changes requested before a failing callback are still applied
        registry.entities.append(&mut ctx.take_spawned());
        let despawned = ctx.take_despawned();
        if !despawned.is_empty() {
            registry.entities.retain(|e| !despawned.contains(&e.id()));
            log::debug!("Despawned {} entities", despawned.len());
        }
        registry.apply(ctx.take_pending());
        result
    }
}

fn run_tasks(registry: &mut Registry, ctx: &mut TickContext) -> SceneResult<()> {
    for (id, task) in &mut registry.tasks {
        log::trace!("Running {} ({})", id, task.label());
        task.on_fixed_tick(ctx)?;
    }
    Ok(())
}

fn tick_entities(entities: &mut Vec<Entity>, ctx: &mut TickContext) -> SceneResult<()> {
    entities.append(&mut ctx.take_spawned());

    // Index-based so entities spawned by callbacks are visited this tick
    let mut index = 0;
    while index < entities.len() {
        tick_entity(entities, index, ctx)?;
        entities.append(&mut ctx.take_spawned());
        index += 1;
    }
    Ok(())
}

fn tick_entity(entities: &mut [Entity], index: usize, ctx: &mut TickContext) -> SceneResult<()> {
    entities[index].initialize_once(ctx)?;

    let events = collisions(entities, index);
    let entity = &mut entities[index];
    for event in &events {
        entity.notify_collision(event, ctx)?;
    }

    entity.fixed_tick(ctx)
}

/// Overlaps of the entity at `index` with every other entity, in list order
fn collisions(entities: &[Entity], index: usize) -> Vec<CollisionEvent> {
    let hitbox = entities[index].state().hitbox();
    let id: EntityId = entities[index].id();

    entities
        .iter()
        .filter(|other| other.id() != id && hitbox.intersects(&other.state().hitbox()))
        .map(Entity::collision_event)
        .collect()
}
