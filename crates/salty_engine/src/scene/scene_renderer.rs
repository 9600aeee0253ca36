//! Render pass orchestrator
//!
//! One call to [`Scene::draw`] renders, strictly in this order:
//!
//! 1. drawing routines placed before the entities;
//! 2. every entity with its components, rotated about its centre;
//! 3. the UI overlay, if attached;
//! 4. the global effects;
//! 5. drawing routines placed after the entities;
//! 6. the lighting composite, if attached, so it can darken everything below.
//!
//! Rendering only takes shared references to simulation state.

use super::{lock, DrawingPosition, DrawingRoutine, RoutineId, Scene, SceneResult};
use crate::ecs::Entity;
use crate::render::Surface;

impl Scene {
    /// Render the scene onto `surface`
    ///
    /// The first drawing error skips the rest of the pass. The surface's
    /// transform is always restored to what it was before the failing entity.
    pub fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        let result = self.draw_pass(surface);
        if let Err(e) = &result {
            log::error!("Render pass aborted: {}", e);
        }
        result
    }

    fn draw_pass(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        {
            let registry = self.registry();
            draw_routines(&registry.routines, DrawingPosition::BeforeEntities, surface)?;
            for entity in &registry.entities {
                draw_entity(entity, surface)?;
            }
        }

        if let Some(ui) = lock(&self.ui).as_ref() {
            ui.draw(surface)?;
        }

        lock(&self.effects).draw(surface)?;

        draw_routines(&self.registry().routines, DrawingPosition::AfterEntities, surface)?;

        if let Some(lighting) = lock(&self.lighting).as_ref() {
            lighting.draw(surface)?;
        }
        Ok(())
    }
}

fn draw_routines(
    routines: &[(RoutineId, Box<dyn DrawingRoutine>)],
    position: DrawingPosition,
    surface: &mut dyn Surface,
) -> SceneResult<()> {
    routines
        .iter()
        .filter(|(_, routine)| routine.drawing_position() == position)
        .try_for_each(|(_, routine)| routine.draw(surface))
}

fn draw_entity(entity: &Entity, surface: &mut dyn Surface) -> SceneResult<()> {
    let saved = surface.transform();
    let transform = entity.transform();
    surface.rotate_about(transform.rotation.radians(), transform.rotation_pivot());

    let result = entity.draw(surface);
    surface.set_transform(saved);
    result
}
