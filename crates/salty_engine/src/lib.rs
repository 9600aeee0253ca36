//! # Salty Engine
//!
//! A 2D scene scheduler for games: entities, periodic tasks and drawing
//! routines advanced on a fixed-rate tick and rendered at a variable frame
//! rate, plus a keyframe interpolation engine for animated attributes.
//!
//! ## Features
//!
//! - **Fixed-tick scheduler**: tasks, lazy entity initialization, hitbox collisions, components
//! - **Render pass orchestrator**: routines, rotated entities, UI, effects and lighting in a fixed order
//! - **Thread-safe registry**: one `Arc<Scene>` shared between a tick thread and a render loop
//! - **Keyframe animation**: precomputed per-tick deltas for piecewise-linear animation
//! - **Configuration**: TOML or RON settings files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salty_engine::prelude::*;
//!
//! struct MyApp {
//!     surface: CommandSurface,
//! }
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let bird = Entity::new("bird", Transform2D::new(0.0, 0.0, 16.0, 16.0), EmptyBehavior)
//!             .with_component(EntityAnimation::new("fly", AnimationControl::XPos).with_keyframe(1000, 300.0));
//!         engine.scene().add_entity(bird);
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         self.surface.clear();
//!         engine.render_frame(&mut self.surface)?;
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = MyApp { surface: CommandSurface::new(640.0, 480.0) };
//!     Engine::run(EngineConfig::default(), &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod animation;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError, TickLoopHandle};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{AnimationControl, EntityAnimation, Keyframe, LinearKeyframeAnimation},
        config::{Config, EngineConfig, SceneConfig},
        ecs::{
            components::{DebugStats, DrawHitbox, FixedRate},
            Behavior, CollisionEvent, Component, ComponentStatus, EmptyBehavior, Entity, EntityId, EntityState,
        },
        foundation::math::{Dimensions, Rect, Rotation, Transform2D, Vec2},
        render::{AmbientLighting, Color, CommandSurface, LightingComposite, Surface, UiElement, UiOverlay, UiSystem},
        scene::{
            routine_fn, task_fn, DrawingPosition, DrawingRoutine, FixedTask, Scene, SceneError, SceneResult,
            TickContext,
        },
        AppError, Application, Engine, EngineError,
    };
}
