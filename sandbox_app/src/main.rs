//! Sandbox application
//!
//! Headless demo driving a scene for a couple of seconds: an animated bird,
//! a task spawning falling feathers, a background, a tick counter overlay and
//! ambient lighting, all drawn onto a recording surface.
//!
//! Usage: `sandbox [--threaded] [--config <file.toml|file.ron>] [--seconds <n>]`

use clap::Parser;
use salty_engine::config::ConfigError;
use salty_engine::foundation::logging;
use salty_engine::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

const VIEWPORT: (f32, f32) = (640.0, 480.0);

/// Seconds per tick at the default tick rate, used for the feather physics
const TICK_SECONDS: f32 = 0.001;

#[derive(Error, Debug)]
enum SandboxError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "sandbox", about = "Headless salty_engine demo scene")]
struct Args {
    /// Run fixed ticks on their own thread
    #[arg(long)]
    threaded: bool,

    /// Engine configuration file (.toml or .ron)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How long to run before quitting
    #[arg(long, default_value_t = 2)]
    seconds: u64,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_from_file(path)?,
            None => EngineConfig::default(),
        };
        config.threaded_ticks |= self.threaded;
        Ok(config)
    }

    const fn run_for(&self) -> Duration {
        Duration::from_secs(self.seconds)
    }
}

/// Draws a solid body over the hitbox
struct Body {
    color: Color,
}

impl Behavior for Body {
    fn on_fixed_tick(&mut self, _state: &mut EntityState, _ctx: &mut TickContext) -> SceneResult<()> {
        Ok(())
    }

    fn draw(&self, state: &EntityState, surface: &mut dyn Surface) -> SceneResult<()> {
        surface.fill_rect(state.hitbox(), self.color);
        Ok(())
    }

    fn on_collision(&mut self, state: &mut EntityState, event: &CollisionEvent, _ctx: &mut TickContext) -> SceneResult<()> {
        log::trace!("{} touched {}", state.tag, event.other_tag);
        Ok(())
    }
}

/// Falls with the scene's gravity, slowed by its friction, and despawns below the viewport
struct Feather {
    velocity: f32,
}

impl Behavior for Feather {
    fn initialize(&mut self, state: &mut EntityState, ctx: &mut TickContext) -> SceneResult<()> {
        log::debug!("Feather {} released at tick {}", state.id(), ctx.tick());
        Ok(())
    }

    fn on_fixed_tick(&mut self, state: &mut EntityState, ctx: &mut TickContext) -> SceneResult<()> {
        if state.gravity_enabled {
            self.velocity += ctx.gravity() * 10.0 * TICK_SECONDS;
        }
        self.velocity *= 1.0 - ctx.friction() * TICK_SECONDS;
        state.transform.move_y(self.velocity * TICK_SECONDS);

        if state.transform.y() > VIEWPORT.1 {
            ctx.despawn(state.id());
        }
        Ok(())
    }

    fn draw(&self, state: &EntityState, surface: &mut dyn Surface) -> SceneResult<()> {
        surface.draw_rect(state.hitbox(), Color::WHITE);
        Ok(())
    }

    fn on_collision(&mut self, _state: &mut EntityState, event: &CollisionEvent, _ctx: &mut TickContext) -> SceneResult<()> {
        if event.other_tag == "bird" {
            self.velocity = 0.0;
        }
        Ok(())
    }
}

/// Overlay line showing the number of ticks seen
#[derive(Default)]
struct TickCounter {
    ticks: u64,
}

impl UiElement for TickCounter {
    fn on_fixed_tick(&mut self) -> SceneResult<()> {
        self.ticks += 1;
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        surface.draw_text(&format!("ticks: {}", self.ticks), Vec2::new(8.0, 8.0), Color::WHITE);
        Ok(())
    }
}

struct SandboxApp {
    surface: CommandSurface,
    started: Instant,
    run_for: Duration,
    frames: u64,
}

impl SandboxApp {
    fn new(run_for: Duration) -> Self {
        Self {
            surface: CommandSurface::new(VIEWPORT.0, VIEWPORT.1),
            started: Instant::now(),
            run_for,
            frames: 0,
        }
    }
}

impl Application for SandboxApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let scene = engine.scene();

        scene.add_drawing_routine(routine_fn(DrawingPosition::BeforeEntities, |surface| {
            let viewport = surface.viewport();
            surface.fill_rect(
                Rect::new(0.0, 0.0, viewport.width, viewport.height),
                Color::rgb(0.35, 0.6, 0.9),
            );
            Ok(())
        }));
        scene.add_drawing_routine(routine_fn(DrawingPosition::AfterEntities, |surface| {
            let viewport = surface.viewport();
            surface.draw_rect(Rect::new(0.0, 0.0, viewport.width, viewport.height), Color::BLACK);
            Ok(())
        }));

        let bird = Entity::new(
            "bird",
            Transform2D::new(40.0, 200.0, 32.0, 24.0).with_centred_rotation(0.0),
            Body {
                color: Color::rgb(0.9, 0.8, 0.1),
            },
        )
        .with_component(
            EntityAnimation::new("fly", AnimationControl::XPos)
                .with_keyframe(1000, 280.0)
                .with_keyframe(2000, 0.0)
                .looping(true),
        )
        .with_component(
            EntityAnimation::new("flap", AnimationControl::Rotation)
                .with_keyframe(250, 20.0)
                .with_keyframe(500, 0.0)
                .looping(true),
        )
        .with_component(DebugStats::with_gate(499))
        .with_component(DrawHitbox::new());
        scene.add_entity(bird);

        let ground = scene.add_entity(Entity::new(
            "ground",
            Transform2D::new(0.0, 440.0, VIEWPORT.0, 40.0),
            EmptyBehavior,
        ));
        scene.with_entity_mut(ground, |ground| ground.state_mut().gravity_enabled = false);

        let mut rate = FixedRate::new(249);
        let mut released = 0_u32;
        scene.add_fixed_task(task_fn("feather spawner", move |ctx| {
            if rate.tick() {
                released += 1;
                let x = 20.0 + (released % 12) as f32 * 50.0;
                ctx.spawn(Entity::new("feather", Transform2D::new(x, 0.0, 6.0, 6.0), Feather { velocity: 0.0 }));
            }
            Ok(())
        }));

        let mut ui = UiSystem::new();
        ui.add_element(TickCounter::default());
        scene.set_ui(ui);

        scene.set_lighting(
            AmbientLighting::new(Color::BLACK.with_alpha(0.35))
                .with_light(Rect::new(200.0, 120.0, 240.0, 240.0), Color::WHITE.with_alpha(0.15)),
        );

        self.started = Instant::now();
        log::info!("Sandbox ready with {} entities", scene.entity_count());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        if self.started.elapsed() >= self.run_for {
            engine.quit();
        }
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.surface.clear();
        engine.render_frame(&mut self.surface)?;
        self.frames += 1;

        if self.frames % 30 == 0 {
            log::info!(
                "Frame {}: {} draw commands, {} entities, {:.1} fps",
                self.frames,
                self.surface.commands().len(),
                engine.scene().entity_count(),
                self.frames as f32 / self.started.elapsed().as_secs_f32().max(f32::EPSILON)
            );
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Sandbox done: {} frames, {} ticks, {} entities left",
            self.frames,
            engine.scene().tick_count(),
            engine.scene().entity_count()
        );
    }
}

fn main() -> Result<(), SandboxError> {
    logging::init();

    let args = Args::parse();
    let mut app = SandboxApp::new(args.run_for());
    Engine::run(args.engine_config()?, &mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_to_two_seconds_unthreaded() {
        let args = Args::try_parse_from(["sandbox"]).unwrap();
        assert!(!args.threaded);
        assert!(args.config.is_none());
        assert_eq!(args.run_for(), Duration::from_secs(2));

        let config = args.engine_config().unwrap();
        assert!(!config.threaded_ticks);
    }

    #[test]
    fn test_args_threaded_flag_enables_threaded_ticks() {
        let args = Args::try_parse_from(["sandbox", "--threaded", "--seconds", "5"]).unwrap();
        assert!(args.threaded);
        assert_eq!(args.run_for(), Duration::from_secs(5));
        assert!(args.engine_config().unwrap().threaded_ticks);
    }

    #[test]
    fn test_args_reject_bad_values() {
        assert!(Args::try_parse_from(["sandbox", "--seconds", "soon"]).is_err());
        assert!(Args::try_parse_from(["sandbox", "--config"]).is_err());
        assert!(Args::try_parse_from(["sandbox", "--fast"]).is_err());
    }
}
