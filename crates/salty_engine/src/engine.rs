//! Core engine implementation
//!
//! The [`Engine`] drives one shared [`Scene`] with two loops: a fixed-tick
//! loop calling [`Scene::on_fixed_tick`] and a variable-rate frame loop
//! calling [`Scene::draw`]. Ticks either run between frames through a
//! [`FixedTimestep`] accumulator or on a dedicated thread started with
//! [`Engine::spawn_fixed_tick_loop`].

use crate::application::Application;
use crate::config::{Config, ConfigError, EngineConfig};
use crate::foundation::time::{FixedTimestep, FrameClock};
use crate::render::Surface;
use crate::scene::{Scene, SceneError, SceneResult};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Main engine struct
///
/// Owns the scene handle, frame timing and the pause and run flags shared
/// with the tick thread.
pub struct Engine {
    scene: Arc<Scene>,
    config: EngineConfig,
    clock: FrameClock,
    timestep: FixedTimestep,
    paused: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

impl Engine {
    /// Create an engine with an empty scene built from the configuration
    pub fn new(config: EngineConfig) -> Self {
        let scene = Arc::new(Scene::with_config(config.scene));
        Self::with_scene(config, scene)
    }

    /// Create an engine driving an existing scene
    pub fn with_scene(config: EngineConfig, scene: Arc<Scene>) -> Self {
        log::info!(
            "Initializing engine: tick = {:?}, max catch-up = {}, threaded = {}",
            config.fixed_tick(),
            config.max_ticks_per_frame,
            config.threaded_ticks
        );

        Self {
            scene,
            clock: FrameClock::new(),
            timestep: FixedTimestep::new(config.fixed_tick(), config.max_ticks_per_frame),
            config,
            paused: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create an engine from a TOML or RON configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Ok(Self::new(EngineConfig::load_from_file(path)?))
    }

    /// Run the engine main loop with the given application
    ///
    /// Returns once the application or a failing tick stops the engine. The
    /// application's cleanup runs in every case.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config);

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");
        let result = if engine.config.threaded_ticks {
            engine.run_threaded(app)
        } else {
            engine.frame_loop(app, None)
        };

        app.cleanup(&mut engine);
        match &result {
            Ok(()) => log::info!("Engine shutdown complete after {} ticks", engine.scene.tick_count()),
            Err(e) => log::error!("Engine stopped: {e}"),
        }
        result
    }

    fn run_threaded<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let handle = self.spawn_fixed_tick_loop()?;
        let frames = self.frame_loop(app, Some(&handle));

        handle.stop();
        let ticks = handle.join();
        frames?;
        ticks.map(|ticks| log::debug!("Tick thread ran {ticks} ticks"))
    }

    fn frame_loop<T: Application>(&mut self, app: &mut T, tick_thread: Option<&TickLoopHandle>) -> Result<(), EngineError> {
        let frame_time = self.config.frame_time();

        while self.is_running() {
            if tick_thread.is_some_and(TickLoopHandle::is_finished) {
                break;
            }

            let started = Instant::now();
            let delta = self.clock.lap();

            app.update(self, delta.as_secs_f32())
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

            if tick_thread.is_none() {
                self.advance(delta)?;
            }

            app.render(self)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {e}")))?;

            if let Some(rest) = frame_time.and_then(|frame| frame.checked_sub(started.elapsed())) {
                thread::sleep(rest);
            }
        }
        Ok(())
    }

    /// Feed elapsed time into the tick accumulator and run the ticks that are due
    ///
    /// Returns the number of ticks run. Nothing runs while paused and the
    /// elapsed time is discarded.
    pub fn advance(&mut self, elapsed: Duration) -> Result<u32, EngineError> {
        if self.is_paused() {
            return Ok(0);
        }

        let ticks = self.timestep.advance(elapsed);
        for _ in 0..ticks {
            self.scene.on_fixed_tick()?;
        }
        Ok(ticks)
    }

    /// Render one frame of the scene
    pub fn render_frame(&self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        Ok(self.scene.draw(surface)?)
    }

    /// Start the fixed-tick loop on a dedicated thread
    ///
    /// The thread ticks every `fixed_tick`, skips ticks while paused and
    /// stops when the engine stops or a tick fails. A failing tick also stops
    /// the engine.
    pub fn spawn_fixed_tick_loop(&self) -> Result<TickLoopHandle, EngineError> {
        let scene = Arc::clone(&self.scene);
        let paused = Arc::clone(&self.paused);
        let running = Arc::clone(&self.running);
        let step = self.config.fixed_tick();
        let max_behind = step * self.config.max_ticks_per_frame.max(1);

        let thread = thread::Builder::new()
            .name("salty-fixed-tick".into())
            .spawn({
                let running = Arc::clone(&running);
                move || {
                    let result = run_fixed_tick_loop(&scene, step, max_behind, &paused, &running);
                    running.store(false, Ordering::Release);
                    result
                }
            })?;

        log::info!("Fixed-tick thread started ({:?} per tick)", step);
        Ok(TickLoopHandle { thread, running })
    }

    /// Shared scene handle
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stop running ticks until [`resume`](Self::resume)
    pub fn pause(&self) {
        log::debug!("Ticks paused");
        self.paused.store(true, Ordering::Release);
    }

    /// Resume running ticks
    pub fn resume(&self) {
        log::debug!("Ticks resumed");
        self.paused.store(false, Ordering::Release);
    }

    /// Whether ticks are paused
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Request engine shutdown; also stops the tick thread
    pub fn quit(&self) {
        log::info!("Engine shutdown requested");
        self.running.store(false, Ordering::Release);
    }

    /// Whether the engine should continue running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

fn run_fixed_tick_loop(
    scene: &Scene,
    step: Duration,
    max_behind: Duration,
    paused: &AtomicBool,
    running: &AtomicBool,
) -> SceneResult<u64> {
    let mut ticks = 0;
    let mut next_tick = Instant::now();

    while running.load(Ordering::Acquire) {
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
            continue;
        }

        if now - next_tick > max_behind {
            // Too far behind, reset to avoid a catch-up spiral
            log::warn!("Tick thread fell {:?} behind, skipping ahead", now - next_tick);
            next_tick = now;
        }

        if !paused.load(Ordering::Acquire) {
            scene.on_fixed_tick()?;
            ticks += 1;
        }
        next_tick += step;
    }

    Ok(ticks)
}

/// Handle to a running fixed-tick thread
#[derive(Debug)]
pub struct TickLoopHandle {
    thread: JoinHandle<SceneResult<u64>>,
    running: Arc<AtomicBool>,
}

impl TickLoopHandle {
    /// Ask the thread, and with it the engine, to stop after the current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the thread to exit and get the number of ticks it ran
    pub fn join(self) -> Result<u64, EngineError> {
        match self.thread.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(EngineError::TickThreadPanicked),
        }
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A tick or render pass failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// The tick thread could not be started
    #[error("Failed to spawn tick thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),

    /// The tick thread panicked
    #[error("Tick thread panicked")]
    TickThreadPanicked,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::render::CommandSurface;
    use crate::scene::{task_fn, TickContext};

    fn config(threaded_ticks: bool) -> EngineConfig {
        EngineConfig {
            fixed_tick_millis: 1,
            max_ticks_per_frame: 5,
            frame_millis: 0,
            threaded_ticks,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut engine = Engine::new(config(false));

        assert_eq!(engine.advance(Duration::from_micros(2500)).unwrap(), 2);
        assert_eq!(engine.advance(Duration::from_micros(600)).unwrap(), 1);
        assert_eq!(engine.scene().tick_count(), 3);

        // Backlog beyond the catch-up limit is dropped
        assert_eq!(engine.advance(Duration::from_millis(100)).unwrap(), 5);
        assert_eq!(engine.advance(Duration::ZERO).unwrap(), 0);
    }

    #[test]
    fn test_paused_engine_does_not_tick() {
        let mut engine = Engine::new(config(false));
        engine.pause();
        assert_eq!(engine.advance(Duration::from_millis(3)).unwrap(), 0);

        engine.resume();
        assert_eq!(engine.advance(Duration::from_millis(3)).unwrap(), 3);
    }

    #[test]
    fn test_tick_thread_runs_until_stopped() {
        let engine = Engine::new(config(true));
        let handle = engine.spawn_fixed_tick_loop().unwrap();
        thread::sleep(Duration::from_millis(30));

        handle.stop();
        let ticks = handle.join().unwrap();
        assert!(ticks > 0);
        assert_eq!(ticks, engine.scene().tick_count());
        assert!(!engine.is_running());
    }

    #[test]
    fn test_tick_thread_reports_failure() {
        crate::foundation::logging::init_for_tests();
        let engine = Engine::new(config(true));
        engine.scene().add_fixed_task(task_fn("failing", |ctx: &mut TickContext| {
            if ctx.tick() == 3 {
                Err(SceneError::callback("out of fuel"))
            } else {
                Ok(())
            }
        }));

        let handle = engine.spawn_fixed_tick_loop().unwrap();
        let err = handle.join().unwrap_err();
        assert!(matches!(err, EngineError::Scene(SceneError::Callback(_))));
        assert!(!engine.is_running());
        assert_eq!(engine.scene().tick_count(), 4);
    }

    struct CountingApp {
        frames: u32,
        surface: CommandSurface,
        cleaned_up: bool,
    }

    impl Application for CountingApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            engine.scene().add_fixed_task(task_fn("noop", |_| Ok(())));
            Ok(())
        }

        fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            self.surface.clear();
            engine.render_frame(&mut self.surface)?;
            self.frames += 1;
            if self.frames == 10 {
                engine.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_run_until_quit() {
        for threaded in [false, true] {
            let mut app = CountingApp {
                frames: 0,
                surface: CommandSurface::new(10.0, 10.0),
                cleaned_up: false,
            };

            Engine::run(config(threaded), &mut app).unwrap();
            assert_eq!(app.frames, 10);
            assert!(app.cleaned_up);
        }
    }
}
