//! Entity implementation
//!
//! An [`Entity`] is plain data ([`EntityState`]) plus a [`Behavior`] and an
//! ordered list of components. The scene owns entities once registered;
//! outside code refers to them by [`EntityId`].

use super::component::{Component, ComponentStatus};
use crate::foundation::math::{Rect, Transform2D};
use crate::render::Surface;
use crate::scene::{SceneError, SceneResult, TickContext};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Entity identifier, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable attributes of an entity, handed to its behavior and components
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    id: EntityId,

    /// Free-form tag, e.g. used to tell collision partners apart
    pub tag: String,

    /// Position, size and rotation
    pub transform: Transform2D,

    /// Whether gravity applies to this entity
    pub gravity_enabled: bool,
}

impl EntityState {
    /// ID of the owning entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Collision bounds, currently the unrotated transform rectangle
    pub fn hitbox(&self) -> Rect {
        self.transform.rect()
    }
}

/// Overlap of one entity with another, seen from the receiving entity
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Entity collided with
    pub other: EntityId,

    /// Tag of the entity collided with
    pub other_tag: String,

    /// Hitbox of the entity collided with at detection time
    pub other_hitbox: Rect,
}

impl CollisionEvent {
    fn with(other: &EntityState) -> Self {
        Self {
            other: other.id,
            other_tag: other.tag.clone(),
            other_hitbox: other.hitbox(),
        }
    }
}

/// Per-entity lifecycle callbacks
///
/// Every callback gets the entity's own state; tick-time callbacks also get a
/// [`TickContext`] for reading scene parameters and spawning or despawning
/// entities without touching the scene lock.
pub trait Behavior: Send {
    /// Runs once, on the first tick after the entity was registered
    fn initialize(&mut self, _state: &mut EntityState, _ctx: &mut TickContext) -> SceneResult<()> {
        Ok(())
    }

    /// Runs once per tick, after the entity's components
    fn on_fixed_tick(&mut self, state: &mut EntityState, ctx: &mut TickContext) -> SceneResult<()>;

    /// Draws the entity; the surface is already rotated about the entity's centre
    fn draw(&self, state: &EntityState, surface: &mut dyn Surface) -> SceneResult<()>;

    /// Runs for every other entity whose hitbox overlaps this one
    fn on_collision(
        &mut self,
        _state: &mut EntityState,
        _event: &CollisionEvent,
        _ctx: &mut TickContext,
    ) -> SceneResult<()> {
        Ok(())
    }
}

/// Behavior that does nothing, for entities driven purely by components
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyBehavior;

impl Behavior for EmptyBehavior {
    fn on_fixed_tick(&mut self, _state: &mut EntityState, _ctx: &mut TickContext) -> SceneResult<()> {
        Ok(())
    }

    fn draw(&self, _state: &EntityState, _surface: &mut dyn Surface) -> SceneResult<()> {
        Ok(())
    }
}

/// A simulated object: state, behavior and components
pub struct Entity {
    state: EntityState,
    components: Vec<Box<dyn Component>>,
    behavior: Box<dyn Behavior>,
    initialized: bool,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("state", &self.state)
            .field("components", &self.component_names().collect::<Vec<_>>())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl Entity {
    /// Create a new entity with a fresh ID
    pub fn new(tag: impl Into<String>, transform: Transform2D, behavior: impl Behavior + 'static) -> Self {
        Self {
            state: EntityState {
                id: EntityId::next(),
                tag: tag.into(),
                transform,
                gravity_enabled: true,
            },
            components: Vec::new(),
            behavior: Box::new(behavior),
            initialized: false,
        }
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.state.id
    }

    /// Get the tag
    pub fn tag(&self) -> &str {
        &self.state.tag
    }

    /// Get the state
    pub fn state(&self) -> &EntityState {
        &self.state
    }

    /// Get the state mutably
    pub fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    /// Get the transform
    pub fn transform(&self) -> &Transform2D {
        &self.state.transform
    }

    /// Whether the one-time initializer has been run (or attempted)
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Builder pattern: attach a component
    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.add_component(component);
        self
    }

    /// Attach a component after the existing ones
    pub fn add_component(&mut self, component: impl Component + 'static) {
        self.components.push(Box::new(component));
    }

    /// Detach the first component with the given name
    pub fn remove_component(&mut self, name: &str) -> bool {
        match self.components.iter().position(|c| c.name() == name) {
            Some(index) => {
                self.components.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Names of attached components, in order
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name())
    }

    /// Run the initializer unless it ran before
    ///
    /// The flag is set first, so a failing initializer is never retried.
    pub(crate) fn initialize_once(&mut self, ctx: &mut TickContext) -> SceneResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;

        log::debug!("Initializing entity {} ({})", self.state.id, self.state.tag);
        self.behavior
            .initialize(&mut self.state, ctx)
            .map_err(|e| SceneError::Initialization {
                entity: self.state.id,
                source: Box::new(e),
            })
    }

    /// Collision event describing this entity
    pub(crate) fn collision_event(&self) -> CollisionEvent {
        CollisionEvent::with(&self.state)
    }

    /// Deliver a collision to the behavior, then to every enabled component
    pub(crate) fn notify_collision(&mut self, event: &CollisionEvent, ctx: &mut TickContext) -> SceneResult<()> {
        self.behavior.on_collision(&mut self.state, event, ctx)?;
        for component in self.components.iter_mut().filter(|c| c.is_enabled()) {
            component.on_collision(&mut self.state, event)?;
        }
        Ok(())
    }

    /// Tick enabled components, dropping those that ask for it, then the behavior
    pub(crate) fn fixed_tick(&mut self, ctx: &mut TickContext) -> SceneResult<()> {
        let mut index = 0;
        while index < self.components.len() {
            let component = &mut self.components[index];
            if !component.is_enabled() {
                index += 1;
                continue;
            }

            match component.on_fixed_tick(&mut self.state, ctx)? {
                ComponentStatus::Keep => index += 1,
                ComponentStatus::Remove => {
                    let removed = self.components.remove(index);
                    log::debug!("Removed component '{}' from entity {}", removed.name(), self.state.id);
                }
            }
        }

        self.behavior.on_fixed_tick(&mut self.state, ctx)
    }

    /// Draw the behavior, then every enabled component
    pub(crate) fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        self.behavior.draw(&self.state, surface)?;
        for component in self.components.iter().filter(|c| c.is_enabled()) {
            component.draw(&self.state, surface)?;
        }
        Ok(())
    }
}
