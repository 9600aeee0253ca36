//! Rendering interfaces
//!
//! The scene draws through these narrow collaborator contracts: a
//! [`Surface`] to draw on, an optional [`UiOverlay`], a scene-wide
//! [`EffectsSystem`] and an optional [`LightingComposite`].

pub mod effects;
pub mod lighting;
pub mod surface;
pub mod ui;

pub use effects::{Effect, EffectsSystem, GfxController};
pub use lighting::{AmbientLighting, LightingComposite};
pub use surface::{Color, CommandSurface, DrawCommand, Surface};
pub use ui::{UiElement, UiOverlay, UiSystem};
