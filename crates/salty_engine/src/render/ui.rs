//! UI overlay
//!
//! A scene holds at most one [`UiOverlay`]. It is ticked after the entities
//! and drawn on top of them, below the effects and the lighting.

use super::surface::Surface;
use crate::scene::SceneResult;

/// Overlay UI attached to a scene
pub trait UiOverlay: Send {
    /// Advance the overlay by one tick
    fn on_fixed_tick(&mut self) -> SceneResult<()> {
        Ok(())
    }

    /// Draw the overlay
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()>;
}

/// A single element of a [`UiSystem`]
pub trait UiElement: Send {
    /// Advance the element by one tick
    fn on_fixed_tick(&mut self) -> SceneResult<()> {
        Ok(())
    }

    /// Draw the element
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()>;
}

/// Overlay made of independent elements, drawn in insertion order
#[derive(Default)]
pub struct UiSystem {
    elements: Vec<Box<dyn UiElement>>,
}

impl UiSystem {
    /// Create an empty UI
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element on top of the existing ones
    pub fn add_element(&mut self, element: impl UiElement + 'static) {
        self.elements.push(Box::new(element));
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

impl UiOverlay for UiSystem {
    fn on_fixed_tick(&mut self) -> SceneResult<()> {
        for element in &mut self.elements {
            element.on_fixed_tick()?;
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        for element in &self.elements {
            element.draw(surface)?;
        }
        Ok(())
    }
}
