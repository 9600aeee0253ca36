//! Lighting composite
//!
//! A scene holds at most one [`LightingComposite`]. It is drawn after every
//! other pass so it can darken or tint everything beneath it. Generating
//! light images is up to the implementation.

use super::surface::{Color, Surface};
use crate::foundation::math::{Rect, Vec2};
use crate::scene::SceneResult;

/// Full-frame lighting drawn last in every render pass
pub trait LightingComposite: Send {
    /// Draw the lighting over the finished frame
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()>;
}

/// Uniform darkness over the whole viewport with rectangular light cut-outs
///
/// Lights are drawn as translucent highlights on top of the darkness layer.
#[derive(Debug, Clone)]
pub struct AmbientLighting {
    darkness: Color,
    lights: Vec<(Rect, Color)>,
}

impl AmbientLighting {
    /// Create a lighting layer with the given darkness color
    pub fn new(darkness: Color) -> Self {
        Self {
            darkness,
            lights: Vec::new(),
        }
    }

    /// Builder pattern: add a light
    pub fn with_light(mut self, area: Rect, color: Color) -> Self {
        self.lights.push((area, color));
        self
    }

    /// Add a light
    pub fn add_light(&mut self, area: Rect, color: Color) {
        self.lights.push((area, color));
    }

    /// Number of lights
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

impl LightingComposite for AmbientLighting {
    fn draw(&self, surface: &mut dyn Surface) -> SceneResult<()> {
        let viewport = surface.viewport();
        surface.fill_rect(
            Rect {
                position: Vec2::zeros(),
                dimensions: viewport,
            },
            self.darkness,
        );

        for (area, color) in &self.lights {
            surface.fill_rect(*area, *color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{CommandSurface, DrawCommand};

    #[test]
    fn test_darkness_covers_viewport_before_lights() {
        let lighting = AmbientLighting::new(Color::BLACK.with_alpha(0.8))
            .with_light(Rect::new(10.0, 10.0, 5.0, 5.0), Color::WHITE.with_alpha(0.3));
        let mut surface = CommandSurface::new(64.0, 48.0);

        lighting.draw(&mut surface).unwrap();

        let commands = surface.commands();
        assert_eq!(commands.len(), 2);
        match &commands[0] {
            DrawCommand::FillRect { rect, .. } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 64.0, 48.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
