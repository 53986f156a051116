use super::math::{Color, Vec2};

/// Two-point linear gradient, described once and handed to the surface on
/// every fill.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<(f32, Color)>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stops: Vec::with_capacity(2),
        }
    }

    pub fn add_color_stop(&mut self, offset: f32, color: Color) {
        self.stops.push((offset.clamp(0.0, 1.0), color));
    }

    /// Top-to-bottom gradient spanning a surface of the given height.
    pub fn vertical(height: f32, top: Color, bottom: Color) -> Self {
        let mut gradient = Self::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, height));
        gradient.add_color_stop(0.0, top);
        gradient.add_color_stop(1.0, bottom);
        gradient
    }
}

/// Immediate-mode 2D surface the meter paints on.
///
/// Paint state (global alpha, clip, fill style) is pushed by [`save`] and
/// popped by [`restore`]; the current path is not part of it.
///
/// [`save`]: DrawContext::save
/// [`restore`]: DrawContext::restore
pub trait DrawContext {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill_gradient(&mut self, gradient: &LinearGradient);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);

    /// Intersects the clip region with the current path (nonzero winding).
    fn clip(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
}
