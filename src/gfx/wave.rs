use super::draw::{DrawContext, LinearGradient};
use super::math::Vec2;

/// Phase advance per pixel row along the boundary.
const ROW_FREQUENCY: f32 = 0.02;

/// Everything needed to place the wavy boundary for one frame.
#[derive(Debug, Clone, Copy)]
pub struct WaveShape {
    pub offset: f32,
    pub phase: f32,
    pub amplitude: f32,
    pub width: f32,
    pub height: f32,
}

impl WaveShape {
    fn edge_x(&self, row: f32) -> f32 {
        self.offset + self.amplitude * (row * ROW_FREQUENCY + self.phase).sin()
    }

    /// Outline of the filled region: the bottom wave point, the two left
    /// corners, the top wave point, then one point per pixel row from top to
    /// bottom along the sine-perturbed edge.
    pub fn boundary(&self) -> Vec<Vec2> {
        let rows = self.height.max(0.0) as u32;
        let mut points = Vec::with_capacity(rows as usize + 5);

        points.push(Vec2::new(self.edge_x(self.height), self.height));
        points.push(Vec2::new(0.0, self.height));
        points.push(Vec2::new(0.0, 0.0));
        points.push(Vec2::new(self.edge_x(0.0), 0.0));
        for i in 0..=rows {
            let y = i as f32;
            points.push(Vec2::new(self.edge_x(y), y));
        }

        points
    }
}

/// Repaints the whole surface: clears it, clips to the region left of the
/// wave and fills that region with `gradient` at `opacity`.
pub fn paint<C: DrawContext + ?Sized>(
    ctx: &mut C,
    shape: &WaveShape,
    opacity: f32,
    gradient: &LinearGradient,
) {
    ctx.clear();
    ctx.save();
    ctx.set_global_alpha(opacity);

    ctx.begin_path();
    let points = shape.boundary();
    if let Some((first, rest)) = points.split_first() {
        ctx.move_to(first.x, first.y);
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.clip();

    ctx.set_fill_gradient(gradient);
    ctx.fill_rect(0.0, 0.0, shape.width, shape.height);
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::draw::recording::{DrawOp, RecordingCanvas};
    use crate::gfx::math::Color;

    fn shape(offset: f32, phase: f32) -> WaveShape {
        WaveShape {
            offset,
            phase,
            amplitude: 6.0,
            width: 300.0,
            height: 100.0,
        }
    }

    #[test]
    fn boundary_has_corners_then_one_point_per_row() {
        let points = shape(120.0, 0.3).boundary();
        assert_eq!(points.len(), 4 + 101);

        assert_eq!(points[1], Vec2::new(0.0, 100.0));
        assert_eq!(points[2], Vec2::new(0.0, 0.0));
        assert_eq!(points[0].y, 100.0);
        assert_eq!(points[3].y, 0.0);

        for (i, p) in points[4..].iter().enumerate() {
            assert_eq!(p.y, i as f32);
        }
    }

    #[test]
    fn boundary_follows_the_sine_edge() {
        let s = shape(120.0, 1.1);
        let points = s.boundary();

        assert!((points[0].x - (120.0 + 6.0 * (100.0f32 * 0.02 + 1.1).sin())).abs() < 1e-4);
        assert!((points[3].x - (120.0 + 6.0 * 1.1f32.sin())).abs() < 1e-4);
        let row_50 = points[4 + 50];
        assert!((row_50.x - (120.0 + 6.0 * (50.0f32 * 0.02 + 1.1).sin())).abs() < 1e-4);

        for p in &points[4..] {
            assert!((p.x - 120.0).abs() <= 6.0 + 1e-4);
        }
    }

    #[test]
    fn phase_shifts_the_edge() {
        let a = shape(120.0, 0.0).boundary();
        let b = shape(120.0, 0.5).boundary();
        assert_ne!(a[4].x, b[4].x);
    }

    #[test]
    fn paint_issues_a_clipped_translucent_fill() {
        let mut canvas = RecordingCanvas::new(300, 100);
        let gradient = LinearGradient::vertical(
            100.0,
            Color::rgba(0, 0x96, 0xFF, 255),
            Color::rgba(0, 0x33, 0xAA, 255),
        );
        paint(&mut canvas, &shape(80.0, 0.0), 0.8, &gradient);

        let ops = &canvas.ops;
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(ops[1], DrawOp::Save);
        assert_eq!(ops[2], DrawOp::GlobalAlpha(0.8));
        assert_eq!(ops[3], DrawOp::BeginPath);
        assert!(matches!(ops[4], DrawOp::MoveTo(_, y) if y == 100.0));

        let clip_at = ops.iter().position(|op| *op == DrawOp::Clip).unwrap();
        assert_eq!(
            &ops[clip_at + 1..],
            &[
                DrawOp::FillGradient(gradient),
                DrawOp::FillRect(0.0, 0.0, 300.0, 100.0),
                DrawOp::Restore,
            ]
        );
        assert_eq!(canvas.path_points().len(), 105);
    }
}
