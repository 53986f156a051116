use tiny_skia::{
    FillRule, GradientStop, Mask, Paint, PathBuilder, Pixmap, Point, Shader, SpreadMode, Transform,
};

use super::draw::{DrawContext, LinearGradient};

#[derive(Clone)]
struct PaintState {
    alpha: f32,
    clip: Option<Mask>,
    fill: Option<LinearGradient>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            clip: None,
            fill: None,
        }
    }
}

/// Gradient paint built for one (gradient, alpha) pair; survives
/// save/restore so a per-frame repaint reuses it.
struct CachedPaint {
    gradient: LinearGradient,
    alpha: f32,
    paint: Paint<'static>,
}

/// Software [`DrawContext`] rasterizing into a premultiplied RGBA pixmap.
pub struct SkiaCanvas {
    pixmap: Pixmap,
    state: PaintState,
    saved: Vec<PaintState>,
    path: PathBuilder,
    fill_paint: Option<CachedPaint>,
    #[cfg(test)]
    shader_builds: u32,
}

impl SkiaCanvas {
    /// Returns `None` when the size is zero or too large to allocate.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            state: PaintState::default(),
            saved: Vec::new(),
            path: PathBuilder::new(),
            fill_paint: None,
            #[cfg(test)]
            shader_builds: 0,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Copies the pixels into `dst` as little-endian ARGB8888 (B, G, R, A
    /// bytes), the layout `wl_shm` expects. Both buffers stay premultiplied.
    pub fn write_argb8888(&self, dst: &mut [u8]) {
        let len = dst.len().min(self.pixmap.data().len()) & !3;
        let src: &[[u8; 4]] = bytemuck::cast_slice(&self.pixmap.data()[..len]);
        let dst: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut dst[..len]);
        for (d, s) in dst.iter_mut().zip(src) {
            *d = [s[2], s[1], s[0], s[3]];
        }
    }

    /// Rebuilds the gradient paint only when the fill or alpha changed.
    fn refresh_fill_paint(&mut self) {
        let Some(gradient) = &self.state.fill else {
            return;
        };
        let alpha = self.state.alpha;
        if let Some(cached) = &self.fill_paint {
            if cached.alpha == alpha && cached.gradient == *gradient {
                return;
            }
        }

        let mut paint = Paint::default();
        paint.shader = gradient_shader(gradient, alpha);
        paint.anti_alias = true;
        self.fill_paint = Some(CachedPaint {
            gradient: gradient.clone(),
            alpha,
            paint,
        });
        #[cfg(test)]
        {
            self.shader_builds += 1;
        }
    }
}

fn gradient_shader(gradient: &LinearGradient, alpha: f32) -> Shader<'static> {
    let stops: Vec<GradientStop> = gradient
        .stops
        .iter()
        .map(|(pos, color)| GradientStop::new(*pos, color.with_alpha_scaled(alpha).to_skia()))
        .collect();
    let fallback = gradient
        .stops
        .first()
        .map(|(_, color)| color.with_alpha_scaled(alpha).to_skia())
        .unwrap_or(tiny_skia::Color::TRANSPARENT);

    tiny_skia::LinearGradient::new(
        Point::from_xy(gradient.start.x, gradient.start.y),
        Point::from_xy(gradient.end.x, gradient.end.y),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .unwrap_or(Shader::SolidColor(fallback))
}

impl DrawContext for SkiaCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_fill_gradient(&mut self, gradient: &LinearGradient) {
        self.state.fill = Some(gradient.clone());
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    fn clip(&mut self) {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let builder = std::mem::replace(&mut self.path, PathBuilder::new());

        let mask = match (builder.finish(), self.state.clip.take()) {
            (Some(path), Some(mut mask)) => {
                mask.intersect_path(&path, FillRule::Winding, true, Transform::identity());
                Some(mask)
            }
            (Some(path), None) => Mask::new(w, h).map(|mut mask| {
                mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
                mask
            }),
            // an empty path clips everything away
            (None, _) => Mask::new(w, h),
        };
        self.state.clip = mask;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let Some(rect) = tiny_skia::Rect::from_xywh(x, y, w, h) else {
            return;
        };

        // without a gradient the fill is fully transparent
        if self.state.fill.is_none() {
            return;
        }
        self.refresh_fill_paint();
        let Some(cached) = &self.fill_paint else {
            return;
        };

        self.pixmap.fill_rect(
            rect,
            &cached.paint,
            Transform::identity(),
            self.state.clip.as_ref(),
        );
    }
}
