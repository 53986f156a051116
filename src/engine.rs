use std::f64::consts::TAU;

use log::{debug, error, info};

use crate::config::MeterConfig;
use crate::error::WaveError;
use crate::gfx::anim::OffsetTransition;
use crate::gfx::draw::LinearGradient;
use crate::gfx::wave::{self, WaveShape};
use crate::progress::ProgressMapper;
use crate::sink::RenderSink;

/// Live, per-instance animation values. Only the engine mutates them.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub progress: f32,
    pub transition: OffsetTransition,
    /// Grows by `wave_speed` every frame and is never reset.
    pub wave_phase: f64,
    pub wave_speed: f64,
}

/// Liquid-fill progress meter: a wavy boundary that eases towards the
/// current progress while the wave keeps moving on its own clock.
pub struct WaveProgress<S: RenderSink> {
    config: MeterConfig,
    mapper: ProgressMapper,
    gradient: LinearGradient,
    state: AnimationState,
    sink: S,
    surface: S::Surface,
}

impl<S: RenderSink> WaveProgress<S> {
    pub fn new(mut sink: S, surface_id: &str, config: MeterConfig) -> Result<Self, WaveError> {
        config.validate()?;
        let [top, bottom] = config.colors()?;

        let surface = sink
            .resolve_surface(surface_id, config.width, config.height)
            .ok_or_else(|| {
                error!("Drawing surface '{}' not found", surface_id);
                WaveError::SurfaceNotFound(surface_id.to_string())
            })?;

        let midpoint = config.width as f32 * 0.5;
        let state = AnimationState {
            progress: 0.0,
            transition: OffsetTransition::new(midpoint, config.transition_frames),
            wave_phase: f64::from(midpoint),
            wave_speed: f64::from(config.wave_speed),
        };

        let mut engine = Self {
            mapper: ProgressMapper::new(&config),
            gradient: LinearGradient::vertical(config.height as f32, top, bottom),
            state,
            sink,
            surface,
            config,
        };
        info!(
            "Wave meter '{}' ready: {}x{}, goal {}",
            surface_id, engine.config.width, engine.config.height, engine.config.goal_amount
        );

        engine.set_progress(0.0);
        Ok(engine)
    }

    /// Clamps `percentage` into 0..=100, eases the boundary towards it and
    /// writes the counter text.
    pub fn set_progress(&mut self, percentage: f32) {
        let update = self.mapper.map(percentage);
        debug!(
            "Progress {} -> {} (offset {} -> {})",
            self.state.progress,
            update.progress,
            self.state.transition.current(),
            update.target_offset
        );

        self.state.progress = update.progress;
        self.state.transition.begin(update.target_offset);
        self.sink.write_counter_text(&update.counter);
    }

    pub fn change_progress(&mut self, delta: f32) {
        self.set_progress(self.state.progress + delta);
    }

    pub fn reset_progress(&mut self) {
        self.set_progress(0.0);
    }

    pub fn set_wave_speed(&mut self, speed: f64) {
        self.state.wave_speed = speed;
    }

    /// One animation frame: advance the wave clock, step the transition and
    /// repaint the surface.
    pub fn frame(&mut self) {
        self.state.wave_phase += self.state.wave_speed;
        self.state.transition.tick();

        let shape = WaveShape {
            offset: self.state.transition.current(),
            // sin is periodic, so only the wrapped phase has to fit an f32
            phase: self.state.wave_phase.rem_euclid(TAU) as f32,
            amplitude: self.config.wave_height,
            width: self.config.width as f32,
            height: self.config.height as f32,
        };
        wave::paint(&mut self.surface, &shape, self.config.opacity, &self.gradient);
    }

    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    pub fn offset(&self) -> f32 {
        self.state.transition.current()
    }

    pub fn target_offset(&self) -> f32 {
        self.state.transition.target()
    }

    pub fn wave_phase(&self) -> f64 {
        self.state.wave_phase
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn surface(&self) -> &S::Surface {
        &self.surface
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
