use std::time::Duration;

use anyhow::Result;
use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};
use log::{debug, info};

use crate::engine::WaveProgress;
use crate::sink::RenderSink;

/// Anything driven once per animation frame.
pub trait FrameTarget {
    fn frame(&mut self);
}

impl<S: RenderSink> FrameTarget for WaveProgress<S> {
    fn frame(&mut self) {
        WaveProgress::frame(self);
    }
}

/// Self-rescheduling frame callback registered on a calloop event loop.
///
/// Every tick re-arms the timer for the next frame. [`stop`](Self::stop), or
/// dropping the loop, removes the pending timer so nothing keeps firing for
/// a discarded target.
pub struct FrameLoop<'l, D> {
    handle: LoopHandle<'l, D>,
    token: Option<RegistrationToken>,
    interval: Duration,
}

impl<'l, D: FrameTarget + 'l> FrameLoop<'l, D> {
    pub fn start(handle: &LoopHandle<'l, D>, interval: Duration) -> Result<Self> {
        let token = handle
            .insert_source(Timer::immediate(), move |_deadline, _, target: &mut D| {
                target.frame();
                TimeoutAction::ToDuration(interval)
            })
            .map_err(|e| anyhow::anyhow!("Failed to schedule frame loop: {}", e.error))?;

        info!("Frame loop started ({:?} per frame)", interval);
        Ok(Self {
            handle: handle.clone(),
            token: Some(token),
            interval,
        })
    }

    /// Interval for a frame-rate cap; 0 is treated as 1 fps.
    pub fn interval_for(fps_cap: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(fps_cap.max(1)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            self.handle.remove(token);
            debug!("Frame loop stopped");
        }
    }
}

impl<'l, D> Drop for FrameLoop<'l, D> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.handle.remove(token);
        }
    }
}
