pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Frame-counted eased move of the fill boundary between two horizontal offsets.
///
/// A new [`begin`](Self::begin) always starts from the offset currently on
/// screen, so interrupting a transition never makes the boundary jump.
#[derive(Debug, Clone)]
pub struct OffsetTransition {
    current: f32,
    start: f32,
    target: f32,
    elapsed: u32,
    total_frames: u32,
    active: bool,
}

impl OffsetTransition {
    pub fn new(initial: f32, total_frames: u32) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            elapsed: 0,
            total_frames: total_frames.max(1),
            active: false,
        }
    }

    pub fn begin(&mut self, target: f32) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0;
        self.active = true;
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }

        self.elapsed += 1;
        let t = (self.elapsed as f32 / self.total_frames as f32).min(1.0);
        self.current = lerp(self.start, self.target, ease_out_cubic(t));

        if self.elapsed >= self.total_frames || self.current == self.target {
            // lerp at t = 1 can be off by an ulp
            self.current = self.target;
            self.active = false;
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn settles_on_target_after_total_frames() {
        let mut tr = OffsetTransition::new(150.0, 50);
        tr.begin(37.3);
        for _ in 0..50 {
            assert!(tr.is_active());
            tr.tick();
        }
        assert!(!tr.is_active());
        assert_eq!(tr.current(), 37.3);

        tr.tick();
        assert_eq!(tr.current(), 37.3);
    }

    #[test]
    fn moves_monotonically_towards_target() {
        let mut tr = OffsetTransition::new(0.0, 50);
        tr.begin(100.0);
        let mut last = tr.current();
        while tr.is_active() {
            tr.tick();
            assert!(tr.current() >= last);
            assert!(tr.current() <= 100.0);
            last = tr.current();
        }
    }

    #[test]
    fn eases_out_front_loaded() {
        let mut tr = OffsetTransition::new(0.0, 50);
        tr.begin(100.0);
        for _ in 0..25 {
            tr.tick();
        }
        // half the frames covers 87.5% of the distance
        assert!((tr.current() - 87.5).abs() < 1e-3);
    }

    #[test]
    fn retarget_starts_from_current_offset() {
        let mut tr = OffsetTransition::new(150.0, 50);
        tr.begin(0.0);
        for _ in 0..10 {
            tr.tick();
        }
        let midway = tr.current();
        assert!(midway < 150.0 && midway > 0.0);

        tr.begin(300.0);
        assert_eq!(tr.start(), midway);
        assert_eq!(tr.current(), midway);
        assert_eq!(tr.elapsed(), 0);

        tr.tick();
        assert!(tr.current() > midway);
    }

    #[test]
    fn same_target_finishes_on_first_tick() {
        let mut tr = OffsetTransition::new(8.0, 50);
        tr.begin(8.0);
        tr.tick();
        assert!(!tr.is_active());
        assert_eq!(tr.current(), 8.0);
    }

    #[test]
    fn zero_frames_is_treated_as_one() {
        let mut tr = OffsetTransition::new(0.0, 0);
        assert_eq!(tr.total_frames(), 1);
        tr.begin(10.0);
        tr.tick();
        assert_eq!(tr.current(), 10.0);
    }
}
