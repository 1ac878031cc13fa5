//! Per-glyph progress state
//!
//! A [`ProgressState`] toggles between the resting values 0 and 1. Each tick
//! moves `scale` by a fixed gap toward the other resting value; once it has
//! travelled past a full unit it snaps, goes idle, and reports completion.

/// Default increment per tick (a full toggle takes about 50 ticks)
pub const DEFAULT_SCALE_GAP: f32 = 0.02;

/// Result of advancing a progress state by one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Nothing is animating; the tick had no effect
    Idle,
    /// Still moving toward the target resting value
    Running,
    /// This tick crossed the threshold and snapped to the resting value
    Completed,
}

impl Progress {
    pub fn is_completed(&self) -> bool {
        matches!(self, Progress::Completed)
    }
}

/// Animation progress of one glyph
#[derive(Clone, Copy, Debug)]
pub struct ProgressState {
    scale: f32,
    direction: i8,
    settled: f32,
    gap: f32,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::with_gap(DEFAULT_SCALE_GAP)
    }

    /// Create a state that moves `gap` per tick
    pub fn with_gap(gap: f32) -> Self {
        Self {
            scale: 0.0,
            direction: 0,
            settled: 0.0,
            gap,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// -1, 0 (idle) or 1
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Last resting value `scale` snapped to
    pub fn settled(&self) -> f32 {
        self.settled
    }

    pub fn is_animating(&self) -> bool {
        self.direction != 0
    }

    /// Advance one tick
    ///
    /// Idle states are left untouched. The tick that carries `scale` more
    /// than one unit away from `settled` snaps it onto the new resting value
    /// and returns [`Progress::Completed`]; that happens exactly once per
    /// toggle.
    pub fn update(&mut self) -> Progress {
        if self.direction == 0 {
            return Progress::Idle;
        }

        let direction = f32::from(self.direction);
        self.scale += self.gap * direction;
        if (self.scale - self.settled).abs() > 1.0 {
            self.scale = self.settled + direction;
            self.direction = 0;
            self.settled = self.scale;
            return Progress::Completed;
        }
        Progress::Running
    }

    /// Begin a toggle toward the other resting value
    ///
    /// Returns `false` without changing anything while a toggle is already in
    /// flight. A state resting at 0 moves toward 1, one resting at 1 moves
    /// toward 0.
    pub fn start_updating(&mut self) -> bool {
        if self.direction != 0 {
            return false;
        }
        self.direction = if self.settled < 0.5 { 1 } else { -1 };
        true
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}
