//! Frame timing and frames-per-second counter.

use web_time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Frame timing with a frames-per-second counter for the overlay.
///
/// Frames are counted over one wall-clock second; the count is published
/// when the second closes, so the reading changes at most once a second.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Start of the current counting window
    window_start: Instant,
    /// Frames ended inside the current window
    frames_in_window: u32,
    /// Frames counted in the last completed window
    fps: u32,
}

impl FrameTiming {
    /// Create a timer whose first frame starts now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a timer whose first frame starts at `now`.
    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            window_start: now,
            frames_in_window: 0,
            fps: 0,
        }
    }

    /// Call after rendering. Returns the frame's duration in seconds.
    pub fn end_frame(&mut self) -> f32 {
        self.end_frame_at(Instant::now())
    }

    /// [`end_frame`](Self::end_frame) with an explicit timestamp.
    pub fn end_frame_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames_in_window += 1;

        let in_window = now.saturating_duration_since(self.window_start);
        if in_window >= WINDOW {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            // Skip whole idle seconds rather than replaying them.
            let whole = in_window.as_secs() as u32;
            self.window_start += WINDOW * whole;
        }
        dt
    }

    /// Frames counted in the last full second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}
