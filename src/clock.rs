//! Clock sources and frame timing
//!
//! The simulation never reads wall time itself. A [`Clock`] is read once per
//! frame and the resulting timestamp is threaded through the tick, so tests
//! can replay a run exactly with a [`ManualClock`].

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// A monotonic time source in seconds
pub trait Clock {
    /// Seconds since the clock's origin
    fn now(&self) -> f64;

    /// Block until `deadline` (seconds on this clock). Default is a no-op for
    /// clocks driven by an external frame source.
    fn wait_until(&self, _deadline: f64) {}
}

/// Real monotonic clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn wait_until(&self, deadline: f64) {
        let remaining = deadline - self.now();
        if remaining > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(remaining));
        }
    }
}

/// Hand-driven clock for tests and fast headless runs.
///
/// Waiting jumps straight to the deadline, so a loop paced by this clock runs
/// as fast as the CPU allows while seeing exactly 60 Hz timestamps.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn wait_until(&self, deadline: f64) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}

/// Turns per-frame clock reads into frame deltas, pacing deadlines and FPS
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frame_duration: f64,
    last_frame: Option<f64>,
    next_deadline: f64,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
}

impl FrameTimer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_duration: 1.0 / target_fps.max(1) as f64,
            last_frame: None,
            next_deadline: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
        }
    }

    /// Record the start of a frame at `now` and return the delta since the
    /// previous frame (one nominal frame for the very first call)
    pub fn begin_frame(&mut self, now: f64) -> f64 {
        let dt = match self.last_frame {
            Some(last) => (now - last).max(0.0),
            None => self.frame_duration,
        };
        self.last_frame = Some(now);

        // Schedule from the previous deadline to avoid drift, but never
        // queue up frames after a stall
        self.next_deadline = (self.next_deadline + self.frame_duration).max(now);
        if self.frames_seen == 0 {
            self.next_deadline = now + self.frame_duration;
        }

        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;
        dt
    }

    /// When the next frame should start
    pub fn next_deadline(&self) -> f64 {
        self.next_deadline
    }

    /// Average frames per second over the last window, once it is full
    pub fn fps(&self) -> Option<f64> {
        if self.frames_seen < FPS_WINDOW {
            return None;
        }
        let newest = self.frame_times[(self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW];
        let oldest = self.frame_times[self.frame_index];
        let elapsed = newest - oldest;
        (elapsed > 0.0).then(|| (FPS_WINDOW - 1) as f64 / elapsed)
    }

    pub fn frame_duration(&self) -> f64 {
        self.frame_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_wait_jumps_to_deadline() {
        let clock = ManualClock::new(1.0);
        clock.wait_until(1.5);
        assert_eq!(clock.now(), 1.5);
        // Deadlines in the past never move time backwards
        clock.wait_until(0.5);
        assert_eq!(clock.now(), 1.5);
    }

    #[test]
    fn test_frame_timer_deltas() {
        let mut timer = FrameTimer::new(60);
        let first = timer.begin_frame(10.0);
        assert!((first - 1.0 / 60.0).abs() < 1e-12);
        let dt = timer.begin_frame(10.05);
        assert!((dt - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_frame_timer_paces_manual_clock_at_target_rate() {
        let clock = ManualClock::new(0.0);
        let mut timer = FrameTimer::new(60);
        for _ in 0..120 {
            timer.begin_frame(clock.now());
            clock.wait_until(timer.next_deadline());
        }
        assert!((clock.now() - 2.0).abs() < 1e-9);
        let fps = timer.fps().unwrap();
        assert!((fps - 60.0).abs() < 1e-6, "fps was {fps}");
    }

    #[test]
    fn test_frame_timer_does_not_catch_up_after_stall() {
        let mut timer = FrameTimer::new(60);
        timer.begin_frame(0.0);
        timer.begin_frame(5.0);
        assert!(timer.next_deadline() >= 5.0);
    }
}
