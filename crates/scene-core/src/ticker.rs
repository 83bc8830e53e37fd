//! Frame scheduler abstraction.
//!
//! The host (requestAnimationFrame on the web, a plain loop in tests) calls
//! [`Ticker::tick`] once per display refresh. Stopping drops the step closure
//! so anything it captured is released immediately.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Upper bound on the `dt` reported to the step, in seconds.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Cloneable "please stop" flag, usable from event handlers that do not own
/// the ticker.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

pub struct Ticker {
    step: Option<Box<dyn FnMut(f32)>>,
    last: Option<Instant>,
    frames: u64,
    stop: StopHandle,
}

impl Ticker {
    pub fn new(step: impl FnMut(f32) + 'static) -> Self {
        Self {
            step: Some(Box::new(step)),
            last: None,
            frames: 0,
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        self.step.is_some() && !self.stop.is_stopped()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stop(&mut self) {
        self.stop.stop();
        if self.step.take().is_some() {
            log::info!("[scene] ticker stopped after {} frames", self.frames);
        }
    }

    /// Run one step. Returns `false` once stopped; the host should stop
    /// scheduling further ticks.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.stop.is_stopped() {
            self.stop();
            return false;
        }
        let dt = match self.last {
            Some(prev) if now > prev => (now - prev).as_secs_f32().min(MAX_FRAME_DT),
            _ => 0.0,
        };
        self.last = Some(now);
        if let Some(step) = self.step.as_mut() {
            step(dt);
            self.frames += 1;
            true
        } else {
            false
        }
    }
}
