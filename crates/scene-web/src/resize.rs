use std::cell::Cell;
use std::rc::Rc;

/// Latest viewport width seen by the window `resize` listener, waiting for
/// the frame loop. Bursts of resize events collapse into one breakpoint check.
#[derive(Clone, Debug, Default)]
pub struct PendingWidth(Rc<Cell<Option<f32>>>);

impl PendingWidth {
    pub fn request(&self, width_css: f32) {
        if width_css.is_finite() && width_css > 0.0 {
            self.0.set(Some(width_css));
        }
    }

    pub fn take(&self) -> Option<f32> {
        self.0.take()
    }
}
