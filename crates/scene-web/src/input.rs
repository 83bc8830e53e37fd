use scene_core::Pointer;
use web_sys as web;

/// Map a CSS-pixel position inside a `width` x `height` box to `[-1, 1]`
/// with y up. An empty box yields the neutral pointer; non-finite input is
/// passed through for the scene to reject.
#[inline]
pub fn pointer_ndc(x_css: f32, y_css: f32, width: f32, height: f32) -> Pointer {
    if !(width > 0.0 && height > 0.0) {
        return Pointer::NEUTRAL;
    }
    let x = (x_css / width) * 2.0 - 1.0;
    let y = 1.0 - (y_css / height) * 2.0;
    Pointer::new(clamp_unit(x), clamp_unit(y))
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        v
    }
}

/// Region band in document coordinates from a viewport-relative rect.
#[inline]
pub fn document_band(rect_top: f64, rect_bottom: f64, scroll_y: f64) -> (f32, f32) {
    ((rect_top + scroll_y) as f32, (rect_bottom + scroll_y) as f32)
}

/// Pointer to keep after a `pointerout`. Moving onto another element keeps
/// the last position; leaving the window (no related target) means the
/// pointer is absent, which reads as neutral.
#[inline]
pub fn pointer_after_out(current: Pointer, entered_element: bool) -> Pointer {
    if entered_element {
        current
    } else {
        Pointer::NEUTRAL
    }
}

/// Pointer position for mouse/pen events relative to the canvas; touch
/// contacts do not steer the scene.
#[inline]
pub fn pointer_from_event(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Pointer> {
    if ev.pointer_type() == "touch" {
        return None;
    }
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Some(pointer_ndc(x_css, y_css, rect.width() as f32, rect.height() as f32))
}
