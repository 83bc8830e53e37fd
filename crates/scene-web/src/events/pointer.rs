use crate::dom::EventListener;
use crate::input;
use scene_core::Pointer;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the latest pointer position for the frame loop to sample, falling
/// back to neutral once the pointer leaves the window.
///
/// The returned listeners unhook themselves when dropped.
pub fn wire_pointer(
    canvas: &web::HtmlCanvasElement,
    pointer: Rc<Cell<Pointer>>,
) -> Vec<EventListener> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let canvas = canvas.clone();
    let moved = pointer.clone();
    let on_move = EventListener::new(&window, "pointermove", move |ev: web::Event| {
        if let Some(pev) = ev.dyn_ref::<web::PointerEvent>() {
            if let Some(p) = input::pointer_from_event(pev, &canvas) {
                moved.set(p);
            }
        }
    });
    let on_out = EventListener::new(&window, "pointerout", move |ev: web::Event| {
        if let Some(pev) = ev.dyn_ref::<web::PointerEvent>() {
            let entered = pev.related_target().is_some();
            pointer.set(input::pointer_after_out(pointer.get(), entered));
        }
    });
    on_move.into_iter().chain(on_out).collect()
}
