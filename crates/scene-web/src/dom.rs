use scene_core::SceneConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Window scroll offset and inner height in CSS pixels.
#[inline]
pub fn scroll_metrics(window: &web::Window) -> (f64, f64) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (scroll_y, height)
}

#[inline]
pub fn viewport_css_width() -> f32 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().clamp(1.0, 2.0);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// An event listener that is removed from its target when dropped.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::error!("addEventListener({}) failed: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn data_attr<T: std::str::FromStr>(el: &web::Element, name: &str) -> Option<T> {
    let raw = el.get_attribute(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[scene] ignoring {}=\"{}\"", name, raw);
            None
        }
    }
}

/// Scene configuration with overrides from `data-*` attributes on the canvas.
pub fn read_scene_config(canvas: &web::HtmlCanvasElement) -> SceneConfig {
    let mut cfg = SceneConfig::default();
    cfg.seed = data_attr(canvas, "data-seed").unwrap_or_else(|| js_sys::Date::now() as u64);
    if let Some(n) = data_attr(canvas, "data-particles") {
        cfg.desktop_particles = n;
    }
    if let Some(n) = data_attr(canvas, "data-particles-mobile") {
        cfg.mobile_particles = n;
    }
    log::info!(
        "[scene] config seed={} particles={}/{}",
        cfg.seed,
        cfg.desktop_particles,
        cfg.mobile_particles
    );
    cfg
}
