#![cfg(target_arch = "wasm32")]
use scene_core::{Mode, ModeStore, Pointer, Scene};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod dom;
mod events;
mod frame;
mod input;
mod regions;
mod render;
mod resize;

/// Everything a mounted scene keeps alive. Field order is drop order: the
/// loop goes first so the scene unsubscribes before the listeners go.
struct SceneHandle {
    frame_loop: frame::LoopHandle,
    scroll: Option<events::ScrollWiring>,
    _pointer: Vec<dom::EventListener>,
    _resize: Option<dom::EventListener>,
    _pagehide: Option<dom::EventListener>,
    store: Rc<ModeStore>,
}

thread_local! {
    static MOUNTED: RefCell<Option<SceneHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    let pending_width = resize::PendingWidth::default();
    let canvas_resize = canvas.clone();
    let width_resize = pending_width.clone();
    let resize = dom::EventListener::new(&window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas_resize);
        // breakpoint check runs once on the next frame
        width_resize.request(dom::viewport_css_width());
    });

    let config = dom::read_scene_config(&canvas);
    let store = Rc::new(ModeStore::new());
    let scene = Scene::new(config, store.clone(), dom::viewport_css_width())
        .map_err(|e| anyhow::anyhow!("scene error: {}", e))?;
    let capacity = scene.field().len();

    let scroll = events::wire_scroll(&document, store.clone());
    let pointer = Rc::new(Cell::new(Pointer::NEUTRAL));
    let pointer_listeners = events::wire_pointer(&canvas, pointer.clone());

    let gpu = frame::init_gpu(&canvas, capacity).await;
    if gpu.is_none() {
        log::warn!("[gpu] unavailable; scene runs without drawing");
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene,
        gpu,
        canvas,
        pointer,
        pending_width,
    )));
    let frame_loop = frame::start_loop(ctx);

    let pagehide = dom::EventListener::new(&window, "pagehide", |_| unmount());

    let handle = SceneHandle {
        frame_loop,
        scroll,
        _pointer: pointer_listeners,
        _resize: resize,
        _pagehide: pagehide,
        store,
    };
    if let Some(prev) = MOUNTED.with(|m| m.borrow_mut().replace(handle)) {
        log::warn!("[scene] replacing an already mounted scene");
        drop(prev);
    }
    Ok(())
}

/// Tear the scene down: stop the loop and unhook every listener.
#[wasm_bindgen]
pub fn unmount() {
    let handle = MOUNTED.with(|m| m.borrow_mut().take());
    if let Some(h) = handle {
        h.frame_loop.stop();
        log::info!(
            "[scene] unmounted after {} frames ({} scroll regions)",
            h.frame_loop.frames(),
            h.scroll.as_ref().map_or(0, |s| s.region_count())
        );
    }
}

/// Current narrative mode, as its lowercase name.
#[wasm_bindgen]
pub fn current_mode() -> Option<String> {
    MOUNTED.with(|m| {
        m.borrow()
            .as_ref()
            .map(|h| h.store.get_mode().as_str().to_string())
    })
}

/// Force a mode from script; unknown names are rejected.
#[wasm_bindgen]
pub fn set_mode(name: &str) -> Result<(), JsValue> {
    let mode: Mode = name
        .parse()
        .map_err(|e: scene_core::ParseModeError| JsValue::from_str(&e.to_string()))?;
    MOUNTED.with(|m| {
        if let Some(h) = m.borrow().as_ref() {
            h.store.set_mode(mode);
        }
    });
    Ok(())
}
