use crate::camera;
use crate::render;
use crate::resize::PendingWidth;
use instant::Instant;
use scene_core::{FrameOutput, Pointer, Scene, StopHandle, Ticker, MAX_FRAME_DT};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Scene,
    pub gpu: Option<render::GpuState<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<Cell<Pointer>>,
    /// CSS width from the latest window resize, consumed by the next frame.
    pub pending_width: PendingWidth,
    pub out: FrameOutput,
    pub slow_frames: u64,
}

impl FrameContext {
    pub fn new(
        scene: Scene,
        gpu: Option<render::GpuState<'static>>,
        canvas: web::HtmlCanvasElement,
        pointer: Rc<Cell<Pointer>>,
        pending_width: PendingWidth,
    ) -> Self {
        Self {
            scene,
            gpu,
            canvas,
            pointer,
            pending_width,
            out: FrameOutput::default(),
            slow_frames: 0,
        }
    }

    pub fn frame(&mut self, dt: f32) {
        if dt >= MAX_FRAME_DT {
            self.slow_frames += 1;
            log::debug!("[frame] long frame ({} so far)", self.slow_frames);
        }

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.scene.set_pointer(self.pointer.get());
        self.scene.set_surface_size(w as f32, h as f32);
        if let Some(width) = self.pending_width.take() {
            match self.scene.resize(width) {
                Ok(true) => {
                    log::info!("[frame] particle field rebuilt ({})", self.scene.field().len())
                }
                Ok(false) => {}
                Err(e) => log::error!("[frame] resize error: {}", e),
            }
        }
        self.scene.frame(&mut self.out);

        if let Some(g) = &mut self.gpu {
            let cfg = self.scene.config();
            let aspect = w.max(1) as f32 / h.max(1) as f32;
            let view_proj = camera::view_proj(cfg.camera_z, cfg.fov_y_deg, aspect);
            let eye = camera::eye(cfg.camera_z);
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&self.out, view_proj, eye) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    particle_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, particle_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running animation loop. Stopping (or dropping) cancels the pending
/// animation frame and releases the frame context.
pub struct LoopHandle {
    ticker: Rc<RefCell<Ticker>>,
    stop: StopHandle,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: RafClosure,
}

impl LoopHandle {
    pub fn frames(&self) -> u64 {
        self.ticker.borrow().frames()
    }

    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.stop.stop();
        // mid-tick the ticker picks the flag up on its next tick instead
        if let Ok(mut ticker) = self.ticker.try_borrow_mut() {
            ticker.stop();
        }
        if let Ok(mut tick) = self.tick.try_borrow_mut() {
            tick.take();
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &RafClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    let id = match tick.borrow().as_ref() {
        Some(cb) => w.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
        None => None,
    };
    raf_id.set(id);
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let ticker = Rc::new(RefCell::new(Ticker::new(move |dt| {
        frame_ctx.borrow_mut().frame(dt)
    })));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: RafClosure = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let ticker_tick = ticker.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        let keep_going = ticker_tick.borrow_mut().tick(Instant::now());
        if keep_going {
            request_frame(&tick_clone, &raf_tick);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    log::info!("[frame] loop started");

    LoopHandle {
        stop: ticker.borrow().stop_handle(),
        ticker,
        raf_id,
        tick,
    }
}
