use crate::dom::{self, EventListener};
use crate::input;
use crate::regions;
use scene_core::{Mode, ModeStore, RegionId, ScrollBinder};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const REGION_SELECTOR: &str = "[data-scroll-mode]";

/// Live scroll binding: the binder, the elements it measures, and the
/// listeners feeding it. Dropping it unhooks the listeners and releases
/// every region.
pub struct ScrollWiring {
    binder: Rc<RefCell<ScrollBinder>>,
    regions: Rc<RefCell<Vec<(web::Element, RegionId)>>>,
    _listeners: Vec<EventListener>,
}

impl ScrollWiring {
    pub fn region_count(&self) -> usize {
        self.regions.borrow().len()
    }
}

impl Drop for ScrollWiring {
    fn drop(&mut self) {
        let mut binder = self.binder.borrow_mut();
        let regions = self.regions.borrow();
        for (_, id) in regions.iter() {
            binder.release(*id);
        }
        log::info!("[scroll] released {} region(s)", regions.len());
    }
}

fn discover_regions(
    document: &web::Document,
    window: &web::Window,
    binder: &mut ScrollBinder,
) -> Vec<(web::Element, RegionId)> {
    let mut out = Vec::new();
    let Ok(nodes) = document.query_selector_all(REGION_SELECTOR) else {
        return out;
    };
    let (scroll_y, _) = dom::scroll_metrics(window);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let raw = el.get_attribute("data-scroll-mode").unwrap_or_default();
        let mode: Mode = match raw.parse() {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[scroll] {}", e);
                continue;
            }
        };
        let rect = el.get_bounding_client_rect();
        let (top, bottom) = input::document_band(rect.top(), rect.bottom(), scroll_y);
        let id = binder.register(top, bottom, mode);
        out.push((el, id));
    }
    out
}

fn refresh_bounds(
    window: &web::Window,
    binder: &mut ScrollBinder,
    regions: &[(web::Element, RegionId)],
) {
    let (scroll_y, _) = dom::scroll_metrics(window);
    for (el, id) in regions {
        let rect = el.get_bounding_client_rect();
        let (top, bottom) = input::document_band(rect.top(), rect.bottom(), scroll_y);
        binder.set_bounds(*id, top, bottom);
    }
}

/// Release regions whose element was removed from the page.
fn prune(binder: &RefCell<ScrollBinder>, regions: &RefCell<Vec<(web::Element, RegionId)>>) {
    let released = regions::prune_detached(
        &mut regions.borrow_mut(),
        &mut binder.borrow_mut(),
        |el: &web::Element| el.is_connected(),
    );
    if released > 0 {
        log::info!("[scroll] released {} detached region(s)", released);
    }
}

fn update(
    window: &web::Window,
    binder: &RefCell<ScrollBinder>,
    regions: &RefCell<Vec<(web::Element, RegionId)>>,
) {
    prune(binder, regions);
    let (scroll_y, height) = dom::scroll_metrics(window);
    binder.borrow_mut().update(scroll_y as f32, height as f32);
}

/// Bind every `[data-scroll-mode]` element on the page to `store`.
pub fn wire_scroll(document: &web::Document, store: Rc<ModeStore>) -> Option<ScrollWiring> {
    let window = web::window()?;
    let binder = Rc::new(RefCell::new(ScrollBinder::new(store)));
    let regions = discover_regions(document, &window, &mut binder.borrow_mut());
    log::info!("[scroll] bound {} region(s)", regions.len());
    let regions = Rc::new(RefCell::new(regions));

    // seed the mode for a page loaded mid-scroll
    update(&window, &binder, &regions);

    let mut listeners = Vec::new();

    let (w, b, r) = (window.clone(), binder.clone(), regions.clone());
    listeners.extend(EventListener::new(&window, "scroll", move |_| {
        update(&w, &b, &r);
    }));

    // backstop for transitions a fast fling might leave inconsistent
    let (b, r) = (binder.clone(), regions.clone());
    listeners.extend(EventListener::new(&window, "scrollend", move |_| {
        prune(&b, &r);
        b.borrow_mut().settle();
    }));

    let (w, b, r) = (window.clone(), binder.clone(), regions.clone());
    listeners.extend(EventListener::new(&window, "resize", move |_| {
        prune(&b, &r);
        refresh_bounds(&w, &mut b.borrow_mut(), &r.borrow());
        update(&w, &b, &r);
        b.borrow_mut().settle();
    }));

    Some(ScrollWiring {
        binder,
        regions,
        _listeners: listeners,
    })
}
