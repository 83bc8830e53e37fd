//! Scroll position → mode transitions.
//!
//! Each region owns a band from "top edge crosses the viewport center" to
//! "bottom edge crosses the viewport center". Every [`ScrollBinder::update`]
//! classifies the viewport center against every band, so the binder is
//! position-driven: nothing depends on having seen an intermediate event.

use crate::mode::{Mode, ModeStore};
use smallvec::SmallVec;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Center entered the band scrolling down.
    Enter,
    /// Center entered the band scrolling up.
    EnterBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub region: RegionId,
    pub mode: Mode,
    pub trigger: Trigger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Band {
    Before,
    Inside,
    After,
}

#[derive(Clone, Debug)]
struct Region {
    id: RegionId,
    mode: Mode,
    top: f32,
    bottom: f32,
    band: Option<Band>,
}

impl Region {
    fn classify(&self, center: f32) -> Band {
        if center < self.top {
            Band::Before
        } else if center >= self.bottom {
            Band::After
        } else {
            Band::Inside
        }
    }
}

pub struct ScrollBinder {
    store: Rc<ModeStore>,
    // kept in page order (by top edge, then registration order)
    regions: Vec<Region>,
    next_id: u64,
    last_center: Option<f32>,
    direction: Direction,
}

impl ScrollBinder {
    pub fn new(store: Rc<ModeStore>) -> Self {
        Self {
            store,
            regions: Vec::new(),
            next_id: 0,
            last_center: None,
            direction: Direction::Forward,
        }
    }

    /// Register a region spanning `[top, bottom)` in document coordinates.
    pub fn register(&mut self, top: f32, bottom: f32, mode: Mode) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        let (top, bottom) = ordered_bounds(top, bottom);
        self.regions.push(Region {
            id,
            mode,
            top,
            bottom,
            band: None,
        });
        self.sort_page_order();
        log::debug!("[scroll] region {:?} {} [{:.0}, {:.0})", id, mode, top, bottom);
        id
    }

    /// Drop a region's trigger; it will never fire again.
    pub fn release(&mut self, id: RegionId) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.id != id);
        self.regions.len() != before
    }

    /// Move a region after a layout change. Takes effect on the next update.
    pub fn set_bounds(&mut self, id: RegionId, top: f32, bottom: f32) -> bool {
        let (top, bottom) = ordered_bounds(top, bottom);
        match self.regions.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.top = top;
                r.bottom = bottom;
            }
            None => return false,
        }
        self.sort_page_order();
        true
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Classify the viewport center against every band and fire entries.
    ///
    /// Returns the triggers fired, in the order `set_mode` was called.
    pub fn update(&mut self, scroll_y: f32, viewport_height: f32) -> SmallVec<[Fired; 4]> {
        let mut fired: SmallVec<[Fired; 4]> = SmallVec::new();
        if !scroll_y.is_finite() || !viewport_height.is_finite() {
            log::warn!("[scroll] ignoring non-finite scroll position");
            return fired;
        }
        let center = scroll_y + viewport_height.max(0.0) * 0.5;
        if let Some(prev) = self.last_center {
            if center > prev {
                self.direction = Direction::Forward;
            } else if center < prev {
                self.direction = Direction::Backward;
            }
        }
        self.last_center = Some(center);

        for r in self.regions.iter_mut() {
            let now = r.classify(center);
            let prev = r.band.replace(now);
            if now == Band::Inside && prev != Some(Band::Inside) {
                let trigger = match prev {
                    Some(Band::After) => Trigger::EnterBack,
                    _ => Trigger::Enter,
                };
                fired.push(Fired {
                    region: r.id,
                    mode: r.mode,
                    trigger,
                });
            }
        }
        if self.direction == Direction::Backward {
            fired.reverse();
        }
        for f in &fired {
            log::debug!("[scroll] {:?} {:?} -> {}", f.trigger, f.region, f.mode);
            self.store.set_mode(f.mode);
        }
        fired
    }

    /// Scroll-end backstop: make the store agree with the band the viewport
    /// center rests in. Returns the mode it set, if it had to set one.
    pub fn settle(&mut self) -> Option<Mode> {
        let mut inside = self
            .regions
            .iter()
            .filter(|r| r.band == Some(Band::Inside));
        let winner = match self.direction {
            Direction::Forward => inside.last(),
            Direction::Backward => inside.next(),
        }?;
        let mode = winner.mode;
        if self.store.get_mode() == mode {
            return None;
        }
        log::info!("[scroll] settle -> {}", mode);
        self.store.set_mode(mode);
        Some(mode)
    }

    fn sort_page_order(&mut self) {
        self.regions
            .sort_by(|a, b| a.top.total_cmp(&b.top).then(a.id.cmp(&b.id)));
    }
}

fn ordered_bounds(top: f32, bottom: f32) -> (f32, f32) {
    if bottom < top {
        (bottom, top)
    } else {
        (top, bottom)
    }
}
