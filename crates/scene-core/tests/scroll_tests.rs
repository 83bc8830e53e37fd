use scene_core::{Direction, Mode, ModeStore, ScrollBinder, Trigger};
use std::cell::RefCell;
use std::rc::Rc;

const VIEWPORT_H: f32 = 800.0;

struct Page {
    store: Rc<ModeStore>,
    binder: ScrollBinder,
    transitions: Rc<RefCell<Vec<Mode>>>,
}

/// Three stacked 1000px sections below a 1000px hero with no region.
fn page() -> Page {
    let store = Rc::new(ModeStore::new());
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let t = transitions.clone();
    store.subscribe(move |m| t.borrow_mut().push(m));
    let mut binder = ScrollBinder::new(store.clone());
    binder.register(1000.0, 2000.0, Mode::Drift);
    binder.register(2000.0, 3000.0, Mode::Warning);
    binder.register(3000.0, 4000.0, Mode::Order);
    Page {
        store,
        binder,
        transitions,
    }
}

fn scroll_to(p: &mut Page, scroll_y: f32) {
    p.binder.update(scroll_y, VIEWPORT_H);
}

#[test]
fn scrolling_down_walks_modes_in_page_order() {
    let mut p = page();
    let mut y = 0.0;
    while y <= 4000.0 {
        scroll_to(&mut p, y);
        y += 25.0;
    }
    assert_eq!(*p.transitions.borrow(), vec![Mode::Drift, Mode::Warning, Mode::Order]);
    assert_eq!(p.store.get_mode(), Mode::Order);
}

#[test]
fn scrolling_back_up_walks_modes_in_reverse() {
    let mut p = page();
    scroll_to(&mut p, 0.0);
    // jump past every band, then come back up slowly
    scroll_to(&mut p, 5000.0);
    p.transitions.borrow_mut().clear();

    let mut y = 5000.0;
    while y >= 0.0 {
        scroll_to(&mut p, y);
        y -= 25.0;
    }
    assert_eq!(*p.transitions.borrow(), vec![Mode::Order, Mode::Warning, Mode::Drift]);
    assert_eq!(p.binder.direction(), Direction::Backward);
}

#[test]
fn entry_from_below_is_enter_back() {
    let mut p = page();
    scroll_to(&mut p, 4000.0);
    let fired = p.binder.update(2200.0, VIEWPORT_H);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].mode, Mode::Warning);
    assert_eq!(fired[0].trigger, Trigger::EnterBack);
}

#[test]
fn jump_over_bands_lands_on_resting_region_only() {
    let mut p = page();
    scroll_to(&mut p, 0.0);
    // center goes from 400 straight to 3400
    let fired = p.binder.update(3000.0, VIEWPORT_H);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].mode, Mode::Order);
    assert_eq!(*p.transitions.borrow(), vec![Mode::Order]);
}

#[test]
fn first_update_inside_a_band_fires_enter() {
    let mut p = page();
    let fired = p.binder.update(1700.0, VIEWPORT_H); // center 2100
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].trigger, Trigger::Enter);
    assert_eq!(p.store.get_mode(), Mode::Warning);
}

#[test]
fn overlapping_bands_are_last_writer_wins_by_direction() {
    let store = Rc::new(ModeStore::new());
    let mut binder = ScrollBinder::new(store.clone());
    binder.register(1000.0, 2000.0, Mode::Drift);
    binder.register(1500.0, 2500.0, Mode::Warning);

    binder.update(0.0, VIEWPORT_H);
    binder.update(1400.0, VIEWPORT_H); // center 1800, inside both
    assert_eq!(store.get_mode(), Mode::Warning);

    binder.update(5000.0, VIEWPORT_H);
    binder.update(1400.0, VIEWPORT_H);
    // backward: page order reversed, so the earlier region writes last
    assert_eq!(store.get_mode(), Mode::Drift);
}

#[test]
fn settle_restores_resting_region_mode() {
    let mut p = page();
    scroll_to(&mut p, 1800.0); // inside warning
    p.store.set_mode(Mode::Chaos); // someone else wrote meanwhile
    assert_eq!(p.binder.settle(), Some(Mode::Warning));
    assert_eq!(p.store.get_mode(), Mode::Warning);
    assert_eq!(p.binder.settle(), None);
}

#[test]
fn settle_outside_all_bands_leaves_mode_alone() {
    let mut p = page();
    scroll_to(&mut p, 0.0);
    assert_eq!(p.binder.settle(), None);
    assert_eq!(p.store.get_mode(), Mode::Chaos);
}

#[test]
fn released_region_never_fires() {
    let mut p = page();
    let store = p.store.clone();
    let mut binder = ScrollBinder::new(store.clone());
    let gone = binder.register(1000.0, 2000.0, Mode::Warning);
    binder.update(0.0, VIEWPORT_H);
    assert!(binder.release(gone));
    assert!(binder.is_empty());
    binder.update(1000.0, VIEWPORT_H);
    assert_eq!(store.get_mode(), Mode::Chaos);
    // the page fixture is unaffected
    scroll_to(&mut p, 1000.0);
    assert_eq!(store.get_mode(), Mode::Drift);
}

#[test]
fn moved_bounds_take_effect_on_next_update() {
    let store = Rc::new(ModeStore::new());
    let mut binder = ScrollBinder::new(store.clone());
    let r = binder.register(1000.0, 2000.0, Mode::Order);
    binder.update(0.0, VIEWPORT_H);
    assert!(binder.set_bounds(r, 0.0, 1000.0));
    binder.update(0.0, VIEWPORT_H);
    assert_eq!(store.get_mode(), Mode::Order);
}

#[test]
fn non_finite_scroll_is_ignored() {
    let mut p = page();
    let fired = p.binder.update(f32::NAN, VIEWPORT_H);
    assert!(fired.is_empty());
    assert!(p.transitions.borrow().is_empty());
}
