use scene_core::{FrameOutput, Mode, ModeStore, Pointer, Scene, SceneConfig, Ticker};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn small_config() -> SceneConfig {
    SceneConfig {
        desktop_particles: 120,
        mobile_particles: 40,
        ..SceneConfig::default()
    }
}

#[test]
fn breakpoint_picks_particle_count() {
    let cfg = SceneConfig::default();
    assert_eq!(cfg.particle_count_for_width(375.0), 500);
    assert_eq!(cfg.particle_count_for_width(767.9), 500);
    assert_eq!(cfg.particle_count_for_width(768.0), 1500);
    assert_eq!(cfg.particle_count_for_width(1920.0), 1500);
}

#[test]
fn frame_reads_mode_from_store_and_emits_instances() {
    let store = Rc::new(ModeStore::new());
    let mut scene = Scene::new(small_config(), store.clone(), 1280.0).expect("scene");
    let mut out = FrameOutput::default();

    scene.frame(&mut out);
    assert_eq!(out.mode, Mode::Chaos);
    assert_eq!(out.particles.len(), 120);
    assert_eq!(out.rings.len(), 3);

    store.set_mode(Mode::Order);
    for _ in 0..100 {
        scene.frame(&mut out);
    }
    assert_eq!(out.mode, Mode::Order);
    assert!(out.centerpiece_scale > 0.9);
    assert_eq!(scene.frames(), 101);
    assert!(out.particles.iter().all(|i| i.is_finite()));
}

#[test]
fn resize_rebuilds_field_only_across_breakpoint() {
    let store = Rc::new(ModeStore::new());
    let mut scene = Scene::new(small_config(), store, 400.0).expect("scene");
    assert_eq!(scene.field().len(), 40);
    assert_eq!(scene.resize(500.0), Ok(false));
    assert_eq!(scene.resize(1024.0), Ok(true));
    assert_eq!(scene.field().len(), 120);
    assert_eq!(scene.resize(2048.0), Ok(false));
}

#[test]
fn field_rebuild_keeps_centerpiece_state() {
    let store = Rc::new(ModeStore::new());
    store.set_mode(Mode::Order);
    let mut scene = Scene::new(small_config(), store, 1024.0).expect("scene");
    let mut out = FrameOutput::default();
    for _ in 0..30 {
        scene.frame(&mut out);
    }
    let before = scene.centerpiece().clone();
    assert_eq!(scene.resize(300.0), Ok(true));
    assert_eq!(scene.centerpiece(), &before);
}

#[test]
fn non_finite_pointer_keeps_frames_finite() {
    let store = Rc::new(ModeStore::new());
    store.set_mode(Mode::Order);
    let mut scene = Scene::new(small_config(), store, 1024.0).expect("scene");
    scene.set_surface_size(1024.0, 768.0);
    let mut out = FrameOutput::default();
    scene.set_pointer(Pointer::new(0.3, 0.3));
    scene.frame(&mut out);
    let held = scene.centerpiece().position;

    scene.set_pointer(Pointer::new(f32::NAN, f32::NAN));
    scene.frame(&mut out);
    assert_eq!(scene.centerpiece().position, held);
    assert!(out.rings.iter().chain(&out.particles).all(|i| i.is_finite()));
}

#[test]
fn scene_polls_the_store_once_per_frame() {
    let store = Rc::new(ModeStore::new());
    let mut scene = Scene::new(small_config(), store.clone(), 1024.0).expect("scene");
    let mut out = FrameOutput::default();
    assert_eq!(store.subscriber_count(), 0);

    // a mode set between frames is picked up by the next frame
    store.set_mode(Mode::Warning);
    store.set_mode(Mode::Drift);
    scene.frame(&mut out);
    assert_eq!(out.mode, Mode::Drift);

    drop(scene);
    assert_eq!(Rc::strong_count(&store), 1);
}

#[test]
fn ticker_steps_until_stopped_then_releases_step() {
    let calls = Rc::new(Cell::new(0u32));
    let c = calls.clone();
    let mut ticker = Ticker::new(move |_dt| c.set(c.get() + 1));
    assert_eq!(Rc::strong_count(&calls), 2);

    let t0 = Instant::now();
    for i in 0..5 {
        assert!(ticker.tick(t0 + Duration::from_millis(16 * i)));
    }
    assert_eq!(calls.get(), 5);
    assert_eq!(ticker.frames(), 5);

    ticker.stop();
    assert!(!ticker.is_running());
    assert!(!ticker.tick(t0 + Duration::from_millis(200)));
    assert_eq!(calls.get(), 5);
    assert_eq!(Rc::strong_count(&calls), 1);
}

#[test]
fn stop_handle_cancels_from_outside() {
    let calls = Rc::new(Cell::new(0u32));
    let c = calls.clone();
    let mut ticker = Ticker::new(move |_| c.set(c.get() + 1));
    let handle = ticker.stop_handle();
    let t0 = Instant::now();
    ticker.tick(t0);
    handle.stop();
    assert!(!ticker.tick(t0 + Duration::from_millis(16)));
    assert_eq!(calls.get(), 1);
    assert_eq!(Rc::strong_count(&calls), 1);
}

#[test]
fn ticker_reports_clamped_frame_delta() {
    let dts = Rc::new(RefCell::new(Vec::new()));
    let d = dts.clone();
    let mut ticker = Ticker::new(move |dt| d.borrow_mut().push(dt));
    let t0 = Instant::now();
    ticker.tick(t0);
    ticker.tick(t0 + Duration::from_millis(16));
    ticker.tick(t0 + Duration::from_secs(5));
    let dts = dts.borrow();
    assert_eq!(dts[0], 0.0);
    assert!((dts[1] - 0.016).abs() < 1e-4);
    assert_eq!(dts[2], scene_core::MAX_FRAME_DT);
}

#[test]
fn ticker_drives_scene_frames() {
    let store = Rc::new(ModeStore::new());
    let scene = Rc::new(RefCell::new(
        Scene::new(small_config(), store.clone(), 1024.0).expect("scene"),
    ));
    let out = Rc::new(RefCell::new(FrameOutput::default()));
    let (s, o) = (scene.clone(), out.clone());
    let mut ticker = Ticker::new(move |_| s.borrow_mut().frame(&mut o.borrow_mut()));

    let t0 = Instant::now();
    for i in 0..10u64 {
        if i == 5 {
            store.set_mode(Mode::Warning);
        }
        ticker.tick(t0 + Duration::from_millis(16 * i));
    }
    ticker.stop();
    assert_eq!(scene.borrow().frames(), 10);
    assert_eq!(out.borrow().mode, Mode::Warning);
    assert_eq!(Rc::strong_count(&scene), 1);
}

#[test]
fn neutral_pointer_recenters_the_centerpiece() {
    let store = Rc::new(ModeStore::new());
    let mut scene = Scene::new(small_config(), store, 1024.0).expect("scene");
    scene.set_surface_size(1024.0, 768.0);
    let mut out = FrameOutput::default();

    scene.set_pointer(Pointer::new(1.0, 1.0));
    for _ in 0..60 {
        scene.frame(&mut out);
    }
    let away = scene.centerpiece().position;
    assert!(away.length() > 1.0);

    scene.set_pointer(Pointer::NEUTRAL);
    for _ in 0..200 {
        scene.frame(&mut out);
    }
    assert!(scene.centerpiece().position.length() < 1e-3);
}
