// Host-side tests for globe construction, resize and teardown sequencing.
// A recording factory stands in for the GPU renderer.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod error {
    include!("../src/error.rs");
}
mod config {
    include!("../src/config.rs");
}
mod globe {
    pub mod lifecycle {
        include!("../src/globe/lifecycle.rs");
    }
}

use config::GlobeConfig;
use error::WidgetError;
use globe::lifecycle::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Create { id: usize, side: u32 },
    Render { id: usize, phi: f32 },
    Destroy { id: usize },
}

type Log = Rc<RefCell<Vec<Call>>>;

struct MockFactory {
    log: Log,
    next_id: usize,
    fail_next: bool,
}

struct MockInstance {
    id: usize,
    log: Log,
}

impl GlobeInstance for MockInstance {
    fn render(&mut self, phi: f32) -> Result<(), WidgetError> {
        self.log.borrow_mut().push(Call::Render { id: self.id, phi });
        Ok(())
    }

    fn destroy(self) {
        self.log.borrow_mut().push(Call::Destroy { id: self.id });
    }
}

impl GlobeFactory for MockFactory {
    type Instance = MockInstance;

    fn create(
        &mut self,
        size: SurfaceSize,
        _config: &GlobeConfig,
    ) -> Result<MockInstance, WidgetError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(WidgetError::Gpu("adapter lost".to_string()));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.log.borrow_mut().push(Call::Create {
            id,
            side: size.width_px,
        });
        Ok(MockInstance {
            id,
            log: self.log.clone(),
        })
    }
}

fn lifecycle() -> (GlobeLifecycle<MockFactory>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let factory = MockFactory {
        log: log.clone(),
        next_id: 0,
        fail_next: false,
    };
    (GlobeLifecycle::new(factory, GlobeConfig::default(), 2.0), log)
}

fn count(log: &Log, pred: impl Fn(&Call) -> bool) -> usize {
    log.borrow().iter().filter(|c| pred(c)).count()
}

#[test]
fn surface_is_square_and_oversampled() {
    let s = SurfaceSize::square(600.0, 2.0);
    assert_eq!(s.width_px, 1200);
    assert_eq!(s.height_px, 1200);
    assert_eq!(s.css_width, 600.0);
}

#[test]
fn degenerate_widths_still_yield_a_drawable_surface() {
    assert_eq!(SurfaceSize::square(0.0, 2.0).width_px, 1);
    assert_eq!(SurfaceSize::square(-5.0, 2.0).width_px, 1);
    assert_eq!(SurfaceSize::square(f64::NAN, 2.0).width_px, 1);
    assert_eq!(
        SurfaceSize::square(100_000.0, 2.0).width_px,
        constants::GLOBE_MAX_SURFACE_PX
    );
}

#[test]
fn mount_creates_one_instance() {
    let (mut g, log) = lifecycle();
    g.mount(500.0).unwrap();
    g.mount(500.0).unwrap();
    assert!(g.has_instance());
    assert_eq!(*log.borrow(), vec![Call::Create { id: 0, side: 1000 }]);
}

#[test]
fn resize_destroys_before_recreating_at_new_size() {
    let (mut g, log) = lifecycle();
    g.mount(500.0).unwrap();
    log.borrow_mut().clear();

    g.resize(300.0).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![Call::Destroy { id: 0 }, Call::Create { id: 1, side: 600 }]
    );
    assert_eq!(g.size().map(|s| s.width_px), Some(600));
}

#[test]
fn many_resizes_never_leave_two_instances_alive() {
    let (mut g, log) = lifecycle();
    g.mount(800.0).unwrap();
    for w in [700.0, 650.0, 900.0, 320.0] {
        g.resize(w).unwrap();
    }
    let created = count(&log, |c| matches!(c, Call::Create { .. }));
    let destroyed = count(&log, |c| matches!(c, Call::Destroy { .. }));
    assert_eq!(created, 5);
    assert_eq!(destroyed, 4);

    // each create is preceded by the destroy of the previous instance
    let calls = log.borrow();
    let mut alive = 0i32;
    for call in calls.iter() {
        match call {
            Call::Create { .. } => alive += 1,
            Call::Destroy { .. } => alive -= 1,
            Call::Render { .. } => {}
        }
        assert!(alive <= 1, "two globes alive at once: {:?}", calls);
    }
}

#[test]
fn frames_render_current_phi_then_advance() {
    let (mut g, log) = lifecycle();
    g.mount(400.0).unwrap();
    log.borrow_mut().clear();
    for _ in 0..3 {
        g.frame().unwrap();
    }
    let phis: Vec<f32> = log
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Render { phi, .. } => Some(*phi),
            _ => None,
        })
        .collect();
    assert_eq!(phis.len(), 3);
    assert_eq!(phis[0], 0.0);
    assert!((phis[1] - 0.003).abs() < 1e-6);
    assert!((phis[2] - 0.006).abs() < 1e-6);
    assert!((g.phi() - 0.009).abs() < 1e-12);
}

#[test]
fn phi_keeps_growing_across_resizes() {
    let (mut g, _log) = lifecycle();
    g.mount(400.0).unwrap();
    let mut last = g.phi();
    for i in 0..50 {
        if i % 10 == 0 {
            g.resize(400.0 + i as f64).unwrap();
        }
        g.frame().unwrap();
        assert!(g.phi() > last);
        last = g.phi();
    }
}

#[test]
fn render_phi_wraps_to_one_turn() {
    let state = GlobeRenderState {
        phi: std::f64::consts::TAU * 1000.0 + 0.5,
    };
    assert!((state.render_phi() - 0.5).abs() < 1e-4);
}

#[test]
fn frame_without_instance_does_nothing() {
    let (mut g, log) = lifecycle();
    g.frame().unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(g.phi(), 0.0);
}

#[test]
fn failed_construction_is_retried_on_next_resize() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let factory = MockFactory {
        log: log.clone(),
        next_id: 0,
        fail_next: true,
    };
    let mut g = GlobeLifecycle::new(factory, GlobeConfig::default(), 2.0);
    assert!(g.mount(400.0).is_err());
    assert!(!g.has_instance());
    assert_eq!(g.size(), None);

    g.resize(400.0).unwrap();
    assert!(g.has_instance());
    assert_eq!(*log.borrow(), vec![Call::Create { id: 0, side: 800 }]);
}

#[test]
fn unmount_destroys_and_ignores_later_events() {
    let (mut g, log) = lifecycle();
    g.mount(400.0).unwrap();
    g.frame().unwrap();
    g.unmount();
    assert!(g.is_torn_down());
    assert!(!g.has_instance());
    let phi = g.phi();
    log.borrow_mut().clear();

    g.resize(900.0).unwrap();
    g.mount(900.0).unwrap();
    g.frame().unwrap();
    assert!(log.borrow().is_empty());
    assert_eq!(g.phi(), phi);
}

#[test]
fn dropping_the_lifecycle_destroys_the_instance() {
    let (mut g, log) = lifecycle();
    g.mount(400.0).unwrap();
    drop(g);
    assert_eq!(count(&log, |c| *c == Call::Destroy { id: 0 }), 1);
}

#[test]
fn configuration_is_fixed_at_construction() {
    let (mut g, _log) = lifecycle();
    g.mount(400.0).unwrap();
    g.resize(500.0).unwrap();
    assert_eq!(g.config(), &GlobeConfig::default());
    assert_eq!(g.factory().next_id, 2);
}
