use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct LoopInner {
    handle: Cell<Option<i32>>,
    running: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopInner {
    fn schedule(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.handle.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// A `requestAnimationFrame` loop that is cancelled when stopped or dropped.
///
/// The callback receives the seconds elapsed since the previous frame.
pub struct AnimationLoop {
    inner: Rc<LoopInner>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f32) + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            handle: Cell::new(None),
            running: Cell::new(true),
            tick: RefCell::new(None),
        });
        let weak: Weak<LoopInner> = Rc::downgrade(&inner);
        let mut last = Instant::now();
        let tick = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            if !inner.running.get() {
                return;
            }
            let now = Instant::now();
            let dt = (now - last).as_secs_f32();
            last = now;
            on_frame(dt);
            if inner.running.get() {
                inner.schedule();
            }
        }) as Box<dyn FnMut()>);
        *inner.tick.borrow_mut() = Some(tick);
        inner.schedule();
        Self { inner }
    }

    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.handle.take() {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
        self.inner.tick.borrow_mut().take();
    }
}
