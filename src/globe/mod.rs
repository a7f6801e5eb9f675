use crate::config::GlobeConfig;
use crate::constants::{GLOBE_CANVAS_STYLE, GLOBE_OVERSAMPLE};
use crate::dom::{self, EventListener};
use crate::error::WidgetError;
use crate::frame::AnimationLoop;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub mod lifecycle;
mod pipeline;
mod render;

use lifecycle::GlobeLifecycle;
use render::GpuContext;

type Lifecycle = Rc<RefCell<GlobeLifecycle<GpuContext>>>;

/// The rotating globe: a canvas inside `#globe`, rebuilt on every window resize.
pub struct GlobeWidget {
    lifecycle: Lifecycle,
    canvas: web::HtmlCanvasElement,
    frame_loop: AnimationLoop,
    _resize: EventListener,
}

impl GlobeWidget {
    pub async fn mount(
        document: &web::Document,
        container: web::Element,
        config: GlobeConfig,
    ) -> Result<Self, WidgetError> {
        let window = web::window().ok_or_else(|| WidgetError::MissingElement("window".into()))?;
        let canvas = dom::create_canvas(document, "globe-canvas", GLOBE_CANVAS_STYLE)?;
        container.append_child(&canvas).map_err(dom::dom_err)?;

        let ctx = match GpuContext::new(&canvas).await {
            Ok(ctx) => ctx,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };

        let lifecycle: Lifecycle = Rc::new(RefCell::new(GlobeLifecycle::new(
            ctx,
            config,
            GLOBE_OVERSAMPLE,
        )));
        let width = container.get_bounding_client_rect().width();
        if let Err(e) = lifecycle.borrow_mut().mount(width) {
            log::error!("[globe] initial surface: {}", e);
        }

        let resize = {
            let weak = Rc::downgrade(&lifecycle);
            let container = container.clone();
            EventListener::new(&window, "resize", move |_| {
                let Some(lifecycle) = weak.upgrade() else {
                    return;
                };
                let width = container.get_bounding_client_rect().width();
                if let Err(e) = lifecycle.borrow_mut().resize(width) {
                    log::error!("[globe] rebuild after resize: {}", e);
                }
            })?
        };

        let frame_loop = {
            let weak = Rc::downgrade(&lifecycle);
            let mut reported = false;
            AnimationLoop::start(move |_dt| {
                let Some(lifecycle) = weak.upgrade() else {
                    return;
                };
                let result = lifecycle.borrow_mut().frame();
                match result {
                    Ok(()) => reported = false,
                    Err(e) if !reported => {
                        log::error!("[globe] render: {}", e);
                        reported = true;
                    }
                    Err(_) => {}
                }
            })
        };

        log::info!("[globe] mounted at {:.0}px", width);
        Ok(Self {
            lifecycle,
            canvas,
            frame_loop,
            _resize: resize,
        })
    }
}

impl Drop for GlobeWidget {
    fn drop(&mut self) {
        self.frame_loop.stop();
        self.lifecycle.borrow_mut().unmount();
        self.canvas.remove();
        log::info!("[globe] unmounted");
    }
}
