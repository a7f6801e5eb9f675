use crate::config::SparklesConfig;
use crate::constants::SPARKLES_CANVAS_STYLE;
use crate::dom::{self, EventListener};
use crate::error::WidgetError;
use crate::frame::AnimationLoop;
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod field;

use field::ParticleField;

struct Surface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    dpr: Cell<f64>,
    fill: String,
}

impl Surface {
    fn draw(&self, field: &ParticleField) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let dpr = self.dpr.get();
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(&self.fill);
        for p in field.particles() {
            self.ctx.set_global_alpha(field.opacity(p) as f64);
            self.ctx.begin_path();
            _ = self.ctx.arc(
                p.pos[0] as f64 * w,
                p.pos[1] as f64 * h,
                p.size as f64 * dpr,
                0.0,
                TAU,
            );
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }
}

/// Decorative particle layer drawn with Canvas 2D inside `#sparkles`.
pub struct SparklesWidget {
    field: Rc<RefCell<ParticleField>>,
    surface: Rc<Surface>,
    frame_loop: AnimationLoop,
    _resize: EventListener,
}

impl SparklesWidget {
    pub fn mount(
        document: &web::Document,
        container: &web::Element,
        config: SparklesConfig,
    ) -> Result<Self, WidgetError> {
        let window = web::window().ok_or_else(|| WidgetError::MissingElement("window".into()))?;
        let canvas = dom::create_canvas(document, "sparkles-canvas", SPARKLES_CANVAS_STYLE)?;
        container.append_child(&canvas).map_err(dom::dom_err)?;
        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx
                .dyn_into::<web::CanvasRenderingContext2d>()
                .map_err(|_| WidgetError::Dom("2d context has an unexpected type".into())),
            Ok(None) => Err(WidgetError::Dom("2d context unavailable".into())),
            Err(e) => Err(dom::dom_err(e)),
        };
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };

        let (css_w, css_h, dpr) = dom::sync_canvas_backing_size(&canvas);
        let fill = config.css_color();
        let field = Rc::new(RefCell::new(ParticleField::new(
            config,
            css_w as f32,
            css_h as f32,
            rand::random(),
        )));
        let surface = Rc::new(Surface {
            canvas,
            ctx,
            dpr: Cell::new(dpr),
            fill,
        });

        let resize = {
            let field = Rc::downgrade(&field);
            let surface = Rc::downgrade(&surface);
            EventListener::new(&window, "resize", move |_| {
                let (Some(field), Some(surface)) = (field.upgrade(), surface.upgrade()) else {
                    return;
                };
                let (w, h, dpr) = dom::sync_canvas_backing_size(&surface.canvas);
                surface.dpr.set(dpr);
                field.borrow_mut().resize(w as f32, h as f32);
            })?
        };

        let frame_loop = {
            let field = Rc::downgrade(&field);
            let surface = Rc::downgrade(&surface);
            AnimationLoop::start(move |dt| {
                let (Some(field), Some(surface)) = (field.upgrade(), surface.upgrade()) else {
                    return;
                };
                let mut field = field.borrow_mut();
                field.step(dt);
                surface.draw(&field);
            })
        };

        log::info!(
            "[sparkles] mounted {} particles on {:.0}x{:.0}",
            field.borrow().len(),
            css_w,
            css_h
        );
        Ok(Self {
            field,
            surface,
            frame_loop,
            _resize: resize,
        })
    }
}

impl Drop for SparklesWidget {
    fn drop(&mut self) {
        self.frame_loop.stop();
        self.surface.canvas.remove();
        log::info!("[sparkles] unmounted ({} particles)", self.field.borrow().len());
    }
}
