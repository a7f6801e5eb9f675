use crate::error::WidgetError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Best-effort human readable text for a thrown JS value.
pub fn js_error(err: &JsValue) -> String {
    if let Some(ex) = err.dyn_ref::<web::DomException>() {
        format!("{}: {}", ex.name(), ex.message())
    } else if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        String::from(e.message())
    } else {
        format!("{:?}", err)
    }
}

#[inline]
pub fn dom_err(err: JsValue) -> WidgetError {
    WidgetError::Dom(js_error(&err))
}

/// An event subscription that is removed when dropped.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<Self, WidgetError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub fn create_element<T: JsCast>(
    document: &web::Document,
    tag: &str,
    class: &str,
) -> Result<T, WidgetError> {
    let el = document.create_element(tag).map_err(dom_err)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<T>()
        .map_err(|_| WidgetError::Dom(format!("<{}> has an unexpected type", tag)))
}

/// Canvas that fills its container; the backing size is managed separately.
pub fn create_canvas(
    document: &web::Document,
    class: &str,
    style: &str,
) -> Result<web::HtmlCanvasElement, WidgetError> {
    let canvas: web::HtmlCanvasElement = create_element(document, "canvas", class)?;
    canvas.set_attribute("style", style).map_err(dom_err)?;
    Ok(canvas)
}

/// A mount point looked up by id. When the page had to create it, dropping
/// the guard removes it again.
pub struct MountRoot {
    element: web::Element,
    created: bool,
}

impl MountRoot {
    pub fn element(&self) -> &web::Element {
        &self.element
    }
}

impl Drop for MountRoot {
    fn drop(&mut self) {
        if self.created {
            self.element.remove();
        }
    }
}

/// Element with the given id, created as a `<div>` under `<body>` when absent.
pub fn ensure_root(document: &web::Document, id: &str) -> Result<MountRoot, WidgetError> {
    if let Some(element) = document.get_element_by_id(id) {
        return Ok(MountRoot {
            element,
            created: false,
        });
    }
    let body = document
        .body()
        .ok_or_else(|| WidgetError::MissingElement("body".to_string()))?;
    let element = document.create_element("div").map_err(dom_err)?;
    element.set_id(id);
    body.append_child(&element).map_err(dom_err)?;
    Ok(MountRoot {
        element,
        created: true,
    })
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio. Returns the CSS size and the ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f64, f64, f64) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    (rect.width(), rect.height(), dpr)
}

/// Call a promise-returning method by name, e.g. `requestFullscreen`.
///
/// The typed bindings drop the returned promise, which hides rejections; going
/// through `Reflect` keeps it. `Ok(None)` when the method returned something
/// other than a promise (older engines).
pub fn call_promise_method(
    target: &JsValue,
    method: &str,
) -> Result<Option<js_sys::Promise>, JsValue> {
    let f = js_sys::Reflect::get(target, &JsValue::from_str(method))?;
    let f: js_sys::Function = f
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{} is not supported", method)))?;
    let ret = f.call0(target)?;
    Ok(ret.dyn_into::<js_sys::Promise>().ok())
}
