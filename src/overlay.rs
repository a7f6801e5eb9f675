use crate::dom::{self, EventListener};
use crate::error::WidgetError;
use crate::events;
use crate::state::{FullscreenCommand, FullscreenController, Rendered};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const GITHUB_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="22" height="22" viewBox="0 0 24 24" fill="currentColor"><path d="M12 .5C5.65.5.5 5.65.5 12a11.5 11.5 0 0 0 7.86 10.92c.58.1.79-.25.79-.56v-2c-3.2.7-3.87-1.37-3.87-1.37-.52-1.33-1.28-1.69-1.28-1.69-1.04-.71.08-.7.08-.7 1.15.08 1.76 1.19 1.76 1.19 1.03 1.76 2.69 1.25 3.35.96.1-.74.4-1.25.73-1.54-2.55-.29-5.24-1.28-5.24-5.68 0-1.26.45-2.28 1.19-3.09-.12-.29-.52-1.46.11-3.05 0 0 .97-.31 3.17 1.18a11 11 0 0 1 5.77 0c2.2-1.49 3.17-1.18 3.17-1.18.63 1.59.23 2.76.11 3.05.74.81 1.19 1.83 1.19 3.09 0 4.41-2.69 5.38-5.25 5.67.41.36.78 1.06.78 2.14v3.17c0 .31.21.67.8.56A11.5 11.5 0 0 0 23.5 12C23.5 5.65 18.35.5 12 .5z"/></svg>"#;
const ENTER_FULLSCREEN_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="22" height="22" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M4 9V4h5M20 9V4h-5M4 15v5h5M20 15v5h-5"/></svg>"#;
const EXIT_FULLSCREEN_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="22" height="22" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 4v5H4M15 4v5h5M9 20v-5H4M15 20v-5h5"/></svg>"#;

#[inline]
fn show_hover(el: &web::Element, hovered: bool) {
    dom::set_class(el, "is-hovered", hovered);
}

/// Static external link to the project repository.
pub struct LinkButton {
    anchor: web::Element,
    _hover: [EventListener; 2],
}

impl LinkButton {
    pub fn mount(
        document: &web::Document,
        parent: &web::Element,
        href: &str,
    ) -> Result<Self, WidgetError> {
        let anchor: web::Element =
            dom::create_element(document, "a", "overlay-button github-link")?;
        anchor.set_attribute("href", href).map_err(dom::dom_err)?;
        _ = anchor.set_attribute("target", "_blank");
        _ = anchor.set_attribute("rel", "noopener noreferrer");
        _ = anchor.set_attribute("aria-label", "View source on GitHub");
        anchor.set_inner_html(GITHUB_ICON);
        parent.append_child(&anchor).map_err(dom::dom_err)?;

        let hover = {
            let hovered = Cell::new(false);
            let el = anchor.clone();
            events::wire_hover(&anchor, move |h| {
                if hovered.replace(h) != h {
                    show_hover(&el, h);
                }
            })?
        };
        Ok(Self {
            anchor,
            _hover: hover,
        })
    }
}

impl Drop for LinkButton {
    fn drop(&mut self) {
        self.anchor.remove();
    }
}

struct FullscreenInner {
    controller: FullscreenController,
    document: web::Document,
    button: web::Element,
    icon: Rendered<bool>,
}

impl FullscreenInner {
    fn is_document_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn render(&mut self) {
        let state = self.controller.state();
        _ = self
            .button
            .set_attribute("aria-label", self.controller.aria_label());
        dom::set_class(&self.button, "is-fullscreen", state.is_fullscreen);
        show_hover(&self.button, state.is_hovered);
        if self.icon.update(state.is_fullscreen) {
            self.button.set_inner_html(if state.is_fullscreen {
                EXIT_FULLSCREEN_ICON
            } else {
                ENTER_FULLSCREEN_ICON
            });
        }
    }
}

fn request(cmd: FullscreenCommand, document: &web::Document) {
    let target: Result<JsValue, JsValue> = match cmd {
        FullscreenCommand::Enter => document
            .document_element()
            .map(JsValue::from)
            .ok_or_else(|| JsValue::from_str("no document element")),
        FullscreenCommand::Exit => Ok(JsValue::from(document.clone())),
    };
    let method = match cmd {
        FullscreenCommand::Enter => "requestFullscreen",
        FullscreenCommand::Exit => "exitFullscreen",
    };
    match target.and_then(|t| dom::call_promise_method(&t, method)) {
        Ok(Some(promise)) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[fullscreen] {:?} rejected: {}", cmd, dom::js_error(&e));
            }
        }),
        Ok(None) => {}
        Err(e) => log::warn!("[fullscreen] {:?} failed: {}", cmd, dom::js_error(&e)),
    }
}

fn toggle_fullscreen(inner: &Rc<RefCell<FullscreenInner>>) {
    let (cmd, document) = {
        let mut inner = inner.borrow_mut();
        // resync in case a change event was missed (e.g. fullscreen entered before mount)
        let now = inner.is_document_fullscreen();
        inner.controller.fullscreen_changed(now);
        (inner.controller.toggle(), inner.document.clone())
    };
    if let Some(cmd) = cmd {
        request(cmd, &document);
    }
}

/// Button mirroring `document.fullscreenElement`; toggles fullscreen on the
/// root element.
pub struct FullscreenButton {
    inner: Rc<RefCell<FullscreenInner>>,
    _listeners: Vec<EventListener>,
}

impl FullscreenButton {
    pub fn mount(document: &web::Document, parent: &web::Element) -> Result<Self, WidgetError> {
        let button: web::Element =
            dom::create_element(document, "button", "overlay-button fullscreen-toggle")?;
        _ = button.set_attribute("type", "button");
        parent.append_child(&button).map_err(dom::dom_err)?;

        let initially = document.fullscreen_element().is_some();
        let inner = Rc::new(RefCell::new(FullscreenInner {
            controller: FullscreenController::new(initially),
            document: document.clone(),
            button: button.clone(),
            icon: Rendered::default(),
        }));

        let mut listeners = Vec::with_capacity(4);
        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(document, "fullscreenchange", move |_| {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    let now = inner.is_document_fullscreen();
                    inner.controller.fullscreen_changed(now);
                    inner.render();
                }
            })?);
        }
        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(&button, "click", move |_| {
                if let Some(inner) = weak.upgrade() {
                    toggle_fullscreen(&inner);
                }
            })?);
        }
        {
            let weak = Rc::downgrade(&inner);
            listeners.extend(events::wire_hover(&button, move |hovered| {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    inner.controller.set_hovered(hovered);
                    inner.render();
                }
            })?);
        }

        inner.borrow_mut().render();
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn toggle(&self) {
        toggle_fullscreen(&self.inner);
    }
}

impl Drop for FullscreenButton {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.controller.unsubscribe();
        inner.button.remove();
    }
}
