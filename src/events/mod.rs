use crate::dom::EventListener;
use crate::error::WidgetError;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod keyboard;

pub use keyboard::Shortcut;

/// Window `keydown` handler for the page shortcuts. Modified keys, auto-repeat
/// and keys aimed at text inputs are left alone.
pub fn wire_shortcuts(
    window: &web::Window,
    mut on_shortcut: impl FnMut(Shortcut) + 'static,
) -> Result<EventListener, WidgetError> {
    EventListener::new(window, "keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || ev.repeat() {
            return;
        }
        if let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())
        {
            if keyboard::is_text_entry(&target.tag_name()) || target.is_content_editable() {
                return;
            }
        }
        if let Some(shortcut) = keyboard::shortcut_for_key(&ev.key()) {
            log::info!("[keys] {:?}", shortcut);
            on_shortcut(shortcut);
            ev.prevent_default();
        }
    })
}

/// `mouseenter` / `mouseleave` pair reporting hover changes for one element.
pub fn wire_hover(
    el: &web::Element,
    on_change: impl Fn(bool) + 'static,
) -> Result<[EventListener; 2], WidgetError> {
    let on_change = Rc::new(on_change);
    let enter = {
        let on_change = on_change.clone();
        EventListener::new(el, "mouseenter", move |_| on_change(true))?
    };
    let leave = EventListener::new(el, "mouseleave", move |_| on_change(false))?;
    Ok([enter, leave])
}
